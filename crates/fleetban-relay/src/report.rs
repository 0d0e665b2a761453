//! Per-dispatch delivery report
//!
//! Collected for every notice and written to the log; never returned to the
//! code path that created the ban.

use std::fmt;

use fleetban_core::{RelayDeliveryError, Snowflake};

/// Where a delivery went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryTarget {
    Bot,
    Node(Snowflake),
    /// The active-node lookup preceding a broadcast
    ActiveNodes,
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bot => f.write_str("bot"),
            Self::Node(id) => write!(f, "node {id}"),
            Self::ActiveNodes => f.write_str("active nodes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Skipped(&'static str),
    Failed(RelayDeliveryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub target: DeliveryTarget,
    pub status: DeliveryStatus,
}

impl DeliveryOutcome {
    pub fn from_result(target: DeliveryTarget, result: Result<(), RelayDeliveryError>) -> Self {
        let status = match result {
            Ok(()) => DeliveryStatus::Delivered,
            Err(err) => DeliveryStatus::Failed(err),
        };
        Self { target, status }
    }

    pub fn skipped(target: DeliveryTarget, why: &'static str) -> Self {
        Self {
            target,
            status: DeliveryStatus::Skipped(why),
        }
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered)
    }
}

/// Outcome of every target attempted for one ban
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub ban_id: Snowflake,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DispatchReport {
    pub fn new(ban_id: Snowflake) -> Self {
        Self {
            ban_id,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: DeliveryOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcome(&self, target: DeliveryTarget) -> Option<&DeliveryOutcome> {
        self.outcomes.iter().find(|o| o.target == target)
    }

    /// Node deliveries attempted, in no particular order
    pub fn node_outcomes(&self) -> impl Iterator<Item = &DeliveryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.target, DeliveryTarget::Node(_)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&DeliveryTarget, &RelayDeliveryError)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            DeliveryStatus::Failed(err) => Some((&o.target, err)),
            _ => None,
        })
    }

    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    /// Write the report: one warning per failure, then a summary line
    pub fn log(&self) {
        let mut failed = 0usize;
        for (target, err) in self.failures() {
            failed += 1;
            tracing::warn!(ban_id = %self.ban_id, %target, error = %err, "Relay delivery failed");
        }

        tracing::info!(
            ban_id = %self.ban_id,
            delivered = self.delivered(),
            failed,
            skipped = self.outcomes.len() - self.delivered() - failed,
            "Ban relay dispatched"
        );
    }
}
