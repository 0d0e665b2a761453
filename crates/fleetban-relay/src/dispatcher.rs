//! Notification dispatcher
//!
//! Runs the bot export and the fleet relay for one notice as two independent
//! failure domains. Every outcome lands in the returned [`DispatchReport`];
//! nothing is propagated as an error.

use std::sync::Arc;

use futures::future::join_all;
use tracing::instrument;

use fleetban_core::{
    BanCreatedNotice, BotChannel, FleetEvent, FleetRelay, NodeRepository, RelayDeliveryError,
    Snowflake,
};

use crate::policy::DeliveryPolicy;
use crate::report::{DeliveryOutcome, DeliveryTarget, DispatchReport};

pub struct NotificationDispatcher {
    bot: Arc<dyn BotChannel>,
    fleet: Arc<dyn FleetRelay>,
    nodes: Arc<dyn NodeRepository>,
    policy: DeliveryPolicy,
}

impl NotificationDispatcher {
    pub fn new(
        bot: Arc<dyn BotChannel>,
        fleet: Arc<dyn FleetRelay>,
        nodes: Arc<dyn NodeRepository>,
        policy: DeliveryPolicy,
    ) -> Self {
        Self {
            bot,
            fleet,
            nodes,
            policy,
        }
    }

    /// Deliver one notice to the bot and to its node(s)
    #[instrument(skip(self, notice), fields(ban_id = %notice.ban_id))]
    pub async fn dispatch(&self, notice: &BanCreatedNotice) -> DispatchReport {
        let (bot, fleet) = tokio::join!(self.dispatch_bot(notice), self.dispatch_fleet(notice));

        let mut report = DispatchReport::new(notice.ban_id);
        report.push(bot);
        for outcome in fleet {
            report.push(outcome);
        }
        report
    }

    async fn dispatch_bot(&self, notice: &BanCreatedNotice) -> DeliveryOutcome {
        if !self.bot.is_enabled() {
            return DeliveryOutcome::skipped(DeliveryTarget::Bot, "bot channel disabled");
        }

        let payload = notice.bot_export();
        let result = self.policy.deliver(|| self.bot.export(&payload)).await;
        DeliveryOutcome::from_result(DeliveryTarget::Bot, result)
    }

    async fn dispatch_fleet(&self, notice: &BanCreatedNotice) -> Vec<DeliveryOutcome> {
        let event = notice.fleet_event();

        if let Some(node_id) = notice.target_node_id {
            return vec![self.send_to_node(node_id, &event).await];
        }

        // Broadcast: the target set is fixed before the first send
        let nodes = match tokio::time::timeout(self.policy.timeout, self.nodes.list_active()).await
        {
            Ok(Ok(nodes)) => nodes,
            Ok(Err(err)) => {
                return vec![DeliveryOutcome::from_result(
                    DeliveryTarget::ActiveNodes,
                    Err(RelayDeliveryError::TargetLookup(err.to_string())),
                )]
            }
            Err(_) => {
                return vec![DeliveryOutcome::from_result(
                    DeliveryTarget::ActiveNodes,
                    Err(RelayDeliveryError::Timeout(self.policy.timeout)),
                )]
            }
        };

        if nodes.is_empty() {
            return vec![DeliveryOutcome::skipped(
                DeliveryTarget::ActiveNodes,
                "no active nodes",
            )];
        }

        tracing::debug!(nodes = nodes.len(), "Broadcasting to active nodes");
        join_all(nodes.iter().map(|node| self.send_to_node(node.id, &event))).await
    }

    async fn send_to_node(&self, node_id: Snowflake, event: &FleetEvent) -> DeliveryOutcome {
        let result = self
            .policy
            .deliver(|| self.fleet.send_to_node(node_id, event))
            .await;
        DeliveryOutcome::from_result(DeliveryTarget::Node(node_id), result)
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{TimeDelta, Utc};
    use parking_lot::Mutex;

    use fleetban_core::{
        Ban, BanTerms, BotExport, DomainError, Identity, Node, RelayResult, RepoResult,
    };

    use super::*;
    use crate::bot::DisabledBotChannel;
    use crate::report::DeliveryStatus;

    #[derive(Default)]
    struct RecordingBot {
        exports: Mutex<Vec<BotExport>>,
        fail_with: Option<RelayDeliveryError>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl BotChannel for RecordingBot {
        async fn export(&self, payload: &BotExport) -> RelayResult {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.exports.lock().push(payload.clone());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct RecordingFleet {
        sent: Mutex<Vec<(Snowflake, FleetEvent)>>,
        failing: HashSet<Snowflake>,
    }

    #[async_trait]
    impl FleetRelay for RecordingFleet {
        async fn send_to_node(&self, node_id: Snowflake, event: &FleetEvent) -> RelayResult {
            self.sent.lock().push((node_id, event.clone()));
            if self.failing.contains(&node_id) {
                Err(RelayDeliveryError::Unreachable(format!("node:{node_id}")))
            } else {
                Ok(())
            }
        }
    }

    struct StaticNodes {
        nodes: Vec<Node>,
        fail: bool,
    }

    #[async_trait]
    impl NodeRepository for StaticNodes {
        async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Node>> {
            Ok(self.nodes.iter().find(|n| n.id == id).cloned())
        }

        async fn list_active(&self) -> RepoResult<Vec<Node>> {
            if self.fail {
                return Err(DomainError::DatabaseError("connection reset".into()));
            }
            Ok(self
                .nodes
                .iter()
                .filter(|n| n.receives_broadcasts())
                .cloned()
                .collect())
        }
    }

    fn node(id: i64, active: bool) -> Node {
        Node {
            id: Snowflake::new(id),
            name: format!("node-{id}"),
            active,
            invisible: false,
        }
    }

    fn nodes(list: Vec<Node>) -> Arc<StaticNodes> {
        Arc::new(StaticNodes {
            nodes: list,
            fail: false,
        })
    }

    fn notice(target: Option<Snowflake>) -> BanCreatedNotice {
        let mut ban = Ban::new(
            Snowflake::new(100),
            Snowflake::new(1),
            BanTerms {
                target_node_id: target,
                reason: "cheating".to_string(),
                duration: 1440,
                expires_at: None,
                requires_appeal: true,
            },
            Utc::now(),
        );
        ban.expires_at = Some(ban.created_at + TimeDelta::days(1));
        BanCreatedNotice::new(
            &ban,
            Identity::new(Some("bob"), None, None).unwrap(),
            "admin",
        )
    }

    fn dispatcher(
        bot: Arc<dyn BotChannel>,
        fleet: Arc<RecordingFleet>,
        nodes: Arc<dyn NodeRepository>,
    ) -> NotificationDispatcher {
        NotificationDispatcher::new(
            bot,
            fleet,
            nodes,
            DeliveryPolicy {
                timeout: Duration::from_millis(100),
                max_retries: 0,
            },
        )
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_active_node() {
        let bot = Arc::new(RecordingBot::default());
        let fleet = Arc::new(RecordingFleet::default());
        let nodes = nodes(vec![node(1, true), node(2, true), node(3, false)]);

        let report = dispatcher(bot.clone(), fleet.clone(), nodes)
            .dispatch(&notice(None))
            .await;

        let sent: HashSet<_> = fleet.sent.lock().iter().map(|(id, _)| *id).collect();
        assert_eq!(sent, HashSet::from([Snowflake::new(1), Snowflake::new(2)]));
        assert_eq!(report.delivered(), 3);

        let exports = bot.exports.lock();
        assert_eq!(exports.len(), 1);
        let BotExport::Ban(export) = &exports[0];
        assert_eq!(export.time, "1 day");
        assert!(export.timestamp > 0);
    }

    #[tokio::test]
    async fn test_broadcast_continues_past_failed_node() {
        let fleet = Arc::new(RecordingFleet {
            failing: HashSet::from([Snowflake::new(2)]),
            ..Default::default()
        });
        let nodes = nodes(vec![node(1, true), node(2, true), node(3, true)]);

        let report = dispatcher(Arc::new(RecordingBot::default()), fleet.clone(), nodes)
            .dispatch(&notice(None))
            .await;

        assert_eq!(fleet.sent.lock().len(), 3);
        assert_eq!(report.node_outcomes().count(), 3);
        let failures: Vec<_> = report.failures().map(|(t, _)| *t).collect();
        assert_eq!(failures, vec![DeliveryTarget::Node(Snowflake::new(2))]);
    }

    #[tokio::test]
    async fn test_targeted_ban_goes_to_one_node() {
        let fleet = Arc::new(RecordingFleet::default());
        let nodes = nodes(vec![node(1, true), node(2, true)]);

        dispatcher(Arc::new(RecordingBot::default()), fleet.clone(), nodes)
            .dispatch(&notice(Some(Snowflake::new(2))))
            .await;

        let sent = fleet.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Snowflake::new(2));
        let FleetEvent::BanAdded(event) = &sent[0].1;
        assert_eq!(event.node_id, Some(Snowflake::new(2)));
        assert_eq!(event.requires_appeal, 1);
    }

    #[tokio::test]
    async fn test_bot_failure_does_not_stop_fleet() {
        let bot = Arc::new(RecordingBot {
            fail_with: Some(RelayDeliveryError::Rejected(500)),
            ..Default::default()
        });
        let fleet = Arc::new(RecordingFleet::default());

        let report = dispatcher(bot, fleet.clone(), nodes(vec![node(1, true)]))
            .dispatch(&notice(None))
            .await;

        assert_eq!(fleet.sent.lock().len(), 1);
        assert!(matches!(
            report.outcome(DeliveryTarget::Bot).map(|o| &o.status),
            Some(DeliveryStatus::Failed(RelayDeliveryError::Rejected(500)))
        ));
    }

    #[tokio::test]
    async fn test_fleet_failure_does_not_stop_bot() {
        let bot = Arc::new(RecordingBot::default());
        let fleet = Arc::new(RecordingFleet {
            failing: HashSet::from([Snowflake::new(1)]),
            ..Default::default()
        });

        let report = dispatcher(bot.clone(), fleet, nodes(vec![node(1, true)]))
            .dispatch(&notice(None))
            .await;

        assert_eq!(bot.exports.lock().len(), 1);
        assert!(report.outcome(DeliveryTarget::Bot).unwrap().is_delivered());
    }

    #[tokio::test]
    async fn test_slow_bot_times_out() {
        let bot = Arc::new(RecordingBot {
            delay: Some(Duration::from_secs(5)),
            ..Default::default()
        });
        let fleet = Arc::new(RecordingFleet::default());

        let report = dispatcher(bot, fleet.clone(), nodes(vec![node(1, true)]))
            .dispatch(&notice(None))
            .await;

        assert!(matches!(
            report.outcome(DeliveryTarget::Bot).map(|o| &o.status),
            Some(DeliveryStatus::Failed(RelayDeliveryError::Timeout(_)))
        ));
        assert_eq!(fleet.sent.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_bot_is_skipped() {
        let report = dispatcher(
            Arc::new(DisabledBotChannel),
            Arc::new(RecordingFleet::default()),
            nodes(vec![node(1, true)]),
        )
        .dispatch(&notice(None))
        .await;

        assert!(matches!(
            report.outcome(DeliveryTarget::Bot).map(|o| &o.status),
            Some(DeliveryStatus::Skipped(_))
        ));
    }

    #[tokio::test]
    async fn test_node_lookup_failure_is_reported() {
        let bot = Arc::new(RecordingBot::default());
        let fleet = Arc::new(RecordingFleet::default());
        let nodes = Arc::new(StaticNodes {
            nodes: vec![node(1, true)],
            fail: true,
        });

        let report = dispatcher(bot.clone(), fleet.clone(), nodes)
            .dispatch(&notice(None))
            .await;

        assert!(fleet.sent.lock().is_empty());
        assert_eq!(bot.exports.lock().len(), 1);
        assert!(matches!(
            report.outcome(DeliveryTarget::ActiveNodes).map(|o| &o.status),
            Some(DeliveryStatus::Failed(RelayDeliveryError::TargetLookup(_)))
        ));
    }

    #[tokio::test]
    async fn test_empty_fleet_is_skipped() {
        let report = dispatcher(
            Arc::new(RecordingBot::default()),
            Arc::new(RecordingFleet::default()),
            nodes(vec![]),
        )
        .dispatch(&notice(None))
        .await;

        assert_eq!(report.failures().count(), 0);
        assert!(report.outcome(DeliveryTarget::ActiveNodes).is_some());
    }
}
