//! Ban entity - the authoritative enforcement record

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{humanize, Snowflake, PERMANENT};

/// Maximum length of a ban reason
pub const MAX_REASON_LENGTH: usize = 2000;

/// Derived lifecycle state of a ban
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanState {
    Active,
    Expired,
    Removed,
}

/// Ban entity
///
/// `duration` is the raw magnitude supplied by the issuer (minutes by
/// convention) and is relayed verbatim; `expires_at` is what decides whether
/// the ban still applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ban {
    pub id: Snowflake,
    pub issuer_id: Snowflake,
    /// `None` means the ban applies to the whole fleet
    pub target_node_id: Option<Snowflake>,
    pub reason: String,
    pub duration: i64,
    /// `None` means permanent
    pub expires_at: Option<DateTime<Utc>>,
    pub requires_appeal: bool,
    pub removed_by: Option<Snowflake>,
    pub removed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ban {
    /// Create a new, not yet persisted ban
    /// New active ban stamped at `now`
    ///
    /// Pass the same instant the terms were validated against so the
    /// humanized length matches what the caller asked for.
    pub fn new(
        id: Snowflake,
        issuer_id: Snowflake,
        terms: BanTerms,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            issuer_id,
            target_node_id: terms.target_node_id,
            reason: terms.reason,
            duration: terms.duration,
            expires_at: terms.expires_at,
            requires_appeal: terms.requires_appeal,
            removed_by: None,
            removed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the ban has been soft-deleted
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed_at.is_some()
    }

    /// Whether the ban has no expiry
    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }

    /// Not removed and not past its expiry at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_removed() && self.expires_at.map_or(true, |at| at > now)
    }

    /// Not removed but past its expiry at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_removed() && self.expires_at.is_some_and(|at| at <= now)
    }

    /// Combined state at `now`; removal wins over expiry
    pub fn state_at(&self, now: DateTime<Utc>) -> BanState {
        if self.is_removed() {
            BanState::Removed
        } else if self.is_expired_at(now) {
            BanState::Expired
        } else {
            BanState::Active
        }
    }

    /// Shortcut for [`Ban::is_active_at`] with the current time
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Span between creation and expiry, `None` for permanent bans
    pub fn length(&self) -> Option<TimeDelta> {
        self.expires_at.map(|at| at - self.created_at)
    }

    /// Human-readable length, or `"permanent"`
    pub fn duration_human(&self) -> String {
        self.length()
            .map_or_else(|| PERMANENT.to_string(), humanize)
    }

    /// Replace the mutable terms of the ban
    pub fn apply_terms(&mut self, terms: BanTerms) {
        self.target_node_id = terms.target_node_id;
        self.reason = terms.reason;
        self.duration = terms.duration;
        self.expires_at = terms.expires_at;
        self.requires_appeal = terms.requires_appeal;
        self.updated_at = Utc::now();
    }
}

/// The issuer-controlled part of a ban
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanTerms {
    pub target_node_id: Option<Snowflake>,
    pub reason: String,
    pub duration: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub requires_appeal: bool,
}

impl BanTerms {
    /// Check reason, duration and expiry against `now`
    ///
    /// The reason is trimmed in place.
    pub fn validate(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.validate_fields()?;
        if self.expires_at.is_some_and(|at| at <= now) {
            return Err(DomainError::ExpiryInPast);
        }
        Ok(())
    }

    /// Reason and duration only; an existing expiry is left alone
    pub fn validate_fields(&mut self) -> Result<(), DomainError> {
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(DomainError::EmptyReason);
        }
        if reason.chars().count() > MAX_REASON_LENGTH {
            return Err(DomainError::ReasonTooLong {
                max: MAX_REASON_LENGTH,
            });
        }
        if reason.len() != self.reason.len() {
            self.reason = reason.to_string();
        }

        if self.duration < 0 {
            return Err(DomainError::NegativeDuration);
        }
        Ok(())
    }
}
