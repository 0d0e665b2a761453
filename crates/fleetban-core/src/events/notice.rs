//! Ban-created notice - the immutable unit of work handed to the relay

use chrono::{DateTime, Utc};

use crate::entities::{Ban, Identity};
use crate::value_objects::Snowflake;

use super::{BanAddedEvent, BanExport, BotExport, FleetEvent};

/// Snapshot of a freshly committed ban, resolved for relaying
///
/// Built once after the write commits; the relay never reads the stores
/// for ban data again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanCreatedNotice {
    pub ban_id: Snowflake,
    pub admin_handle: String,
    pub target_node_id: Option<Snowflake>,
    pub identity: Identity,
    pub reason: String,
    pub duration: i64,
    pub duration_human: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub requires_appeal: bool,
}

impl BanCreatedNotice {
    pub fn new(ban: &Ban, original: Identity, admin_handle: impl Into<String>) -> Self {
        Self {
            ban_id: ban.id,
            admin_handle: admin_handle.into(),
            target_node_id: ban.target_node_id,
            identity: original,
            reason: ban.reason.clone(),
            duration: ban.duration,
            duration_human: ban.duration_human(),
            expires_at: ban.expires_at,
            requires_appeal: ban.requires_appeal,
        }
    }

    /// Payload for the external bot channel
    pub fn bot_export(&self) -> BotExport {
        BotExport::Ban(BanExport {
            key: self.admin_handle.clone(),
            key2: self.identity.to_string(),
            msg: self.reason.clone(),
            time: self.duration_human.clone(),
            timestamp: self
                .expires_at
                .map_or(0, super::minutes_since_reference_epoch),
        })
    }

    /// Payload for fleet nodes
    pub fn fleet_event(&self) -> FleetEvent {
        FleetEvent::BanAdded(BanAddedEvent {
            admin_handle: self.admin_handle.clone(),
            node_id: self.target_node_id,
            handle: self.identity.handle().map(ToString::to_string),
            hardware_id: self.identity.hardware_id().map(ToString::to_string),
            network_address: self.identity.network_address_string(),
            reason: self.reason.clone(),
            duration: self.duration,
            requires_appeal: u8::from(self.requires_appeal),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use serde_json::json;

    use super::*;
    use crate::entities::BanTerms;

    fn sample(expires_at: Option<DateTime<Utc>>, node: Option<Snowflake>) -> BanCreatedNotice {
        let mut ban = Ban::new(
            Snowflake::new(10),
            Snowflake::new(20),
            BanTerms {
                target_node_id: node,
                reason: "cheating".to_string(),
                duration: 1440,
                expires_at: None,
                requires_appeal: true,
            },
            Utc::now(),
        );
        ban.expires_at = expires_at.map(|_| ban.created_at + TimeDelta::days(1));
        let identity = Identity::new(Some("bob"), None, None).unwrap();
        BanCreatedNotice::new(&ban, identity, "admin")
    }

    #[test]
    fn test_bot_export_for_timed_ban() {
        let notice = sample(Some(Utc::now()), None);
        let value = serde_json::to_value(notice.bot_export()).unwrap();

        assert_eq!(value["type"], "ban");
        assert_eq!(value["data"]["key"], "admin");
        assert_eq!(value["data"]["key2"], "bob (IP: , CompID: )");
        assert_eq!(value["data"]["msg"], "cheating");
        assert_eq!(value["data"]["time"], "1 day");
        assert!(value["data"]["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_bot_export_for_permanent_ban() {
        let notice = sample(None, None);
        let value = serde_json::to_value(notice.bot_export()).unwrap();
        assert_eq!(value["data"]["time"], "permanent");
        assert_eq!(value["data"]["timestamp"], 0);
    }

    #[test]
    fn test_fleet_event_shape() {
        let notice = sample(None, Some(Snowflake::new(5)));
        let value = serde_json::to_value(notice.fleet_event()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "ban_added",
                "admin_handle": "admin",
                "node_id": 5,
                "handle": "bob",
                "hardware_id": null,
                "network_address": null,
                "reason": "cheating",
                "duration": 1440,
                "requires_appeal": 1,
            })
        );
    }

    #[test]
    fn test_fleet_wide_event_has_null_node() {
        let notice = sample(None, None);
        let value = serde_json::to_value(notice.fleet_event()).unwrap();
        assert!(value["node_id"].is_null());
    }
}
