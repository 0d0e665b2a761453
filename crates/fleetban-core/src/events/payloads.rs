//! Wire payloads produced by the relay

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::value_objects::Snowflake;

/// Time origin of the bot channel's `timestamp` field (2000-01-01T00:00:00Z)
pub const REFERENCE_EPOCH_SECS: i64 = 946_684_800;

/// Whole minutes between `at` and the reference epoch
pub fn minutes_since_reference_epoch(at: DateTime<Utc>) -> i64 {
    let epoch = Utc
        .timestamp_opt(REFERENCE_EPOCH_SECS, 0)
        .single()
        .unwrap_or_default();
    (at - epoch).num_minutes().abs()
}

/// Message sent to the external bot channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BotExport {
    Ban(BanExport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanExport {
    /// Issuer handle
    pub key: String,
    /// Composite target identity
    pub key2: String,
    /// Reason
    pub msg: String,
    /// Human-readable length or `"permanent"`
    pub time: String,
    /// Expiry in minutes since the reference epoch, 0 when permanent
    pub timestamp: i64,
}

/// Event published to fleet nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FleetEvent {
    BanAdded(BanAddedEvent),
}

impl FleetEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::BanAdded(_) => "ban_added",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanAddedEvent {
    pub admin_handle: String,
    /// Plain JSON integer on the wire, null when fleet-wide
    #[serde(serialize_with = "serialize_node_id")]
    pub node_id: Option<Snowflake>,
    pub handle: Option<String>,
    pub hardware_id: Option<String>,
    pub network_address: Option<String>,
    pub reason: String,
    pub duration: i64,
    /// 0 or 1
    pub requires_appeal: u8,
}

fn serialize_node_id<S>(node_id: &Option<Snowflake>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    node_id.map(Snowflake::into_inner).serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_epoch_minutes() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(minutes_since_reference_epoch(epoch), 0);

        let next_day = Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 59).unwrap();
        assert_eq!(minutes_since_reference_epoch(next_day), 1440);
    }

    #[test]
    fn test_event_name() {
        let event = FleetEvent::BanAdded(BanAddedEvent {
            admin_handle: "a".into(),
            node_id: None,
            handle: None,
            hardware_id: None,
            network_address: None,
            reason: "r".into(),
            duration: 0,
            requires_appeal: 0,
        });
        assert_eq!(event.event_name(), "ban_added");
    }

    #[test]
    fn test_node_id_is_numeric_on_the_wire() {
        let event = BanAddedEvent {
            admin_handle: "a".into(),
            node_id: Some(Snowflake::new(1_234_567_890_123)),
            handle: None,
            hardware_id: None,
            network_address: None,
            reason: "r".into(),
            duration: 0,
            requires_appeal: 0,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""node_id":1234567890123"#));

        let back: BanAddedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
