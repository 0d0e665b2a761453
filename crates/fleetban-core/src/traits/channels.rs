//! Outbound notification channels

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::events::{BotExport, FleetEvent};
use crate::value_objects::Snowflake;

/// External chat-bot endpoint
#[async_trait]
pub trait BotChannel: Send + Sync {
    /// Whether exports should be attempted at all
    fn is_enabled(&self) -> bool {
        true
    }

    /// Deliver one export; no response body is consumed
    async fn export(&self, payload: &BotExport) -> RelayResult;
}

/// Transport to fleet nodes
#[async_trait]
pub trait FleetRelay: Send + Sync {
    /// Deliver one event to a single node
    async fn send_to_node(&self, node_id: Snowflake, event: &FleetEvent) -> RelayResult;
}
