//! Redis pub/sub publisher for fleet nodes.

use async_trait::async_trait;
use fleetban_core::{FleetEvent, FleetRelay, RelayDeliveryError, RelayResult, Snowflake};

use crate::fleet::NodeChannels;
use crate::pool::{RedisPool, RedisPoolError};

/// Publishes fleet events on the node's own channel
#[derive(Debug, Clone)]
pub struct RedisFleetRelay {
    pool: RedisPool,
    channels: NodeChannels,
}

impl RedisFleetRelay {
    #[must_use]
    pub fn new(pool: RedisPool, channels: NodeChannels) -> Self {
        Self { pool, channels }
    }
}

impl From<RedisPoolError> for RelayDeliveryError {
    fn from(err: RedisPoolError) -> Self {
        Self::Transport(err.to_string())
    }
}

#[async_trait]
impl FleetRelay for RedisFleetRelay {
    async fn send_to_node(&self, node_id: Snowflake, event: &FleetEvent) -> RelayResult {
        let channel = self.channels.name(node_id);
        let payload = serde_json::to_string(event)?;

        let receivers = self.pool.publish(&channel, &payload).await?;

        tracing::debug!(
            channel = %channel,
            event_type = event.event_name(),
            receivers = receivers,
            "Published fleet event"
        );

        // Nobody subscribed: the node is down or not listening
        if receivers == 0 {
            return Err(RelayDeliveryError::Unreachable(channel));
        }
        Ok(())
    }
}
