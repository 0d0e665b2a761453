//! Per-node pub/sub channel naming.

use fleetban_core::Snowflake;

/// Channel prefix nodes subscribe under unless configured otherwise
pub const DEFAULT_NODE_CHANNEL_PREFIX: &str = "node:";

/// Maps node ids to channel names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeChannels {
    prefix: String,
}

impl NodeChannels {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Channel a node listens on
    #[must_use]
    pub fn name(&self, node_id: Snowflake) -> String {
        format!("{}{node_id}", self.prefix)
    }
}

impl Default for NodeChannels {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_CHANNEL_PREFIX)
    }
}
