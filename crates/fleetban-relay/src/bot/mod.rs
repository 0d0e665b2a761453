//! External chat-bot channel

mod http;

pub use http::HttpBotChannel;

use async_trait::async_trait;
use fleetban_core::{BotChannel, BotExport, RelayResult};

/// Stand-in used when no bot endpoint is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledBotChannel;

#[async_trait]
impl BotChannel for DisabledBotChannel {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn export(&self, _payload: &BotExport) -> RelayResult {
        Ok(())
    }
}
