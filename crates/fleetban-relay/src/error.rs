//! Relay construction errors
//!
//! Delivery failures use `fleetban_core::RelayDeliveryError`; this type only
//! covers wiring the relay up at startup.

use crate::pool::RedisPoolError;

#[derive(Debug, thiserror::Error)]
pub enum RelaySetupError {
    #[error("Invalid bot export URL {url}: {reason}")]
    InvalidBotUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Redis(#[from] RedisPoolError),
}
