//! Relay delivery errors
//!
//! Never leave the relay: every value of this type is caught at the dispatch
//! boundary, logged, and dropped.

use std::time::Duration;

use thiserror::Error;

/// Failure to deliver a notification to one target
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayDeliveryError {
    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("no subscriber on {0}")]
    Unreachable(String),

    #[error("target responded with status {0}")]
    Rejected(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not encode payload: {0}")]
    Encoding(String),

    #[error("could not resolve targets: {0}")]
    TargetLookup(String),
}

impl RelayDeliveryError {
    /// Whether another attempt could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Unreachable(_) | Self::Transport(_) => true,
            Self::Rejected(status) => *status >= 500 || *status == 429,
            Self::Encoding(_) | Self::TargetLookup(_) => false,
        }
    }
}

impl From<serde_json::Error> for RelayDeliveryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Result of one delivery attempt
pub type RelayResult<T = ()> = Result<T, RelayDeliveryError>;
