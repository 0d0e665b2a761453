//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Ban not found: {0}")]
    BanNotFound(Snowflake),

    #[error("Ban detail not found: {0}")]
    BanDetailNotFound(Snowflake),

    #[error("Node not found: {0}")]
    NodeNotFound(Snowflake),

    #[error("Game admin not found: {0}")]
    AdminNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("At least one of handle, hardware id or network address is required")]
    EmptyIdentity,

    #[error("Invalid network address: {0}")]
    InvalidNetworkAddress(String),

    #[error("Reason must not be empty")]
    EmptyReason,

    #[error("Reason too long: max {max} characters")]
    ReasonTooLong { max: usize },

    #[error("Duration must not be negative")]
    NegativeDuration,

    #[error("Expiry must be in the future")]
    ExpiryInPast,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::BanNotFound(_) => "UNKNOWN_BAN",
            Self::BanDetailNotFound(_) => "UNKNOWN_BAN_DETAIL",
            Self::NodeNotFound(_) => "UNKNOWN_NODE",
            Self::AdminNotFound(_) => "UNKNOWN_ADMIN",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyIdentity => "EMPTY_IDENTITY",
            Self::InvalidNetworkAddress(_) => "INVALID_NETWORK_ADDRESS",
            Self::EmptyReason => "EMPTY_REASON",
            Self::ReasonTooLong { .. } => "REASON_TOO_LONG",
            Self::NegativeDuration => "NEGATIVE_DURATION",
            Self::ExpiryInPast => "EXPIRY_IN_PAST",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BanNotFound(_)
                | Self::BanDetailNotFound(_)
                | Self::NodeNotFound(_)
                | Self::AdminNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyIdentity
                | Self::InvalidNetworkAddress(_)
                | Self::EmptyReason
                | Self::ReasonTooLong { .. }
                | Self::NegativeDuration
                | Self::ExpiryInPast
        )
    }

    /// Field the error refers to, for field-level error messages
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyIdentity => Some("identity"),
            Self::InvalidNetworkAddress(_) => Some("network_address"),
            Self::EmptyReason | Self::ReasonTooLong { .. } => Some("reason"),
            Self::NegativeDuration => Some("duration"),
            Self::ExpiryInPast => Some("expires_at"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::BanNotFound(Snowflake::new(1)).code(), "UNKNOWN_BAN");
        assert_eq!(DomainError::EmptyIdentity.code(), "EMPTY_IDENTITY");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::BanDetailNotFound(Snowflake::new(1)).is_not_found());
        assert!(!DomainError::BanDetailNotFound(Snowflake::new(1)).is_validation());
        assert!(DomainError::EmptyIdentity.is_validation());
        assert!(DomainError::ReasonTooLong { max: 10 }.is_validation());
        assert!(!DomainError::DatabaseError("x".into()).is_validation());
        assert!(!DomainError::DatabaseError("x".into()).is_not_found());
    }

    #[test]
    fn test_field() {
        assert_eq!(DomainError::ExpiryInPast.field(), Some("expires_at"));
        assert_eq!(DomainError::BanNotFound(Snowflake::new(1)).field(), None);
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::BanNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Ban not found: 123");
    }
}
