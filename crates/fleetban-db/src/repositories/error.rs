//! Error handling utilities for repositories

use fleetban_core::error::DomainError;
use fleetban_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for a foreign key violation and return the given error, or fall back
pub fn map_fk_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "ban not found" error
pub fn ban_not_found(id: Snowflake) -> DomainError {
    DomainError::BanNotFound(id)
}

/// Create a "ban detail not found" error
pub fn detail_not_found(id: Snowflake) -> DomainError {
    DomainError::BanDetailNotFound(id)
}

/// Raw ids for an `= ANY($1)` bind
pub fn snowflake_ids(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}
