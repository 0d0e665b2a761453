//! Path parameter extractors
//!
//! Snowflake ids arrive as decimal strings in the path.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use fleetban_core::Snowflake;

use crate::response::ApiError;

/// `:ban_id`
#[derive(Debug, Clone, Copy)]
pub struct BanIdPath(pub Snowflake);

/// `:detail_id`
#[derive(Debug, Clone, Copy)]
pub struct DetailIdPath(pub Snowflake);

async fn snowflake_param<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
    name: &str,
) -> Result<Snowflake, ApiError> {
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::invalid_path(e.body_text()))?;

    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

#[async_trait]
impl<S> FromRequestParts<S> for BanIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        snowflake_param(parts, state, "ban_id").await.map(Self)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DetailIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        snowflake_param(parts, state, "detail_id").await.map(Self)
    }
}
