//! Authentication extractor
//!
//! Verifies the bearer token and requires ban-management capability.
//! Writes additionally need the linked game-admin profile, which becomes
//! the issuer of the change.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use fleetban_common::{AppError, JwtService};
use fleetban_core::{Capabilities, Snowflake};
use fleetban_service::ServiceError;

use crate::response::ApiError;
use crate::state::AppState;

/// Panel operator allowed to manage bans
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: Snowflake,
    pub game_admin_id: Option<Snowflake>,
    pub capabilities: Capabilities,
}

impl AdminUser {
    /// Game-admin profile recorded as issuer or remover
    pub fn issuer_id(&self) -> Result<Snowflake, ApiError> {
        self.game_admin_id.ok_or_else(|| {
            tracing::debug!(user_id = %self.user_id, "Write attempted without game-admin profile");
            ServiceError::permission_denied("GAME_ADMIN_PROFILE").into()
        })
    }
}

/// Verify a raw bearer token
pub fn authorize(jwt: &JwtService, token: &str) -> Result<AdminUser, ApiError> {
    let claims = jwt.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Invalid access token");
        ApiError::App(e)
    })?;

    let user_id = claims.user_id()?;

    if !claims.capabilities.can_manage_bans() {
        tracing::warn!(user_id = %user_id, "Operator lacks ban capability");
        return Err(AppError::InsufficientPermissions.into());
    }

    Ok(AdminUser {
        user_id,
        game_admin_id: claims.game_admin_id,
        capabilities: claims.capabilities,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        ApiError::MissingAuth
                    } else {
                        ApiError::InvalidAuthFormat
                    }
                })?;

        let app_state = AppState::from_ref(state);
        authorize(app_state.jwt_service(), bearer.token())
    }
}
