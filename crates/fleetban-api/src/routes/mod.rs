//! Route definitions

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{bans, health};
use crate::state::AppState;

/// Admin API, mounted under /api/v1/admin
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1/admin", admin_routes())
}

/// Unauthenticated probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/bans", get(bans::list_active_bans).post(bans::create_ban))
        .route("/bans/removed", get(bans::list_removed_bans))
        .route("/bans/bulk-delete", post(bans::remove_bans_bulk))
        .route(
            "/bans/:ban_id",
            get(bans::get_ban)
                .patch(bans::update_ban)
                .delete(bans::remove_ban),
        )
        .route(
            "/bans/:ban_id/details",
            get(bans::list_ban_details).post(bans::add_ban_detail),
        )
        .route("/ban-details/:detail_id", delete(bans::remove_ban_detail))
}
