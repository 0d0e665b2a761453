//! Ban handlers
//!
//! Endpoints for the ban lifecycle under /api/v1/admin. Reads need the ban
//! capability; writes also need a game-admin profile.

use axum::{extract::State, Json};
use fleetban_service::dto::{
    AddDetailRequest, ApiResponse, BanOverviewResponse, BanViewResponse, BanWithDetailResponse,
    BulkRemoveBansRequest, BulkRemoveResponse, CreateBanRequest, DetailResponse, PageResponse,
    UpdateBanRequest,
};
use fleetban_service::BanService;

use crate::extractors::{AdminUser, BanIdPath, DetailIdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List bans in force
///
/// GET /bans
pub async fn list_active_bans(
    State(state): State<AppState>,
    _admin: AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<PageResponse<BanOverviewResponse>>> {
    let service = BanService::new(state.service_context());
    Ok(Json(service.list_active(page).await?))
}

/// List removed or expired bans
///
/// GET /bans/removed
pub async fn list_removed_bans(
    State(state): State<AppState>,
    _admin: AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<PageResponse<BanOverviewResponse>>> {
    let service = BanService::new(state.service_context());
    Ok(Json(service.list_inactive(page).await?))
}

/// Create a ban
///
/// POST /bans
pub async fn create_ban(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateBanRequest>,
) -> ApiResult<Created<Json<ApiResponse<BanWithDetailResponse>>>> {
    let issuer_id = admin.issuer_id()?;

    let service = BanService::new(state.service_context());
    let response = service.create_ban(issuer_id, request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// Remove many bans
///
/// POST /bans/bulk-delete
pub async fn remove_bans_bulk(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<BulkRemoveBansRequest>,
) -> ApiResult<Json<ApiResponse<BulkRemoveResponse>>> {
    let issuer_id = admin.issuer_id()?;

    let service = BanService::new(state.service_context());
    let response = service.remove_bans_bulk(&request.ids, issuer_id).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Show one ban, removed ones included
///
/// GET /bans/{ban_id}
pub async fn get_ban(
    State(state): State<AppState>,
    _admin: AdminUser,
    BanIdPath(ban_id): BanIdPath,
) -> ApiResult<Json<ApiResponse<BanViewResponse>>> {
    let service = BanService::new(state.service_context());
    let response = service.show_ban(ban_id).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Update a live ban
///
/// PATCH /bans/{ban_id}
pub async fn update_ban(
    State(state): State<AppState>,
    admin: AdminUser,
    BanIdPath(ban_id): BanIdPath,
    ValidatedJson(request): ValidatedJson<UpdateBanRequest>,
) -> ApiResult<Json<ApiResponse<BanWithDetailResponse>>> {
    admin.issuer_id()?;

    let service = BanService::new(state.service_context());
    let response = service.update_ban(ban_id, request).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Remove a ban; repeating the call is a no-op
///
/// DELETE /bans/{ban_id}
pub async fn remove_ban(
    State(state): State<AppState>,
    admin: AdminUser,
    BanIdPath(ban_id): BanIdPath,
) -> ApiResult<NoContent> {
    let issuer_id = admin.issuer_id()?;

    let service = BanService::new(state.service_context());
    service.remove_ban(ban_id, issuer_id).await?;
    Ok(NoContent)
}

/// All details of a ban, removed ones included
///
/// GET /bans/{ban_id}/details
pub async fn list_ban_details(
    State(state): State<AppState>,
    _admin: AdminUser,
    BanIdPath(ban_id): BanIdPath,
) -> ApiResult<Json<ApiResponse<Vec<DetailResponse>>>> {
    let service = BanService::new(state.service_context());
    let response = service.list_details(ban_id).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Attach another identity to a ban
///
/// POST /bans/{ban_id}/details
pub async fn add_ban_detail(
    State(state): State<AppState>,
    admin: AdminUser,
    BanIdPath(ban_id): BanIdPath,
    ValidatedJson(request): ValidatedJson<AddDetailRequest>,
) -> ApiResult<Created<Json<ApiResponse<DetailResponse>>>> {
    admin.issuer_id()?;

    let service = BanService::new(state.service_context());
    let response = service.add_detail(ban_id, request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// Remove one detail
///
/// DELETE /ban-details/{detail_id}
pub async fn remove_ban_detail(
    State(state): State<AppState>,
    admin: AdminUser,
    DetailIdPath(detail_id): DetailIdPath,
) -> ApiResult<NoContent> {
    let issuer_id = admin.issuer_id()?;

    let service = BanService::new(state.service_context());
    service.remove_detail(detail_id, issuer_id).await?;
    Ok(NoContent)
}
