//! Data transfer objects for API requests and responses

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddDetailRequest, BulkRemoveBansRequest, CreateBanRequest, IdentityInput, PageQuery,
    UpdateBanRequest,
};

pub use responses::{
    AdminResponse, ApiResponse, BanOverviewResponse, BanResponse, BanViewResponse,
    BanWithDetailResponse, BulkRemoveResponse, DetailResponse, HealthChecks, HealthResponse,
    NodeResponse, PageMeta, PageResponse, ReadinessResponse,
};
