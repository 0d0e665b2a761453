//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, paths, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{authorize, AdminUser};
pub use pagination::Pagination;
pub use path::{BanIdPath, DetailIdPath};
pub use validated::ValidatedJson;
