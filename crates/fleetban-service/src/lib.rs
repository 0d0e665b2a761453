//! # fleetban-service
//!
//! Application layer: the ban lifecycle, request/response DTOs and the
//! dependency container shared by the HTTP handlers.

pub mod dto;
pub mod services;

pub use services::{BanService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
