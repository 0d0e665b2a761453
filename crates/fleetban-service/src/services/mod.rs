//! Business logic services

pub mod ban;
pub mod context;
pub mod error;

pub use ban::BanService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
