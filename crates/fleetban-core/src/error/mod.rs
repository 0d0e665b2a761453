//! Domain and relay error types

mod domain_error;
mod relay_error;

pub use domain_error::DomainError;
pub use relay_error::{RelayDeliveryError, RelayResult};
