//! Entity to model mappers
//!
//! - `From<Model> for Entity` where every row is a valid entity
//! - `TryFrom<Model>` where the row carries identity data that is re-validated
//! - `*Columns` structs: entity data prepared for binding

mod ban;
mod detail;
mod lookup;

pub use ban::BanColumns;
pub use detail::DetailColumns;
