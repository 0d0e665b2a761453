//! # fleetban-core
//!
//! Domain layer containing ban entities, value objects, relay payloads and the
//! repository and channel traits. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Ban, BanDetail, BanFilter, BanOverview, BanState, BanTerms, BanView, GameAdmin, Identity,
    Node, MAX_REASON_LENGTH,
};
pub use error::{DomainError, RelayDeliveryError, RelayResult};
pub use events::{BanAddedEvent, BanCreatedNotice, BanExport, BotExport, FleetEvent};
pub use traits::{
    AdminRepository, BanDetailRepository, BanRepository, BotChannel, FleetRelay, NodeRepository,
    RepoResult,
};
pub use value_objects::{
    Capabilities, Page, PageRequest, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
