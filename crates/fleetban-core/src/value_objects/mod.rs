//! Value objects - immutable types that represent domain concepts

mod capabilities;
pub mod human_duration;
mod pagination;
mod snowflake;

pub use capabilities::Capabilities;
pub use human_duration::{humanize, PERMANENT};
pub use pagination::{Page, PageRequest, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
