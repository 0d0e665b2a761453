//! Fleet relay over Redis pub/sub

mod channels;
mod publisher;

pub use channels::{NodeChannels, DEFAULT_NODE_CHANNEL_PREFIX};
pub use publisher::RedisFleetRelay;
