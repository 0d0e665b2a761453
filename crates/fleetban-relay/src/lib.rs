//! # fleetban-relay
//!
//! Fire-and-forget fan-out of ban-created notices.
//!
//! - **Queue**: bounded hand-off from the write path; never blocks the caller
//! - **Worker**: consumes notices and runs one dispatch per notice, bounded
//! - **Dispatcher**: bot export and fleet relay as independent failure domains
//! - **Fleet**: Redis pub/sub publisher, one channel per node
//! - **Bot**: HTTP export to the external chat-bot
//!
//! ```ignore
//! let (queue, receiver) = RelayQueue::bounded(config.queue_capacity);
//! let dispatcher = NotificationDispatcher::new(bot, fleet, nodes, DeliveryPolicy::from(&config));
//! let worker = RelayWorker::new(receiver, Arc::new(dispatcher), config.max_concurrent_jobs).spawn();
//!
//! queue.enqueue(notice);
//! ```

pub mod bot;
pub mod dispatcher;
pub mod error;
pub mod fleet;
pub mod policy;
pub mod pool;
pub mod queue;
pub mod report;
pub mod worker;

pub use bot::{DisabledBotChannel, HttpBotChannel};
pub use dispatcher::NotificationDispatcher;
pub use error::RelaySetupError;
pub use fleet::{NodeChannels, RedisFleetRelay, DEFAULT_NODE_CHANNEL_PREFIX};
pub use policy::DeliveryPolicy;
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use queue::RelayQueue;
pub use report::{DeliveryOutcome, DeliveryStatus, DeliveryTarget, DispatchReport};
pub use worker::RelayWorker;
