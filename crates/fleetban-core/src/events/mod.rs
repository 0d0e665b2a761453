//! Relay notices and the payloads built from them

mod notice;
mod payloads;

pub use notice::BanCreatedNotice;
pub use payloads::{
    minutes_since_reference_epoch, BanAddedEvent, BanExport, BotExport, FleetEvent,
    REFERENCE_EPOCH_SECS,
};
