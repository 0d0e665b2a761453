//! Route handlers

pub mod bans;
pub mod health;
