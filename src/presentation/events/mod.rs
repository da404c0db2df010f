//! Chat Events
//!
//! Handlers for events that are not commands.

pub mod rewards;

pub use rewards::{IncomingMessage, RewardEventHandler, RewardGrant};
