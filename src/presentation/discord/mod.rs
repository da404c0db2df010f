//! Discord Adapter
//!
//! serenity client wiring: gateway intents, the event handler, and the
//! presence rotation.

pub mod handler;
pub mod presence;

use std::sync::atomic::{AtomicBool, Ordering};

use serenity::all::GatewayIntents;

pub use handler::DiscordHandler;
pub use presence::{PresenceSink, StatusRotator};

/// Intents the bot needs to read prefixed commands in guilds and DMs.
pub fn gateway_intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Whether the gateway has reported `ready`, shared with the health checks.
#[derive(Debug, Default)]
pub struct GatewayState {
    connected: AtomicBool,
}

impl GatewayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}
