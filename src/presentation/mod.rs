//! Presentation Layer
//!
//! Chat commands, message events, the Discord adapter, and the ops HTTP routes.

pub mod commands;
pub mod discord;
pub mod events;
pub mod http;
