//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__, plus TOKEN and DATABASE_URL)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cheapo_bot::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Commands use the {} prefix", settings.discord.command_prefix);
//! ```

mod settings;

pub use settings::*;
