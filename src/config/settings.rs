//! Application settings and configuration structures.

use std::collections::BTreeMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Discord connection settings (token, command prefix)
    pub discord: DiscordSettings,

    /// Datastore configuration
    pub database: DatabaseSettings,

    /// Reward and listing parameters
    pub economy: EconomySettings,

    /// Gambling payout table
    pub gambling: GamblingSettings,

    /// Rotating presence statuses
    pub presence: PresenceSettings,

    /// Health and metrics HTTP surface
    pub ops: OpsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Discord bot configuration.
#[derive(Clone, Deserialize)]
pub struct DiscordSettings {
    /// Bot token used to authenticate against the gateway
    #[serde(default)]
    pub token: String,

    /// Prefix that marks a message as a command (e.g. "c!")
    pub command_prefix: String,
}

// The token must never end up in logs.
impl std::fmt::Debug for DiscordSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordSettings")
            .field("token", &"<redacted>")
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}

/// Which repository implementation backs the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// PostgreSQL through sqlx
    Postgres,
    /// Process-local store, state is lost on restart
    Memory,
}

impl std::fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Repository backend
    pub backend: DatabaseBackend,

    /// Database connection URL (required for the postgres backend)
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

/// Economy parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct EconomySettings {
    /// Coins credited per reward grant
    pub reward_amount: i64,

    /// Number of messages between two reward grants
    pub reward_interval: i64,

    /// Entries shown by the leaderboard command
    pub leaderboard_size: i64,

    /// Plays shown by the history command
    pub history_size: i64,
}

/// Payout rule for one gambling variant.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PayoutRuleSettings {
    /// Probability in [0, 1] that a play wins
    pub win_probability: f64,

    /// Total return on a win, stake included (2 = double or nothing)
    pub payout_multiplier: u32,
}

/// Gambling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GamblingSettings {
    /// Variant name -> payout rule
    pub variants: BTreeMap<String, PayoutRuleSettings>,
}

/// Presence rotation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceSettings {
    /// Statuses cycled in order
    pub statuses: Vec<String>,

    /// Seconds between two status changes
    pub interval_secs: u64,
}

/// Ops HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OpsSettings {
    /// Serve /health and /metrics
    pub enabled: bool,

    /// Host address to bind to
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml
    /// 3. config/{RUN_ENV}.toml
    /// 4. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if it fails validation (missing token, bad payout rules).
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let token = std::env::var("DISCORD_TOKEN")
            .or_else(|_| std::env::var("TOKEN"))
            .ok();

        Self::defaults(Config::builder(), &environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__ECONOMY__REWARD_AMOUNT=25 -> economy.reward_amount = 25
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("discord.token", token)?
            .set_override_option("discord.command_prefix", std::env::var("COMMAND_PREFIX").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.validate()?;
                Ok(settings)
            })
    }

    /// Built-in defaults, applied before any file or environment source.
    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("environment", environment)?
            .set_default("discord.command_prefix", "c!")?
            .set_default("database.backend", "postgres")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("economy.reward_amount", 10)?
            .set_default("economy.reward_interval", 10)?
            .set_default("economy.leaderboard_size", 10)?
            .set_default("economy.history_size", 5)?
            .set_default("gambling.variants.coinflip.win_probability", 0.5)?
            .set_default("gambling.variants.coinflip.payout_multiplier", 2)?
            .set_default("gambling.variants.dice.win_probability", 1.0 / 6.0)?
            .set_default("gambling.variants.dice.payout_multiplier", 6)?
            .set_default("gambling.variants.slots.win_probability", 0.1)?
            .set_default("gambling.variants.slots.payout_multiplier", 8)?
            .set_default(
                "presence.statuses",
                vec!["Use c!help 🎲", "You're up 🃏", "How about a game? 🎲"],
            )?
            .set_default("presence.interval_secs", 5)?
            .set_default("ops.enabled", true)?
            .set_default("ops.host", "0.0.0.0")?
            .set_default("ops.port", 9090)
    }

    /// Reject configurations the bot cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discord.token.trim().is_empty() {
            return Err(ConfigError::Message(
                "Discord token is missing: set TOKEN or DISCORD_TOKEN".into(),
            ));
        }

        if self.discord.command_prefix.is_empty() {
            return Err(ConfigError::Message("Command prefix must not be empty".into()));
        }

        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_none() {
            return Err(ConfigError::Message(
                "DATABASE_URL is required for the postgres backend".into(),
            ));
        }

        if self.economy.reward_amount <= 0 || self.economy.reward_interval <= 0 {
            return Err(ConfigError::Message(format!(
                "Reward amount and interval must be positive (got {} every {} messages)",
                self.economy.reward_amount, self.economy.reward_interval
            )));
        }

        if self.gambling.variants.is_empty() {
            return Err(ConfigError::Message("At least one gambling variant is required".into()));
        }

        for (name, rule) in &self.gambling.variants {
            if !(0.0..=1.0).contains(&rule.win_probability) {
                return Err(ConfigError::Message(format!(
                    "Variant '{}' has win probability {} outside [0, 1]",
                    name, rule.win_probability
                )));
            }
            if rule.payout_multiplier < 1 {
                return Err(ConfigError::Message(format!(
                    "Variant '{}' must pay out at least the stake",
                    name
                )));
            }
        }

        if self.presence.interval_secs == 0 {
            return Err(ConfigError::Message("Presence interval must be at least one second".into()));
        }

        Ok(())
    }
}

impl OpsSettings {
    /// Get the address string for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
