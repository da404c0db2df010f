//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - Chat commands by name and reply status
//! - Command handling latency histograms
//! - Reward grants and coins granted
//! - Coins moved by transfers
//! - Gambling plays by variant and outcome

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Command counter - tracks handled commands by name and reply status
pub static COMMANDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("commands_total", "Total number of chat commands handled").namespace("cheapo_bot"),
        &["command", "status"],
    )
    .expect("Failed to create COMMANDS_TOTAL metric")
});

/// Command latency histogram - time from parse to reply, in seconds
pub static COMMAND_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];
    HistogramVec::new(
        HistogramOpts::new("command_duration_seconds", "Chat command latency in seconds")
            .namespace("cheapo_bot")
            .buckets(buckets),
        &["command"],
    )
    .expect("Failed to create COMMAND_DURATION_SECONDS metric")
});

/// Reward grants triggered by message milestones
pub static REWARDS_GRANTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("rewards_granted_total", "Total number of message rewards granted")
            .namespace("cheapo_bot"),
    )
    .expect("Failed to create REWARDS_GRANTED_TOTAL metric")
});

/// Coins paid out by message rewards
pub static COINS_REWARDED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("coins_rewarded_total", "Total coins paid out as message rewards")
            .namespace("cheapo_bot"),
    )
    .expect("Failed to create COINS_REWARDED_TOTAL metric")
});

/// Coins moved by successful transfers
pub static COINS_TRANSFERRED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("coins_transferred_total", "Total coins moved between users")
            .namespace("cheapo_bot"),
    )
    .expect("Failed to create COINS_TRANSFERRED_TOTAL metric")
});

/// Gambling plays by variant and outcome
pub static GAMBLING_PLAYS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gambling_plays_total", "Total number of settled gambling plays")
            .namespace("cheapo_bot"),
        &["variant", "outcome"],
    )
    .expect("Failed to create GAMBLING_PLAYS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(COMMANDS_TOTAL.clone()))
        .expect("Failed to register COMMANDS_TOTAL");
    registry
        .register(Box::new(COMMAND_DURATION_SECONDS.clone()))
        .expect("Failed to register COMMAND_DURATION_SECONDS");
    registry
        .register(Box::new(REWARDS_GRANTED_TOTAL.clone()))
        .expect("Failed to register REWARDS_GRANTED_TOTAL");
    registry
        .register(Box::new(COINS_REWARDED_TOTAL.clone()))
        .expect("Failed to register COINS_REWARDED_TOTAL");
    registry
        .register(Box::new(COINS_TRANSFERRED_TOTAL.clone()))
        .expect("Failed to register COINS_TRANSFERRED_TOTAL");
    registry
        .register(Box::new(GAMBLING_PLAYS_TOTAL.clone()))
        .expect("Failed to register GAMBLING_PLAYS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record a handled command
pub fn record_command(command: &str, status: &str, duration_secs: f64) {
    COMMANDS_TOTAL.with_label_values(&[command, status]).inc();
    COMMAND_DURATION_SECONDS
        .with_label_values(&[command])
        .observe(duration_secs);
}

/// Helper to record a reward grant of `amount` coins
pub fn record_reward(amount: i64) {
    REWARDS_GRANTED_TOTAL.inc();
    COINS_REWARDED_TOTAL.inc_by(u64::try_from(amount).unwrap_or(0));
}

/// Helper to record a completed transfer
pub fn record_transfer(amount: i64) {
    COINS_TRANSFERRED_TOTAL.inc_by(u64::try_from(amount).unwrap_or(0));
}

/// Helper to record a settled gambling play
pub fn record_gambling_play(variant: &str, outcome: &str) {
    GAMBLING_PLAYS_TOTAL
        .with_label_values(&[variant, outcome])
        .inc();
}
