//! # Cheapo Bot Library
//!
//! A Discord economy bot with:
//! - Per-user coin balances and peer-to-peer transfers
//! - Gambling mini-games with configurable payout rules
//! - A coin reward every ten messages
//! - PostgreSQL persistence, or an in-memory store for development
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Ledger entities, repository traits and services
//! - **Application Layer**: Use cases mapping results to chat replies
//! - **Infrastructure Layer**: Postgres repositories, in-memory store, metrics
//! - **Presentation Layer**: Command parsing, Discord events, ops HTTP routes
//!
//! ## Module Structure
//!
//! ```text
//! cheapo_bot/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, services and traits
//! +-- application/    Use cases and DTOs
//! +-- infrastructure/ Database, memory store and metrics
//! +-- presentation/   Commands, events, Discord adapter, health routes
//! +-- shared/         Common error type
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Use cases
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - Discord and HTTP adapters
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and wiring
pub mod startup;

// Telemetry and observability
pub mod telemetry;
