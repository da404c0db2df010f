//! # Domain Layer
//!
//! The domain layer contains the core business logic of the coin economy.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Balance, GamblingRecord)
//! - **value_objects**: Immutable value types (PayoutRule, PayoutTable)
//! - **services**: Domain services for ledger mutations
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Services validate before any state is touched

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
