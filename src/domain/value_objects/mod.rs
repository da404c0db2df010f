//! # Value Objects
//!
//! Immutable value types used by the domain services.

mod payout;

pub use payout::{PayoutRule, PayoutTable};
