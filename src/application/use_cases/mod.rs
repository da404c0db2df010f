//! Use Cases
//!
//! One use case per user-facing action. Each calls its domain service and
//! turns the outcome into a `CommandReply`.

pub mod balance;
pub mod gambling;
pub mod transfer_coins;

pub use balance::BalanceUseCase;
pub use gambling::GamblingUseCase;
pub use transfer_coins::TransferCoinsUseCase;
