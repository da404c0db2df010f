//! # Domain Services
//!
//! Domain services encapsulate the ledger rules. They validate every request
//! before touching storage and delegate atomic mutations to the repositories.
//!
//! ## Services
//!
//! - **BalanceService**: Balance reads, reward grants, message counter
//! - **PaymentService**: Peer-to-peer transfers
//! - **GamblingService**: Wagers against the payout table

mod balance_service;
mod gambling_service;
mod ledger_error;
mod payment_service;

pub use balance_service::{BalanceService, RewardPolicy};
pub use gambling_service::{GamblingResult, GamblingService, OutcomeRoller, ThreadRngRoller};
pub use ledger_error::LedgerError;
pub use payment_service::PaymentService;
