//! Errors raised by the ledger services.

use crate::shared::error::AppError;

/// Domain-level failure of a balance operation.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Insufficient funds: {available} available, {required} required")]
    InsufficientFunds { available: i64, required: i64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    #[error("Cannot transfer coins to yourself")]
    SelfTransfer,

    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Unknown game variant: {0}")]
    UnknownVariant(String),

    #[error("Datastore error: {0}")]
    Datastore(#[from] AppError),
}

impl LedgerError {
    /// Map a repository error, turning a missing row into `UserNotFound`.
    pub fn for_user(user_id: i64) -> impl FnOnce(AppError) -> LedgerError {
        move |e| {
            if e.is_not_found() {
                LedgerError::UserNotFound(user_id)
            } else {
                LedgerError::Datastore(e)
            }
        }
    }

    /// Whether the failure came from storage rather than from validation.
    pub fn is_datastore(&self) -> bool {
        matches!(self, LedgerError::Datastore(_))
    }
}
