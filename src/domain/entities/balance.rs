//! Balance entity and repository trait.
//!
//! Maps to the `balances` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A user's coin balance.
///
/// Maps to the `balances` table:
/// - user_id: BIGINT PRIMARY KEY REFERENCES users(id)
/// - amount: BIGINT NOT NULL DEFAULT 0 CHECK (amount >= 0)
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Owner of the balance
    pub user_id: i64,

    /// Coins held, never negative
    pub amount: i64,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Balance {
    /// An empty balance for a user seen for the first time.
    pub fn empty(user_id: i64) -> Self {
        Self {
            user_id,
            amount: 0,
            updated_at: Utc::now(),
        }
    }

    /// Whether `amount` coins can be taken from this balance.
    pub fn covers(&self, amount: i64) -> bool {
        self.amount >= amount
    }
}

/// Both sides of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Sender balance after the debit
    pub sender: Balance,

    /// Recipient balance after the credit
    pub recipient: Balance,

    /// Coins moved
    pub amount: i64,
}

/// Repository trait for Balance data access operations.
///
/// Every mutating method is atomic with respect to the rows it touches and
/// never produces a negative amount.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalanceRepository: Send + Sync {
    /// Return the balance, creating the user and an empty balance if absent.
    async fn get_or_create(&self, user_id: i64) -> Result<Balance, AppError>;

    /// Add `amount` coins, creating the balance if absent.
    async fn credit(&self, user_id: i64, amount: i64) -> Result<Balance, AppError>;

    /// Move `amount` coins from sender to recipient as one unit. Returns `None`
    /// without changing either balance when the sender cannot cover it.
    async fn transfer(
        &self,
        sender_id: i64,
        recipient_id: i64,
        amount: i64,
    ) -> Result<Option<TransferReceipt>, AppError>;

    /// Richest balances first, ties broken by user id.
    async fn top(&self, limit: i64) -> Result<Vec<Balance>, AppError>;
}
