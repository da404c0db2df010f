//! Peer-to-peer coin transfers.

use std::sync::Arc;

use crate::domain::entities::{BalanceRepository, TransferReceipt};

use super::LedgerError;

/// Domain service that validates and executes transfers.
pub struct PaymentService {
    balance_repo: Arc<dyn BalanceRepository>,
}

impl PaymentService {
    pub fn new(balance_repo: Arc<dyn BalanceRepository>) -> Self {
        Self { balance_repo }
    }

    /// Move `amount` coins from sender to recipient.
    ///
    /// Nothing is written unless every check passes. The debit and credit are
    /// applied together by the repository, which re-checks the sender's funds
    /// under lock so a concurrent spend cannot overdraw the balance.
    pub async fn transfer(
        &self,
        sender_id: i64,
        recipient_id: i64,
        amount: i64,
    ) -> Result<TransferReceipt, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        if sender_id == recipient_id {
            return Err(LedgerError::SelfTransfer);
        }

        let sender = self
            .balance_repo
            .get_or_create(sender_id)
            .await
            .map_err(LedgerError::for_user(sender_id))?;

        if !sender.covers(amount) {
            return Err(LedgerError::InsufficientFunds {
                available: sender.amount,
                required: amount,
            });
        }

        let receipt = self
            .balance_repo
            .transfer(sender_id, recipient_id, amount)
            .await
            .map_err(LedgerError::for_user(sender_id))?
            .ok_or(LedgerError::InsufficientFunds {
                available: sender.amount,
                required: amount,
            })?;

        tracing::info!(
            sender_id,
            recipient_id,
            amount,
            sender_balance = receipt.sender.amount,
            recipient_balance = receipt.recipient.amount,
            "Coins transferred"
        );

        Ok(receipt)
    }
}
