//! Transfer Coins Use Case
//!
//! Pays coins from one user to another.

use std::sync::Arc;

use crate::application::dto::{mention, CommandReply, TransferCoinsCommand};
use crate::domain::services::PaymentService;
use crate::infrastructure::metrics;

pub struct TransferCoinsUseCase {
    payment_service: Arc<PaymentService>,
}

impl TransferCoinsUseCase {
    pub fn new(payment_service: Arc<PaymentService>) -> Self {
        Self { payment_service }
    }

    pub async fn execute(&self, command: TransferCoinsCommand) -> CommandReply {
        let result = self
            .payment_service
            .transfer(command.sender_id, command.recipient_id, command.amount)
            .await;

        match result {
            Ok(receipt) => {
                metrics::record_transfer(receipt.amount);
                CommandReply::success(format!(
                    "💸 {} sent **{}** coins to {}. Your balance is now **{}** coins.",
                    mention(command.sender_id),
                    receipt.amount,
                    mention(command.recipient_id),
                    receipt.sender.amount
                ))
            }
            Err(e) => CommandReply::from_ledger_error(&e),
        }
    }
}
