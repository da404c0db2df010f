//! Message Reward Handler
//!
//! Counts every non-bot message and pays a reward on each milestone.

use std::sync::Arc;

use crate::domain::services::{BalanceService, LedgerError};
use crate::infrastructure::metrics;

/// Platform-neutral view of an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub author_id: i64,
    pub author_is_bot: bool,
    pub content: String,
}

/// A reward paid for a message milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardGrant {
    pub user_id: i64,
    pub message_count: i64,
    pub amount: i64,
    pub balance: i64,
}

pub struct RewardEventHandler {
    balance_service: Arc<BalanceService>,
}

impl RewardEventHandler {
    pub fn new(balance_service: Arc<BalanceService>) -> Self {
        Self { balance_service }
    }

    /// Count the message. Returns the grant when this message hit a milestone.
    pub async fn on_message(&self, message: &IncomingMessage) -> Result<Option<RewardGrant>, LedgerError> {
        if message.author_is_bot {
            return Ok(None);
        }

        let activity = self.balance_service.register_message(message.author_id).await?;

        let Some(balance) = activity.reward else {
            return Ok(None);
        };

        let amount = self.balance_service.policy().amount;
        metrics::record_reward(amount);

        Ok(Some(RewardGrant {
            user_id: message.author_id,
            message_count: activity.user.message_count,
            amount,
            balance: balance.amount,
        }))
    }
}
