//! Balance Use Case
//!
//! Shows a user's balance and the leaderboard.

use std::sync::Arc;

use crate::application::dto::{mention, CommandReply};
use crate::domain::services::BalanceService;

pub struct BalanceUseCase {
    balance_service: Arc<BalanceService>,
    leaderboard_size: i64,
}

impl BalanceUseCase {
    pub fn new(balance_service: Arc<BalanceService>, leaderboard_size: i64) -> Self {
        Self {
            balance_service,
            leaderboard_size,
        }
    }

    /// Reply with the caller's balance, creating it on first use.
    pub async fn show_balance(&self, user_id: i64) -> CommandReply {
        match self.balance_service.get_or_create_balance(user_id).await {
            Ok(balance) => CommandReply::success(format!(
                "💰 {} has **{}** coins.",
                mention(user_id),
                balance.amount
            )),
            Err(e) => CommandReply::from_ledger_error(&e),
        }
    }

    /// Reply with the richest users.
    pub async fn leaderboard(&self) -> CommandReply {
        let balances = match self.balance_service.leaderboard(self.leaderboard_size).await {
            Ok(balances) => balances,
            Err(e) => return CommandReply::from_ledger_error(&e),
        };

        if balances.is_empty() {
            return CommandReply::success("🏆 Nobody has any coins yet.");
        }

        let lines: Vec<String> = balances
            .iter()
            .enumerate()
            .map(|(rank, b)| format!("{}. {}: **{}** coins", rank + 1, mention(b.user_id), b.amount))
            .collect();

        CommandReply::success(format!("🏆 **Leaderboard**\n{}", lines.join("\n")))
    }
}
