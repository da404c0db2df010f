//! Gambling Use Case
//!
//! Plays a gambling variant and lists past plays.

use std::sync::Arc;

use crate::application::dto::{CommandReply, PlayCommand};
use crate::domain::services::{GamblingService, LedgerError};
use crate::domain::{GameOutcome, PayoutTable};
use crate::infrastructure::metrics;

pub struct GamblingUseCase {
    gambling_service: Arc<GamblingService>,
    history_size: i64,
}

impl GamblingUseCase {
    pub fn new(gambling_service: Arc<GamblingService>, history_size: i64) -> Self {
        Self {
            gambling_service,
            history_size,
        }
    }

    /// Playable variants and their odds.
    pub fn payouts(&self) -> &PayoutTable {
        self.gambling_service.payouts()
    }

    /// Comma-separated list of playable variants.
    pub fn variant_list(&self) -> String {
        self.payouts()
            .names()
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub async fn play(&self, command: PlayCommand) -> CommandReply {
        let result = self
            .gambling_service
            .play(command.user_id, command.wager, &command.variant)
            .await;

        match result {
            Ok(result) => {
                let record = &result.record;
                metrics::record_gambling_play(&record.variant, record.outcome.as_str());

                if result.won() {
                    CommandReply::success(format!(
                        "🎉 You won **{}** coins on {}! Balance: **{}** coins.",
                        record.delta, record.variant, result.balance.amount
                    ))
                } else {
                    CommandReply::success(format!(
                        "😢 You lost **{}** coins on {}. Balance: **{}** coins.",
                        record.wager, record.variant, result.balance.amount
                    ))
                }
            }
            Err(LedgerError::UnknownVariant(name)) => CommandReply::failure(format!(
                "❌ Unknown game `{}`. Available games: {}.",
                name,
                self.variant_list()
            )),
            Err(e) => CommandReply::from_ledger_error(&e),
        }
    }

    /// Reply with the caller's most recent plays.
    pub async fn history(&self, user_id: i64) -> CommandReply {
        let records = match self.gambling_service.history(user_id, self.history_size).await {
            Ok(records) => records,
            Err(e) => return CommandReply::from_ledger_error(&e),
        };

        if records.is_empty() {
            return CommandReply::success("📜 You haven't played any games yet.");
        }

        let lines: Vec<String> = records
            .iter()
            .map(|r| {
                let sign = match r.outcome {
                    GameOutcome::Win => "+",
                    GameOutcome::Loss => "",
                };
                format!(
                    "`{}` {} wagered **{}** → {}{} (balance {})",
                    r.created_at.format("%Y-%m-%d %H:%M"),
                    r.variant,
                    r.wager,
                    sign,
                    r.delta,
                    r.balance_after
                )
            })
            .collect();

        CommandReply::success(format!("📜 **Recent games**\n{}", lines.join("\n")))
    }
}
