//! Command dispatch.

use std::sync::Arc;
use std::time::Instant;

use crate::application::dto::{CommandReply, PlayCommand, TransferCoinsCommand};
use crate::application::use_cases::{BalanceUseCase, GamblingUseCase, TransferCoinsUseCase};
use crate::infrastructure::metrics;

use super::help;
use super::parser::{Command, CommandParser};

/// Routes parsed commands to their use cases.
pub struct CommandRouter {
    parser: CommandParser,
    balance: Arc<BalanceUseCase>,
    transfer: Arc<TransferCoinsUseCase>,
    gambling: Arc<GamblingUseCase>,
}

impl CommandRouter {
    pub fn new(
        prefix: impl Into<String>,
        balance: Arc<BalanceUseCase>,
        transfer: Arc<TransferCoinsUseCase>,
        gambling: Arc<GamblingUseCase>,
    ) -> Self {
        let variants: Vec<String> = gambling.payouts().names().map(str::to_string).collect();
        Self {
            parser: CommandParser::new(prefix, variants),
            balance,
            transfer,
            gambling,
        }
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }

    /// Handle a message from `author_id`.
    ///
    /// Returns `None` when the message is not a command; otherwise exactly one
    /// reply, including for malformed input.
    pub async fn dispatch(&self, author_id: i64, content: &str) -> Option<CommandReply> {
        let parsed = self.parser.parse(content)?;
        let started = Instant::now();

        let (name, reply) = match parsed {
            Ok(command) => (command.name(), self.execute(author_id, command).await),
            Err(e) => ("invalid", CommandReply::failure(format!("❌ {}", e))),
        };

        metrics::record_command(name, reply.status.as_str(), started.elapsed().as_secs_f64());
        tracing::debug!(
            user_id = author_id,
            command = name,
            status = reply.status.as_str(),
            "Command handled"
        );

        Some(reply)
    }

    async fn execute(&self, author_id: i64, command: Command) -> CommandReply {
        match command {
            Command::Balance => self.balance.show_balance(author_id).await,
            Command::Pay {
                recipient_id,
                amount,
            } => {
                self.transfer
                    .execute(TransferCoinsCommand {
                        sender_id: author_id,
                        recipient_id,
                        amount,
                    })
                    .await
            }
            Command::Bet { variant, wager } => {
                self.gambling
                    .play(PlayCommand {
                        user_id: author_id,
                        variant,
                        wager,
                    })
                    .await
            }
            Command::History => self.gambling.history(author_id).await,
            Command::Leaderboard => self.balance.leaderboard().await,
            Command::Help => CommandReply::success(help::render_help(
                self.parser.prefix(),
                self.gambling.payouts(),
            )),
        }
    }
}
