//! Gambling plays against the configured payout table.

use std::sync::Arc;

use rand::Rng;

use crate::domain::entities::{
    Balance, BalanceRepository, GameOutcome, GamblingRecord, GamblingRepository, PendingPlay,
    SettledPlay,
};
use crate::domain::value_objects::{PayoutRule, PayoutTable};

use super::LedgerError;

/// Source of randomness for play outcomes.
pub trait OutcomeRoller: Send + Sync {
    /// Return `true` with the given probability.
    fn roll(&self, win_probability: f64) -> bool;
}

/// Thread-local RNG roller used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngRoller;

impl OutcomeRoller for ThreadRngRoller {
    fn roll(&self, win_probability: f64) -> bool {
        rand::rng().random_bool(win_probability.clamp(0.0, 1.0))
    }
}

/// A settled play.
#[derive(Debug, Clone, PartialEq)]
pub struct GamblingResult {
    /// Audit entry for the play
    pub record: GamblingRecord,

    /// Balance after the payout
    pub balance: Balance,

    /// Rule the play was settled with
    pub rule: PayoutRule,
}

impl GamblingResult {
    pub fn won(&self) -> bool {
        self.record.outcome == GameOutcome::Win
    }
}

/// Domain service applying gambling outcomes to balances.
pub struct GamblingService {
    balance_repo: Arc<dyn BalanceRepository>,
    gambling_repo: Arc<dyn GamblingRepository>,
    payouts: PayoutTable,
    roller: Arc<dyn OutcomeRoller>,
}

impl GamblingService {
    pub fn new(
        balance_repo: Arc<dyn BalanceRepository>,
        gambling_repo: Arc<dyn GamblingRepository>,
        payouts: PayoutTable,
        roller: Arc<dyn OutcomeRoller>,
    ) -> Self {
        Self {
            balance_repo,
            gambling_repo,
            payouts,
            roller,
        }
    }

    pub fn payouts(&self) -> &PayoutTable {
        &self.payouts
    }

    /// Wager coins on a variant.
    pub async fn play(&self, user_id: i64, wager: i64, variant: &str) -> Result<GamblingResult, LedgerError> {
        let (variant, rule) = self
            .payouts
            .get(variant)
            .ok_or_else(|| LedgerError::UnknownVariant(variant.to_string()))?;

        if wager <= 0 {
            return Err(LedgerError::InvalidAmount(wager));
        }

        let current = self
            .balance_repo
            .get_or_create(user_id)
            .await
            .map_err(LedgerError::for_user(user_id))?;

        if !current.covers(wager) {
            return Err(LedgerError::InsufficientFunds {
                available: current.amount,
                required: wager,
            });
        }

        let won = self.roller.roll(rule.win_probability);
        let outcome = if won { GameOutcome::Win } else { GameOutcome::Loss };
        let play = PendingPlay::new(user_id, variant, outcome, wager, rule.delta(wager, won));

        let SettledPlay { balance, record } = self
            .gambling_repo
            .settle(&play)
            .await
            .map_err(LedgerError::for_user(user_id))?
            .ok_or(LedgerError::InsufficientFunds {
                available: current.amount,
                required: wager,
            })?;

        tracing::info!(
            user_id,
            variant,
            wager,
            delta = record.delta,
            outcome = %record.outcome,
            balance = balance.amount,
            "Gambling play settled"
        );

        Ok(GamblingResult { record, balance, rule })
    }

    /// Most recent plays of a user, newest first.
    pub async fn history(&self, user_id: i64, limit: i64) -> Result<Vec<GamblingRecord>, LedgerError> {
        Ok(self.gambling_repo.recent_for_user(user_id, limit.max(1)).await?)
    }
}
