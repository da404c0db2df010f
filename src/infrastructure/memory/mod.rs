//! In-Memory Store
//!
//! Process-local implementation of every repository trait, used by the
//! `memory` database backend and by tests. All state sits behind one mutex,
//! so each trait method is atomic with respect to every other.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::{
    Balance, BalanceRepository, GamblingRecord, GamblingRepository, MessageActivity, PendingPlay,
    SettledPlay, TransferReceipt, User, UserRepository,
};
use crate::shared::error::AppError;

#[derive(Debug, Default)]
struct State {
    users: HashMap<i64, User>,
    balances: HashMap<i64, Balance>,
    records: Vec<GamblingRecord>,
}

impl State {
    fn ensure_account(&mut self, user_id: i64) -> &mut Balance {
        self.users.entry(user_id).or_insert_with(|| User::new(user_id));
        self.balances
            .entry(user_id)
            .or_insert_with(|| Balance::empty(user_id))
    }
}

/// Shared in-memory ledger.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a user's balance, creating the account if needed.
    pub fn seed_balance(&self, user_id: i64, amount: i64) {
        let mut state = self.state.lock();
        let balance = state.ensure_account(user_id);
        balance.amount = amount.max(0);
        balance.updated_at = Utc::now();
    }

    /// Sum of all balances.
    pub fn total_coins(&self) -> i64 {
        self.state.lock().balances.values().map(|b| b.amount).sum()
    }

    /// Number of gambling plays logged.
    pub fn record_count(&self) -> usize {
        self.state.lock().records.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn count_message(
        &self,
        id: i64,
        interval: i64,
        reward_amount: i64,
    ) -> Result<MessageActivity, AppError> {
        let mut state = self.state.lock();

        let mut user = state.users.get(&id).cloned().unwrap_or_else(|| User::new(id));
        user.message_count += 1;
        user.updated_at = Utc::now();

        // Work out the credit before writing anything, so a failure keeps neither.
        let reward = if user.reached_milestone(interval) {
            let current = state.balances.get(&id).map_or(0, |b| b.amount);
            let total = current.checked_add(reward_amount).ok_or_else(|| {
                AppError::Validation(format!("Reward of {} overflows balance", reward_amount))
            })?;

            let balance = state.ensure_account(id);
            balance.amount = total;
            balance.updated_at = user.updated_at;
            Some(balance.clone())
        } else {
            None
        };

        state.users.insert(id, user.clone());
        Ok(MessageActivity { user, reward })
    }
}

#[async_trait]
impl BalanceRepository for InMemoryStore {
    async fn get_or_create(&self, user_id: i64) -> Result<Balance, AppError> {
        Ok(self.state.lock().ensure_account(user_id).clone())
    }

    async fn credit(&self, user_id: i64, amount: i64) -> Result<Balance, AppError> {
        let mut state = self.state.lock();
        let balance = state.ensure_account(user_id);
        balance.amount = balance
            .amount
            .checked_add(amount)
            .filter(|total| *total >= 0)
            .ok_or_else(|| AppError::Validation(format!("Credit of {} overflows balance", amount)))?;
        balance.updated_at = Utc::now();
        Ok(balance.clone())
    }

    async fn transfer(
        &self,
        sender_id: i64,
        recipient_id: i64,
        amount: i64,
    ) -> Result<Option<TransferReceipt>, AppError> {
        let mut state = self.state.lock();

        let available = state
            .balances
            .get(&sender_id)
            .map(|b| b.amount)
            .ok_or_else(|| AppError::NotFound(format!("Balance for user {} not found", sender_id)))?;

        if available < amount {
            return Ok(None);
        }

        let now = Utc::now();
        let sender = {
            let balance = state.ensure_account(sender_id);
            balance.amount -= amount;
            balance.updated_at = now;
            balance.clone()
        };
        let recipient = {
            let balance = state.ensure_account(recipient_id);
            balance.amount += amount;
            balance.updated_at = now;
            balance.clone()
        };

        Ok(Some(TransferReceipt {
            sender,
            recipient,
            amount,
        }))
    }

    async fn top(&self, limit: i64) -> Result<Vec<Balance>, AppError> {
        let state = self.state.lock();
        let mut balances: Vec<Balance> = state.balances.values().cloned().collect();
        balances.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.user_id.cmp(&b.user_id)));
        balances.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(balances)
    }
}

#[async_trait]
impl GamblingRepository for InMemoryStore {
    async fn settle(&self, play: &PendingPlay) -> Result<Option<SettledPlay>, AppError> {
        let mut state = self.state.lock();

        if state.records.iter().any(|r| r.id == play.id) {
            return Err(AppError::Conflict(format!(
                "Gambling record {} already exists",
                play.id
            )));
        }

        let balance = state.ensure_account(play.user_id);
        let next = balance.amount.checked_add(play.delta).ok_or_else(|| {
            AppError::Validation(format!("Delta of {} overflows balance", play.delta))
        })?;
        if next < 0 {
            return Ok(None);
        }

        balance.amount = next;
        balance.updated_at = Utc::now();
        let balance = balance.clone();

        let record = play.settled_record(balance.amount);
        state.records.push(record.clone());

        Ok(Some(SettledPlay { balance, record }))
    }

    async fn recent_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<GamblingRecord>, AppError> {
        let state = self.state.lock();
        Ok(state
            .records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}
