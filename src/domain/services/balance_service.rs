//! Balance reads, reward grants and the message counter.

use std::sync::Arc;

use crate::domain::entities::{Balance, BalanceRepository, MessageActivity, UserRepository};

use super::LedgerError;

/// How message activity turns into coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPolicy {
    /// Coins per grant
    pub amount: i64,

    /// Messages between grants
    pub interval: i64,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            amount: 10,
            interval: 10,
        }
    }
}

/// Domain service for reading balances and granting rewards.
pub struct BalanceService {
    balance_repo: Arc<dyn BalanceRepository>,
    user_repo: Arc<dyn UserRepository>,
    policy: RewardPolicy,
}

impl BalanceService {
    pub fn new(
        balance_repo: Arc<dyn BalanceRepository>,
        user_repo: Arc<dyn UserRepository>,
        policy: RewardPolicy,
    ) -> Self {
        Self {
            balance_repo,
            user_repo,
            policy,
        }
    }

    pub fn policy(&self) -> RewardPolicy {
        self.policy
    }

    /// Current balance of a user, created empty on first access.
    pub async fn get_or_create_balance(&self, user_id: i64) -> Result<Balance, LedgerError> {
        self.balance_repo
            .get_or_create(user_id)
            .await
            .map_err(LedgerError::for_user(user_id))
    }

    /// Credit a reward, creating the balance if absent.
    pub async fn grant_reward(&self, user_id: i64, amount: i64) -> Result<Balance, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let balance = self
            .balance_repo
            .credit(user_id, amount)
            .await
            .map_err(LedgerError::for_user(user_id))?;

        tracing::info!(user_id, amount, balance = balance.amount, "Reward granted");
        Ok(balance)
    }

    /// Count one message from a user and grant the reward on every milestone.
    ///
    /// The increment and the credit are written together, so a milestone is
    /// either counted and paid or neither.
    pub async fn register_message(&self, user_id: i64) -> Result<MessageActivity, LedgerError> {
        let activity = self
            .user_repo
            .count_message(user_id, self.policy.interval, self.policy.amount)
            .await
            .map_err(LedgerError::for_user(user_id))?;

        if let Some(balance) = &activity.reward {
            tracing::info!(
                user_id,
                amount = self.policy.amount,
                balance = balance.amount,
                "Reward granted"
            );
        }

        tracing::debug!(
            user_id,
            message_count = activity.user.message_count,
            rewarded = activity.reward.is_some(),
            "Message counted"
        );

        Ok(activity)
    }

    /// Richest users first.
    pub async fn leaderboard(&self, limit: i64) -> Result<Vec<Balance>, LedgerError> {
        Ok(self.balance_repo.top(limit.max(1)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MockBalanceRepository, MockUserRepository, User};
    use crate::shared::error::AppError;
    use mockall::predicate::eq;

    fn activity(id: i64, message_count: i64, reward: Option<i64>) -> MessageActivity {
        MessageActivity {
            user: User {
                message_count,
                ..User::new(id)
            },
            reward: reward.map(|amount| balance(id, amount)),
        }
    }

    fn balance(user_id: i64, amount: i64) -> Balance {
        Balance {
            amount,
            ..Balance::empty(user_id)
        }
    }

    #[tokio::test]
    async fn test_register_message_below_milestone_grants_nothing() {
        let mut users = MockUserRepository::new();
        users
            .expect_count_message()
            .with(eq(1), eq(10), eq(10))
            .returning(|id, _, _| Ok(activity(id, 9, None)));
        let mut balances = MockBalanceRepository::new();
        balances.expect_credit().never();

        let service = BalanceService::new(Arc::new(balances), Arc::new(users), RewardPolicy::default());
        let activity = service.register_message(1).await.unwrap();

        assert_eq!(activity.user.message_count, 9);
        assert!(activity.reward.is_none());
    }

    #[tokio::test]
    async fn test_register_message_passes_policy_to_store() {
        let mut users = MockUserRepository::new();
        users
            .expect_count_message()
            .with(eq(1), eq(10), eq(25))
            .times(1)
            .returning(|id, _, amount| Ok(activity(id, 20, Some(amount))));
        let mut balances = MockBalanceRepository::new();
        balances.expect_credit().never();

        let policy = RewardPolicy {
            amount: 25,
            interval: 10,
        };
        let service = BalanceService::new(Arc::new(balances), Arc::new(users), policy);
        let activity = service.register_message(1).await.unwrap();

        assert_eq!(activity.reward.map(|b| b.amount), Some(25));
    }

    #[tokio::test]
    async fn test_failed_milestone_write_is_a_datastore_error() {
        let mut users = MockUserRepository::new();
        users
            .expect_count_message()
            .returning(|_, _, _| Err(AppError::Internal("connection reset".into())));

        let service = BalanceService::new(
            Arc::new(MockBalanceRepository::new()),
            Arc::new(users),
            RewardPolicy::default(),
        );

        let err = service.register_message(1).await.unwrap_err();
        assert!(err.is_datastore());
    }

    #[tokio::test]
    async fn test_grant_reward_rejects_non_positive_amount() {
        let service = BalanceService::new(
            Arc::new(MockBalanceRepository::new()),
            Arc::new(MockUserRepository::new()),
            RewardPolicy::default(),
        );

        let err = service.grant_reward(1, 0).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(0)));
    }

    #[tokio::test]
    async fn test_datastore_failure_propagates() {
        let mut balances = MockBalanceRepository::new();
        balances
            .expect_get_or_create()
            .returning(|_| Err(AppError::Internal("connection reset".into())));

        let service = BalanceService::new(
            Arc::new(balances),
            Arc::new(MockUserRepository::new()),
            RewardPolicy::default(),
        );

        let err = service.get_or_create_balance(3).await.unwrap_err();
        assert!(err.is_datastore());
    }
}
