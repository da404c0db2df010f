//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::balance::Balance;
use crate::shared::error::AppError;

/// A chat participant the bot has observed.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Discord snowflake)
/// - message_count: BIGINT NOT NULL DEFAULT 0
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Platform-assigned identity
    pub id: i64,

    /// Non-bot messages seen from this user
    pub message_count: i64,

    /// First time the user was observed
    pub created_at: DateTime<Utc>,

    /// Last counter change
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A freshly observed user with no messages counted yet.
    pub fn new(id: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            message_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the current count lands on a reward milestone.
    pub fn reached_milestone(&self, interval: i64) -> bool {
        interval > 0 && self.message_count > 0 && self.message_count % interval == 0
    }
}

/// Outcome of counting one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageActivity {
    /// User with the post-increment counter
    pub user: User,

    /// Balance after the reward, when this message hit a milestone
    pub reward: Option<Balance>,
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Add one to the message counter, creating the user if needed.
    ///
    /// When the new count is a multiple of `interval`, `reward_amount` coins
    /// are credited in the same unit of work. If the credit fails, the
    /// increment is not kept either.
    async fn count_message(
        &self,
        id: i64,
        interval: i64,
        reward_amount: i64,
    ) -> Result<MessageActivity, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_every_interval() {
        let mut user = User::new(1);
        assert!(!user.reached_milestone(10));

        user.message_count = 9;
        assert!(!user.reached_milestone(10));

        user.message_count = 10;
        assert!(user.reached_milestone(10));

        user.message_count = 20;
        assert!(user.reached_milestone(10));
        assert!(!user.reached_milestone(0));
    }
}
