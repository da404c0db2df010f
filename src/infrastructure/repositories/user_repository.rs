//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::balance_repository::BalanceRow;
use crate::domain::{MessageActivity, User, UserRepository};
use crate::infrastructure::database::with_transaction;
use crate::shared::error::AppError;

/// Database row representation of the users table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    message_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self) -> User {
        User {
            id: self.id,
            message_count: self.message_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn count_message(
        &self,
        id: i64,
        interval: i64,
        reward_amount: i64,
    ) -> Result<MessageActivity, AppError> {
        with_transaction(&self.pool, |mut ctx| async move {
            let user = sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (id, message_count)
                VALUES ($1, 1)
                ON CONFLICT (id) DO UPDATE
                    SET message_count = users.message_count + 1,
                        updated_at = NOW()
                RETURNING id, message_count, created_at, updated_at
                "#,
            )
            .bind(id)
            .fetch_one(ctx.conn())
            .await?
            .into_user();

            if !user.reached_milestone(interval) {
                return Ok::<_, AppError>((MessageActivity { user, reward: None }, ctx));
            }

            // A failed credit drops the context, rolling the increment back too.
            let balance = sqlx::query_as::<_, BalanceRow>(
                r#"
                INSERT INTO balances (user_id, amount)
                VALUES ($1, $2)
                ON CONFLICT (user_id) DO UPDATE
                    SET amount = balances.amount + EXCLUDED.amount,
                        updated_at = NOW()
                RETURNING user_id, amount, updated_at
                "#,
            )
            .bind(id)
            .bind(reward_amount)
            .fetch_one(ctx.conn())
            .await?
            .into_balance();

            Ok((
                MessageActivity {
                    user,
                    reward: Some(balance),
                },
                ctx,
            ))
        })
        .await
    }
}
