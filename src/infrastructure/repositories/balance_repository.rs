//! Balance Repository Implementation
//!
//! PostgreSQL implementation of the BalanceRepository trait. Every mutation
//! is a guarded single statement inside a transaction, and the `amount >= 0`
//! check constraint backs the guards up.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::domain::{Balance, BalanceRepository, TransferReceipt};
use crate::infrastructure::database::{with_transaction, TransactionContext};
use crate::shared::error::AppError;

/// Database row representation of the balances table.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct BalanceRow {
    user_id: i64,
    amount: i64,
    updated_at: DateTime<Utc>,
}

impl BalanceRow {
    /// Convert database row to domain Balance entity.
    pub(super) fn into_balance(self) -> Balance {
        Balance {
            user_id: self.user_id,
            amount: self.amount,
            updated_at: self.updated_at,
        }
    }
}

/// Insert the user and an empty balance if either is missing.
pub(super) async fn ensure_account(conn: &mut PgConnection, user_id: i64) -> Result<(), AppError> {
    sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("INSERT INTO balances (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// PostgreSQL balance repository implementation.
#[derive(Clone)]
pub struct PgBalanceRepository {
    pool: PgPool,
}

impl PgBalanceRepository {
    /// Create a new PgBalanceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BalanceRepository for PgBalanceRepository {
    async fn get_or_create(&self, user_id: i64) -> Result<Balance, AppError> {
        with_transaction(&self.pool, |mut ctx| async move {
            ensure_account(ctx.conn(), user_id).await?;

            let row = sqlx::query_as::<_, BalanceRow>(
                "SELECT user_id, amount, updated_at FROM balances WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_one(ctx.conn())
            .await?;

            Ok::<_, AppError>((row.into_balance(), ctx))
        })
        .await
    }

    async fn credit(&self, user_id: i64, amount: i64) -> Result<Balance, AppError> {
        with_transaction(&self.pool, |mut ctx| async move {
            ensure_account(ctx.conn(), user_id).await?;

            let row = sqlx::query_as::<_, BalanceRow>(
                r#"
                UPDATE balances
                SET amount = amount + $2, updated_at = NOW()
                WHERE user_id = $1
                RETURNING user_id, amount, updated_at
                "#,
            )
            .bind(user_id)
            .bind(amount)
            .fetch_one(ctx.conn())
            .await?;

            Ok::<_, AppError>((row.into_balance(), ctx))
        })
        .await
    }

    async fn transfer(
        &self,
        sender_id: i64,
        recipient_id: i64,
        amount: i64,
    ) -> Result<Option<TransferReceipt>, AppError> {
        let mut ctx = TransactionContext::new(self.pool.begin().await?);

        ensure_account(ctx.conn(), recipient_id).await?;

        // Lock both rows in id order so opposite transfers cannot deadlock.
        let locked = sqlx::query_as::<_, BalanceRow>(
            r#"
            SELECT user_id, amount, updated_at
            FROM balances
            WHERE user_id = ANY($1)
            ORDER BY user_id
            FOR UPDATE
            "#,
        )
        .bind(vec![sender_id, recipient_id])
        .fetch_all(ctx.conn())
        .await?;

        if !locked.iter().any(|row| row.user_id == sender_id) {
            ctx.rollback().await?;
            return Err(AppError::NotFound(format!(
                "Balance for user {} not found",
                sender_id
            )));
        }

        let sender = sqlx::query_as::<_, BalanceRow>(
            r#"
            UPDATE balances
            SET amount = amount - $2, updated_at = NOW()
            WHERE user_id = $1 AND amount >= $2
            RETURNING user_id, amount, updated_at
            "#,
        )
        .bind(sender_id)
        .bind(amount)
        .fetch_optional(ctx.conn())
        .await?;

        let Some(sender) = sender else {
            ctx.rollback().await?;
            return Ok(None);
        };

        let recipient = sqlx::query_as::<_, BalanceRow>(
            r#"
            UPDATE balances
            SET amount = amount + $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, amount, updated_at
            "#,
        )
        .bind(recipient_id)
        .bind(amount)
        .fetch_one(ctx.conn())
        .await?;

        ctx.commit().await?;

        Ok(Some(TransferReceipt {
            sender: sender.into_balance(),
            recipient: recipient.into_balance(),
            amount,
        }))
    }

    async fn top(&self, limit: i64) -> Result<Vec<Balance>, AppError> {
        let rows = sqlx::query_as::<_, BalanceRow>(
            r#"
            SELECT user_id, amount, updated_at
            FROM balances
            ORDER BY amount DESC, user_id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_balance()).collect())
    }
}
