//! Gambling Repository Implementation
//!
//! PostgreSQL implementation of the append-only gambling log. A play's
//! balance change and its record are written in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::balance_repository::{ensure_account, BalanceRow};
use crate::domain::{GameOutcome, GamblingRecord, GamblingRepository, PendingPlay, SettledPlay};
use crate::infrastructure::database::with_transaction;
use crate::shared::error::AppError;

/// Database row representation of the gambling_records table.
#[derive(Debug, sqlx::FromRow)]
struct GamblingRecordRow {
    id: Uuid,
    user_id: i64,
    variant: String,
    outcome: String,
    wager: i64,
    delta: i64,
    balance_after: i64,
    created_at: DateTime<Utc>,
}

impl GamblingRecordRow {
    fn into_record(self) -> GamblingRecord {
        GamblingRecord {
            id: self.id,
            user_id: self.user_id,
            variant: self.variant,
            outcome: GameOutcome::from_str(&self.outcome),
            wager: self.wager,
            delta: self.delta,
            balance_after: self.balance_after,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL gambling log implementation.
#[derive(Clone)]
pub struct PgGamblingRepository {
    pool: PgPool,
}

impl PgGamblingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GamblingRepository for PgGamblingRepository {
    async fn settle(&self, play: &PendingPlay) -> Result<Option<SettledPlay>, AppError> {
        let play = play.clone();
        with_transaction(&self.pool, |mut ctx| async move {
            ensure_account(ctx.conn(), play.user_id).await?;

            let balance = sqlx::query_as::<_, BalanceRow>(
                r#"
                UPDATE balances
                SET amount = amount + $2, updated_at = NOW()
                WHERE user_id = $1 AND amount + $2 >= 0
                RETURNING user_id, amount, updated_at
                "#,
            )
            .bind(play.user_id)
            .bind(play.delta)
            .fetch_optional(ctx.conn())
            .await?;

            let Some(balance) = balance.map(|r| r.into_balance()) else {
                return Ok::<_, AppError>((None, ctx));
            };

            let record = play.settled_record(balance.amount);
            let row = sqlx::query_as::<_, GamblingRecordRow>(
                r#"
                INSERT INTO gambling_records
                    (id, user_id, variant, outcome, wager, delta, balance_after, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id, user_id, variant, outcome, wager, delta, balance_after, created_at
                "#,
            )
            .bind(record.id)
            .bind(record.user_id)
            .bind(&record.variant)
            .bind(record.outcome.as_str())
            .bind(record.wager)
            .bind(record.delta)
            .bind(record.balance_after)
            .bind(record.created_at)
            .fetch_one(ctx.conn())
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::Conflict(format!("Gambling record {} already exists", record.id))
                }
                _ => AppError::Database(e),
            })?;

            Ok((
                Some(SettledPlay {
                    balance,
                    record: row.into_record(),
                }),
                ctx,
            ))
        })
        .await
    }

    async fn recent_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<GamblingRecord>, AppError> {
        let rows = sqlx::query_as::<_, GamblingRecordRow>(
            r#"
            SELECT id, user_id, variant, outcome, wager, delta, balance_after, created_at
            FROM gambling_records
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }
}
