//! Unit of Work Pattern Implementation
//!
//! Provides transactional boundaries for multi-statement ledger updates.
//! All statements within a unit succeed or fail together.

use std::future::Future;

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::shared::error::AppError;

/// Transaction context that wraps a SQLx transaction.
pub struct TransactionContext {
    tx: Transaction<'static, Postgres>,
}

impl TransactionContext {
    /// Create a new transaction context.
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Connection to run queries on inside the transaction.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Commit the transaction.
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }

    /// Rollback the transaction.
    pub async fn rollback(self) -> Result<(), AppError> {
        self.tx.rollback().await.map_err(AppError::Database)
    }
}

/// Execute a closure within a transaction.
///
/// The closure hands the context back alongside its result so the helper can
/// commit it. Returning an error drops the context, which rolls back.
///
/// # Example
/// ```ignore
/// let balance = with_transaction(&pool, |mut ctx| async move {
///     ensure_account(ctx.conn(), user_id).await?;
///     let row = credit(ctx.conn(), user_id, amount).await?;
///     Ok((row, ctx))
/// }).await?;
/// ```
pub async fn with_transaction<F, Fut, T>(pool: &PgPool, f: F) -> Result<T, AppError>
where
    F: FnOnce(TransactionContext) -> Fut,
    Fut: Future<Output = Result<(T, TransactionContext), AppError>>,
{
    let tx = pool.begin().await.map_err(AppError::Database)?;
    let ctx = TransactionContext::new(tx);

    let (result, ctx) = f(ctx).await?;
    ctx.commit().await?;
    Ok(result)
}
