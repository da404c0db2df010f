//! Gambling record entity and repository trait.
//!
//! Maps to the append-only `gambling_records` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::balance::Balance;
use crate::shared::error::AppError;

/// Result of a single play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
}

impl GameOutcome {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s {
            "win" => Self::Win,
            _ => Self::Loss,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One gambling play, kept for history and audit.
///
/// Maps to the `gambling_records` table:
/// - id: UUID PRIMARY KEY (v7, time ordered)
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
/// - variant: VARCHAR(32) NOT NULL
/// - outcome: VARCHAR(8) NOT NULL ('win' | 'loss')
/// - wager: BIGINT NOT NULL CHECK (wager > 0)
/// - delta: BIGINT NOT NULL
/// - balance_after: BIGINT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamblingRecord {
    pub id: Uuid,
    pub user_id: i64,
    pub variant: String,
    pub outcome: GameOutcome,
    pub wager: i64,
    /// Signed change applied to the balance
    pub delta: i64,
    pub balance_after: i64,
    pub created_at: DateTime<Utc>,
}

/// A decided play whose balance change has not been applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPlay {
    pub id: Uuid,
    pub user_id: i64,
    pub variant: String,
    pub outcome: GameOutcome,
    pub wager: i64,
    /// Signed change to apply to the balance
    pub delta: i64,
    pub created_at: DateTime<Utc>,
}

impl PendingPlay {
    pub fn new(
        user_id: i64,
        variant: impl Into<String>,
        outcome: GameOutcome,
        wager: i64,
        delta: i64,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            variant: variant.into(),
            outcome,
            wager,
            delta,
            created_at: Utc::now(),
        }
    }

    /// The log entry for this play once the balance reads `balance_after`.
    pub fn settled_record(&self, balance_after: i64) -> GamblingRecord {
        GamblingRecord {
            id: self.id,
            user_id: self.user_id,
            variant: self.variant.clone(),
            outcome: self.outcome,
            wager: self.wager,
            delta: self.delta,
            balance_after,
            created_at: self.created_at,
        }
    }
}

/// Balance and log entry written together by one settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledPlay {
    pub balance: Balance,
    pub record: GamblingRecord,
}

/// Repository trait for the gambling log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GamblingRepository: Send + Sync {
    /// Apply the play's delta to the user's balance and append it to the log
    /// as one unit. Returns `None` without writing anything when the balance
    /// would go negative.
    async fn settle(&self, play: &PendingPlay) -> Result<Option<SettledPlay>, AppError>;

    /// Most recent plays of a user, newest first.
    async fn recent_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<GamblingRecord>, AppError>;
}
