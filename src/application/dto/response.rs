//! Response DTOs
//!
//! Presentation-ready results produced by the use cases.

use serde::Serialize;

use crate::domain::services::LedgerError;

/// Generic reply shown when storage fails.
pub const GENERIC_FAILURE: &str =
    "⚠️ Something went wrong while processing your request. Please try again later.";

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    /// The action was applied
    Success,
    /// The request was rejected by validation
    Failure,
    /// The request could not be processed
    Error,
}

impl ReplyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Error => "error",
        }
    }
}

/// Text and status of a chat reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandReply {
    pub status: ReplyStatus,
    pub message: String,
}

impl CommandReply {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Failure,
            message: message.into(),
        }
    }

    pub fn error() -> Self {
        Self {
            status: ReplyStatus::Error,
            message: GENERIC_FAILURE.to_string(),
        }
    }

    /// Map a ledger failure to the reply the user sees.
    ///
    /// Storage failures are logged here and never shown verbatim.
    pub fn from_ledger_error(error: &LedgerError) -> Self {
        match error {
            LedgerError::InsufficientFunds {
                available,
                required,
            } => Self::failure(format!(
                "❌ Insufficient funds: you have **{}** coins but need **{}**.",
                available, required
            )),
            LedgerError::InvalidAmount(_) => {
                Self::failure("❌ The amount must be a positive number of coins.")
            }
            LedgerError::SelfTransfer => Self::failure("❌ You can't pay yourself."),
            LedgerError::UserNotFound(_) => Self::failure("❌ I couldn't find that user."),
            LedgerError::UnknownVariant(name) => {
                Self::failure(format!("❌ Unknown game `{}`.", name))
            }
            LedgerError::Datastore(e) => {
                tracing::error!(error = %e, "Datastore failure while handling command");
                Self::error()
            }
        }
    }
}

/// Discord mention markup for a user.
pub fn mention(user_id: i64) -> String {
    format!("<@{}>", user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::AppError;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ReplyStatus::Failure).unwrap();
        assert_eq!(json, "\"failure\"");
    }

    #[test]
    fn test_datastore_error_is_generic() {
        let reply = CommandReply::from_ledger_error(&LedgerError::Datastore(AppError::Internal(
            "password authentication failed".into(),
        )));
        assert_eq!(reply.status, ReplyStatus::Error);
        assert!(!reply.message.contains("password"));
    }

    #[test]
    fn test_insufficient_funds_names_both_amounts() {
        let reply = CommandReply::from_ledger_error(&LedgerError::InsufficientFunds {
            available: 70,
            required: 200,
        });
        assert_eq!(reply.status, ReplyStatus::Failure);
        assert!(reply.message.contains("**70**"));
        assert!(reply.message.contains("**200**"));
    }
}
