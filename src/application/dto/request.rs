//! Request DTOs
//!
//! Presentation-level inputs: raw identities and raw amounts.

/// Pay coins to another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCoinsCommand {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub amount: i64,
}

/// Wager coins on a gambling variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCommand {
    pub user_id: i64,
    pub variant: String,
    pub wager: i64,
}
