//! Application Error Types
//!
//! Infrastructure-level errors raised by repositories and the datastore.

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Whether this error reports a missing row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_) | AppError::Database(sqlx::Error::RowNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_counts_as_not_found() {
        assert!(AppError::Database(sqlx::Error::RowNotFound).is_not_found());
        assert!(AppError::NotFound("balance 1".into()).is_not_found());
        assert!(!AppError::Internal("boom".into()).is_not_found());
    }
}
