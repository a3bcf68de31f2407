use thiserror::Error;

use crate::models::{LINEUP_SIZE, MAX_USES};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A write inside a transaction touched an unexpected number of rows.
    #[error("{operation} affected {actual} row(s), expected {expected}")]
    RowCountMismatch {
        operation: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be turned into a typed record.
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

/// Reasons a lineup selection is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Must select at least 1 golfer")]
    EmptySelection,

    #[error("Cannot select more than {max} golfers (got {0})", max = LINEUP_SIZE)]
    TooManySelected(usize),

    #[error("Cannot select slot {0} twice")]
    DuplicateSlot(i32),

    #[error("Slot {0} is not on roster")]
    SlotNotOnRoster(i32),

    #[error("Slot {0} has already been used {max} times", max = MAX_USES)]
    SlotExhausted(i32),
}

/// Failures returned by the league services.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid lineup selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("Tournament {0} is locked, cannot submit lineup")]
    Locked(String),

    #[error("Unauthorized: {0} is not a commissioner")]
    Unauthorized(String),

    #[error(
        "Cannot use slot {slot}: already at maximum {max} uses (current: {times_used})",
        max = MAX_USES
    )]
    SlotExhausted { slot: i32, times_used: i32 },

    #[error("Conflicting write: {0}")]
    Conflict(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for LeagueError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::RowCountMismatch { .. } => Self::Conflict(error.to_string()),
            other => Self::Storage(other),
        }
    }
}

impl From<validator::ValidationErrors> for LeagueError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Invalid(errors.to_string())
    }
}

pub type LeagueResult<T> = std::result::Result<T, LeagueError>;
