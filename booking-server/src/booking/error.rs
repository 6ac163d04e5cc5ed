//! Booking engine error taxonomy
//!
//! Every guard violation surfaces one of these to the caller; nothing is
//! retried and no partial state is persisted.

use crate::db::repository::RepoError;
use thiserror::Error;

/// Domain errors of the reservation and table-order engine
#[derive(Debug, Error)]
pub enum BookingError {
    /// Overlapping booking / double-claim of a table
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Status guard violation
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Unknown id or code
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input (missing field, non-positive quantity, capacity misfit)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced food/combo/table no longer exists
    #[error("Inconsistent reference: {0}")]
    InconsistentReference(String),

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepoError> for BookingError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => BookingError::NotFound(msg),
            RepoError::Duplicate(msg) => BookingError::Conflict(msg),
            RepoError::Validation(msg) => BookingError::Validation(msg),
            RepoError::Database(msg) => BookingError::Database(msg),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
