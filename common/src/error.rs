//! Error types for price observation intake.

use thiserror::Error;

/// Reasons a raw feed row cannot become a [`PriceObservation`](crate::PriceObservation).
///
/// Rows failing these checks are skipped by the feed parser; they are never
/// surfaced to the caller as a hard failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservationError {
    /// A required field is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field has the wrong JSON type.
    #[error("Field {field} has wrong type, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// Currency symbol is empty.
    #[error("Empty currency symbol")]
    EmptyCurrency,

    /// Timestamp could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Row is not a JSON object.
    #[error("Record is not an object")]
    NotAnObject,
}

impl ObservationError {
    /// Get error code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            ObservationError::MissingField(_) => "MISSING_FIELD",
            ObservationError::WrongType { .. } => "WRONG_TYPE",
            ObservationError::EmptyCurrency => "EMPTY_CURRENCY",
            ObservationError::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
            ObservationError::NotAnObject => "NOT_AN_OBJECT",
        }
    }
}
