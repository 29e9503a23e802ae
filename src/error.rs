//! Error types for allocation input validation.

use thiserror::Error;

/// Errors that reject an allocation run before any result is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// A participant record has no identifier (absent or blank).
    #[error("participant at index {index} has no identifier")]
    MissingIdentifier { index: usize },

    /// Two participant records share the same identifier.
    #[error("duplicate participant identifier '{id}'")]
    DuplicateParticipant { id: String },

    /// A participant listed the same resource twice under
    /// [`DuplicatePolicy::Reject`](crate::allocation::DuplicatePolicy::Reject).
    #[error("participant '{id}' lists '{resource}' more than once")]
    DuplicatePreference { id: String, resource: String },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A tie-break returned an index outside the claimant list.
    #[error("tie-break for '{resource}' chose index {index} of {claimants} claimants")]
    TieBreakOutOfRange {
        resource: String,
        index: usize,
        claimants: usize,
    },

    /// Submission records could not be decoded.
    #[error("invalid submission data: {0}")]
    Json(String),
}

impl AllocationError {
    /// Returns true if this error was caused by the participant records
    /// themselves rather than by configuration or the tie-break source.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AllocationError::MissingIdentifier { .. }
                | AllocationError::DuplicateParticipant { .. }
                | AllocationError::DuplicatePreference { .. }
                | AllocationError::Json(_)
        )
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for AllocationError {
    fn from(err: serde_json::Error) -> Self {
        AllocationError::Json(err.to_string())
    }
}
