//! Timeline-subsystem error type.

use thiserror::Error;

/// Errors produced while loading or validating a run batch.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// A structural invariant of one entity's timeline is violated.
    /// Rejects the entire batch — there is no partial load.
    #[error("malformed timeline for entity {entity:?}: {detail}")]
    Malformed { entity: String, detail: String },

    #[error("run parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TimelineError {
    /// Shorthand used throughout the validator.
    pub(crate) fn malformed(entity: &str, detail: impl Into<String>) -> Self {
        TimelineError::Malformed { entity: entity.to_owned(), detail: detail.into() }
    }
}

pub type TimelineResult<T> = Result<T, TimelineError>;
