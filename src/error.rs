//! Fatal generation errors.
//!
//! Unplaceable sessions are not errors: they are reported in
//! [`Timetable::unscheduled`](crate::models::Timetable). A
//! `GenerationError` means the run was aborted and produced no timetable.

use crate::models::Violation;

/// Result type for generation runs.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// A run aborted by an internal failure.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// A commit could not resolve data the search had already matched.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The finished grid broke at least one hard invariant.
    #[error("Timetable invariants violated ({} violation(s)): {}", .0.len(), summarize(.0))]
    InvariantViolated(Vec<Violation>),
}

impl From<String> for GenerationError {
    fn from(s: String) -> Self {
        GenerationError::Internal(s)
    }
}

impl From<&str> for GenerationError {
    fn from(s: &str) -> Self {
        GenerationError::Internal(s.to_string())
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
