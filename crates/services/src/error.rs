//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::grading::GradeError;

/// Errors emitted while grading a submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no active question with a known answer")]
    NoActiveQuestion,
    #[error(transparent)]
    Grade(#[from] GradeError),
}
