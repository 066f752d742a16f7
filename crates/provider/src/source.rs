use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use drill_core::model::{Question, QuestionError};

/// Errors surfaced while fetching a question from a provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    #[error("math question not found")]
    NotFound,

    #[error("question service failed with status {0}")]
    Server(u16),

    #[error("unexpected status {0} from question service")]
    UnexpectedStatus(u16),

    #[error("invalid question payload: {0}")]
    Decode(String),

    #[error(transparent)]
    Invalid(#[from] QuestionError),

    #[error("question service unreachable: {0}")]
    Transport(String),
}

impl FetchError {
    /// Classifies a non-200 HTTP status into a fetch failure.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            500..=599 => Self::Server(status),
            _ => Self::UnexpectedStatus(status),
        }
    }
}

/// Contract for anything that can serve the next quiz question.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetches the next question.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the provider cannot produce a valid
    /// question.
    async fn next_question(&self) -> Result<Question, FetchError>;
}

/// Scripted question source for tests and prototyping.
///
/// Yields its pre-seeded outcomes in order and reports `NotFound` once
/// drained.
pub struct ScriptedQuestionSource {
    outcomes: Mutex<VecDeque<Result<Question, FetchError>>>,
}

impl ScriptedQuestionSource {
    /// Creates a source that yields the given outcomes in order.
    #[must_use]
    pub fn new(outcomes: impl IntoIterator<Item = Result<Question, FetchError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }

    /// Creates a source over successful questions only.
    #[must_use]
    pub fn with_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        Self::new(questions.into_iter().map(Ok))
    }
}

#[async_trait]
impl QuestionSource for ScriptedQuestionSource {
    async fn next_question(&self) -> Result<Question, FetchError> {
        let mut guard = self
            .outcomes
            .lock()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        guard.pop_front().unwrap_or(Err(FetchError::NotFound))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{Difficulty, Topic};

    fn build_question(prompt: &str) -> Question {
        Question::new(prompt, Some("4".into()), Topic::Arithmetic, Difficulty::Easy, 1).unwrap()
    }

    #[test]
    fn status_classification_matches_contract() {
        assert_eq!(FetchError::from_status(404), FetchError::NotFound);
        assert_eq!(FetchError::from_status(500), FetchError::Server(500));
        assert_eq!(FetchError::from_status(503), FetchError::Server(503));
        assert_eq!(FetchError::from_status(403), FetchError::UnexpectedStatus(403));
        assert_eq!(FetchError::from_status(204), FetchError::UnexpectedStatus(204));
    }

    #[tokio::test]
    async fn scripted_source_yields_outcomes_in_order() {
        let source = ScriptedQuestionSource::new([
            Ok(build_question("first")),
            Err(FetchError::Server(500)),
            Ok(build_question("second")),
        ]);

        assert_eq!(source.next_question().await.unwrap().prompt(), "first");
        assert_eq!(source.next_question().await.unwrap_err(), FetchError::Server(500));
        assert_eq!(source.next_question().await.unwrap().prompt(), "second");
    }

    #[tokio::test]
    async fn drained_scripted_source_reports_not_found() {
        let source = ScriptedQuestionSource::with_questions([build_question("only")]);

        source.next_question().await.unwrap();
        assert_eq!(source.next_question().await.unwrap_err(), FetchError::NotFound);
    }
}
