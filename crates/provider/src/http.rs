use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use drill_core::model::{Question, QuestionError};

use crate::source::{FetchError, QuestionSource};

/// Endpoint path served by the math question provider.
const MATH_QUESTION_PATH: &str = "/api/math-question";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug)]
pub struct QuestionServiceConfig {
    pub base_url: String,
}

impl QuestionServiceConfig {
    /// Reads the provider endpoint from `DRILL_API_URL`, falling back to the
    /// local development default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("DRILL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self { base_url }
    }
}

impl Default for QuestionServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

/// Question source backed by the remote math question service.
#[derive(Clone)]
pub struct HttpQuestionSource {
    client: Client,
    config: QuestionServiceConfig,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(QuestionServiceConfig::from_env())
    }

    #[must_use]
    pub fn new(config: QuestionServiceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{MATH_QUESTION_PATH}",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn next_question(&self) -> Result<Question, FetchError> {
        let url = self.endpoint();
        debug!(%url, "requesting next question");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        // The provider signals success with exactly 200.
        let status = response.status().as_u16();
        if status != 200 {
            warn!(status, "question service returned a non-success status");
            return Err(FetchError::from_status(status));
        }

        let record: QuestionRecord = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(record.into_question()?)
    }
}

/// Wire shape served by the question endpoint.
///
/// Mirrors the domain `Question` so the transport can decode a payload
/// without leaking provider concerns into the domain layer.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    pub topic: String,
    pub difficulty: String,
    pub points: i64,
}

impl QuestionRecord {
    /// Validates the record into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the topic or difficulty is outside its
    /// enumerated set, or the prompt or points fail validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        let topic = self.topic.parse()?;
        let difficulty = self.difficulty.parse()?;
        Question::new(self.question, self.answer, topic, difficulty, self.points)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
