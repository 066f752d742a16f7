use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised while validating a question record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question points must be a positive integer, got {0}")]
    InvalidPoints(i64),
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// Subject-matter category of a question.
///
/// The topic decides which grading rule applies to a submitted answer:
/// - `Algebra`, `Arithmetic`: case- and whitespace-insensitive text match
/// - `Calculus`: single-letter multiple choice (A-D)
/// - `Geometry`, `Trigonometry`: numeric comparison within a tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Algebra,
    Geometry,
    Trigonometry,
    Arithmetic,
    Calculus,
}

impl Topic {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Algebra => "algebra",
            Topic::Geometry => "geometry",
            Topic::Trigonometry => "trigonometry",
            Topic::Arithmetic => "arithmetic",
            Topic::Calculus => "calculus",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = QuestionError;

    // The provider sends lowercase topic names; anything else is rejected,
    // including different casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "algebra" => Ok(Self::Algebra),
            "geometry" => Ok(Self::Geometry),
            "trigonometry" => Ok(Self::Trigonometry),
            "arithmetic" => Ok(Self::Arithmetic),
            "calculus" => Ok(Self::Calculus),
            _ => Err(QuestionError::UnknownTopic(s.to_owned())),
        }
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Points a provider conventionally attaches to this tier.
    #[must_use]
    pub fn default_points(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QuestionError::UnknownDifficulty(s.to_owned())),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single quiz question as served by the question provider.
///
/// Immutable once constructed; the session replaces it wholesale on every
/// fetch. The expected answer is optional: a question without one can be
/// displayed but not graded.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    prompt: String,
    answer: Option<String>,
    topic: Topic,
    difficulty: Difficulty,
    points: u32,
}

impl Question {
    /// Creates a new question.
    ///
    /// The prompt is trimmed; a blank expected answer is normalized to
    /// `None`, which downgrades incorrect-answer feedback to the generic
    /// message.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is empty or
    /// whitespace-only, and `QuestionError::InvalidPoints` if `points` is
    /// not a positive value that fits in `u32`.
    pub fn new(
        prompt: impl Into<String>,
        answer: Option<String>,
        topic: Topic,
        difficulty: Difficulty,
        points: i64,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let answer = answer
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty());

        let points = u32::try_from(points)
            .ok()
            .filter(|p| *p > 0)
            .ok_or(QuestionError::InvalidPoints(points))?;

        Ok(Self {
            prompt: prompt.trim().to_owned(),
            answer,
            topic,
            difficulty,
            points,
        })
    }

    // Accessors
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Points awarded when this question is answered correctly.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
