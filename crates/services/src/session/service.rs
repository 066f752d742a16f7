use chrono::{DateTime, Utc};

use drill_core::grading::{self, Verdict};
use drill_core::model::{Badge, Feedback, Progress, Question};

use crate::error::SessionError;

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

/// Captures the outcome of grading a single submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub verdict: Verdict,
    pub feedback: Feedback,
    pub newly_awarded: Vec<Badge>,
    pub answered_at: DateTime<Utc>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session state machine.
///
/// Holds the current question, cumulative progress, and the latest feedback.
/// Transitions are pure state updates; fetching and scheduling live in
/// `QuizController`.
pub struct QuizSession {
    current_question: Option<Question>,
    progress: Progress,
    feedback: Option<Feedback>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Creates an empty session.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            current_question: None,
            progress: Progress::new(),
            feedback: None,
            started_at,
        }
    }

    // Accessors
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Makes `question` current, clearing prior feedback and counting the
    /// load.
    pub fn install_question(&mut self, question: Question) -> &Question {
        self.feedback = None;
        self.progress.record_question_loaded();
        self.current_question.insert(question)
    }

    /// Drops the current question and any feedback, e.g. after a failed
    /// fetch. Progress is untouched.
    pub fn clear_question(&mut self) {
        self.current_question = None;
        self.feedback = None;
    }

    /// Grades `user_text` against the current question and applies the
    /// outcome to progress and feedback.
    ///
    /// `answered_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveQuestion` if no current question with
    /// a known answer exists, and `SessionError::Grade` if a numeric
    /// comparison receives unparseable input. Neither changes any state.
    pub fn submit(
        &mut self,
        user_text: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<Submission, SessionError> {
        let question = self
            .current_question
            .as_ref()
            .ok_or(SessionError::NoActiveQuestion)?;
        let answer = question
            .answer()
            .ok_or(SessionError::NoActiveQuestion)?
            .to_owned();
        let topic = question.topic();
        let points = question.points();

        let verdict = grading::grade(topic, user_text, &answer)?;

        let (mut feedback, newly_awarded) = match verdict {
            Verdict::Correct => {
                let newly = self.progress.record_correct(points);
                (Feedback::correct(points), newly)
            }
            Verdict::Incorrect => {
                self.progress.record_incorrect();
                (Feedback::incorrect(Some(answer.as_str())), Vec::new())
            }
        };
        feedback.append_badges(&newly_awarded);
        self.feedback = Some(feedback.clone());

        Ok(Submission {
            verdict,
            feedback,
            newly_awarded,
            answered_at,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
