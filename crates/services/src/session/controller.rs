use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use drill_core::Clock;
use drill_core::model::Question;
use provider::{FetchError, QuestionSource};

use super::advance::{AUTO_ADVANCE_DELAY, AdvanceTimer};
use super::service::{QuizSession, Submission};
use crate::error::SessionError;

/// Orchestrates the quiz loop against a question provider.
///
/// Owns the session state exclusively: questions are fetched and installed
/// here, submissions are graded here, and the post-answer auto-advance is
/// driven here. Nothing else mutates the session.
pub struct QuizController {
    source: Arc<dyn QuestionSource>,
    session: QuizSession,
    timer: AdvanceTimer,
    clock: Clock,
    fetch_in_flight: bool,
}

impl QuizController {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        let clock = Clock::default_clock();
        Self {
            source,
            session: QuizSession::new(clock.now()),
            timer: AdvanceTimer::new(AUTO_ADVANCE_DELAY),
            clock,
            fetch_in_flight: false,
        }
    }

    /// Replaces the clock, restarting the session at the new clock's now.
    ///
    /// Intended for construction time, before any question is loaded.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.session = QuizSession::new(clock.now());
        self.clock = clock;
        self
    }

    /// Overrides the auto-advance delay.
    #[must_use]
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.timer = AdvanceTimer::new(delay);
        self
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn is_fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    /// Whether a post-answer advance is pending.
    #[must_use]
    pub fn advance_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Fetches the next question and makes it current.
    ///
    /// Returns `Ok(None)` without fetching when another fetch is already in
    /// flight. On failure the current question is dropped while score and
    /// badges survive, and no retry is scheduled; the caller must trigger
    /// one explicitly.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` as classified by the provider.
    pub async fn load_next_question(&mut self) -> Result<Option<&Question>, FetchError> {
        if self.fetch_in_flight {
            return Ok(None);
        }

        self.fetch_in_flight = true;
        let fetched = self.source.next_question().await;
        self.fetch_in_flight = false;

        match fetched {
            Ok(question) => {
                debug!(topic = %question.topic(), "question loaded");
                Ok(Some(self.session.install_question(question)))
            }
            Err(err) => {
                warn!(error = %err, "question fetch failed");
                self.session.clear_question();
                Err(err)
            }
        }
    }

    /// Grades a submission against the current question and arms the
    /// auto-advance timer.
    ///
    /// The grading outcome is returned immediately; the delayed fetch runs
    /// when the caller awaits `auto_advance`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when no gradable question is current or the
    /// numeric input is invalid. The timer stays unarmed in that case.
    pub fn submit_answer(&mut self, user_text: &str) -> Result<Submission, SessionError> {
        let submission = self.session.submit(user_text, self.clock.now())?;
        self.timer.arm();
        Ok(submission)
    }

    /// Waits out a pending auto-advance, then fetches the next question.
    ///
    /// Returns `Ok(None)` immediately when no advance is armed.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the delayed fetch fails.
    pub async fn auto_advance(&mut self) -> Result<Option<&Question>, FetchError> {
        if !self.timer.wait().await {
            return Ok(None);
        }
        self.load_next_question().await
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("question_count", &self.session.progress().question_count())
            .field("total_score", &self.session.progress().total_score())
            .field("fetch_in_flight", &self.fetch_in_flight)
            .field("advance_armed", &self.timer.is_armed())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
