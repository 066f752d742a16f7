use crate::model::Badge;

/// Whether feedback reports a correct or an incorrect answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

/// Transient feedback shown after grading a submission.
///
/// Recomputed on every submission and cleared when the next question loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    /// Feedback for a correct answer worth `points`.
    #[must_use]
    pub fn correct(points: u32) -> Self {
        Self {
            text: format!("Correct! You earned {points} points."),
            kind: FeedbackKind::Correct,
        }
    }

    /// Feedback for an incorrect answer, revealing the expected answer when
    /// one is known.
    #[must_use]
    pub fn incorrect(answer: Option<&str>) -> Self {
        let text = match answer {
            Some(answer) => format!("Incorrect. The correct answer is {answer}"),
            None => "Incorrect. Please try again.".to_owned(),
        };
        Self {
            text,
            kind: FeedbackKind::Incorrect,
        }
    }

    /// Appends the badge announcement for newly earned badges.
    ///
    /// Does nothing when `badges` is empty.
    pub fn append_badges(&mut self, badges: &[Badge]) {
        if badges.is_empty() {
            return;
        }
        let names: Vec<&str> = badges.iter().map(|badge| badge.name()).collect();
        self.text
            .push_str(&format!(" You earned new badge(s): {}!", names.join(", ")));
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
