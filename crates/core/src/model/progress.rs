use crate::model::{Badge, BadgeSet};

/// Score, streak, and badge bookkeeping for a quiz session.
///
/// Mutated only through the `record_*` transitions. The total score never
/// decreases and the badge set never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    total_score: u64,
    consecutive_correct: u32,
    last_awarded_points: Option<u32>,
    question_count: u32,
    badges: BadgeSet,
}

impl Progress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly loaded question becoming current.
    pub fn record_question_loaded(&mut self) {
        self.question_count = self.question_count.saturating_add(1);
    }

    /// Records a correct answer worth `points`, then evaluates badge
    /// milestones against the updated score and streak.
    ///
    /// Returns the badges newly earned by this answer, already added to the
    /// held set.
    pub fn record_correct(&mut self, points: u32) -> Vec<Badge> {
        self.total_score = self.total_score.saturating_add(u64::from(points));
        self.consecutive_correct = self.consecutive_correct.saturating_add(1);
        self.last_awarded_points = Some(points);

        let newly = Badge::newly_earned(self.total_score, self.consecutive_correct, &self.badges);
        for badge in &newly {
            self.badges.insert(*badge);
        }
        newly
    }

    /// Records an incorrect answer: the streak resets, score and badges are
    /// untouched.
    pub fn record_incorrect(&mut self) {
        self.consecutive_correct = 0;
    }

    // Accessors
    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    #[must_use]
    pub fn consecutive_correct(&self) -> u32 {
        self.consecutive_correct
    }

    /// Points awarded by the most recent correct answer, if any yet.
    #[must_use]
    pub fn last_awarded_points(&self) -> Option<u32> {
        self.last_awarded_points
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn badges(&self) -> &BadgeSet {
        &self.badges
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
