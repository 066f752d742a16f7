use std::fmt;

//
// ─── BADGE ─────────────────────────────────────────────────────────────────────
//

/// Permanent achievement marker tied to a score or streak milestone.
///
/// Once earned, a badge is never revoked and never re-announced, even if a
/// later submission would re-trigger its condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Century,
    MathWizard,
    OnFire,
    Unstoppable,
}

impl Badge {
    /// Every badge, in award-evaluation order.
    pub const ALL: [Badge; 4] = [
        Badge::Century,
        Badge::MathWizard,
        Badge::OnFire,
        Badge::Unstoppable,
    ];

    /// Display name as announced in feedback text.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Badge::Century => "Century",
            Badge::MathWizard => "Math Wizard",
            Badge::OnFire => "On Fire",
            Badge::Unstoppable => "Unstoppable",
        }
    }

    /// Whether the milestone for this badge has been reached.
    #[must_use]
    pub fn earned_by(self, total_score: u64, consecutive_correct: u32) -> bool {
        match self {
            Badge::Century => total_score >= 100,
            Badge::MathWizard => total_score >= 500,
            Badge::OnFire => consecutive_correct >= 5,
            Badge::Unstoppable => consecutive_correct >= 10,
        }
    }

    /// Badges whose thresholds are crossed at the given score and streak,
    /// excluding any already held. Returned in `ALL` order.
    #[must_use]
    pub fn newly_earned(
        total_score: u64,
        consecutive_correct: u32,
        held: &BadgeSet,
    ) -> Vec<Badge> {
        Self::ALL
            .into_iter()
            .filter(|badge| {
                badge.earned_by(total_score, consecutive_correct) && !held.contains(*badge)
            })
            .collect()
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//
// ─── BADGE SET ─────────────────────────────────────────────────────────────────
//

/// Badges a session has earned so far, in award order.
///
/// The set only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeSet {
    earned: Vec<Badge>,
}

impl BadgeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, badge: Badge) -> bool {
        self.earned.contains(&badge)
    }

    /// Adds a badge unless it is already held. Returns whether it was added.
    pub fn insert(&mut self, badge: Badge) -> bool {
        if self.contains(badge) {
            return false;
        }
        self.earned.push(badge);
        true
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Badge] {
        &self.earned
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.earned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.earned.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
