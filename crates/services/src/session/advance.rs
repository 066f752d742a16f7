use std::time::Duration;

use tokio::time::Instant;

/// Delay between a graded submission and the automatic fetch of the next
/// question.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_secs(2);

/// One-shot timer driving the post-answer auto-advance.
///
/// Armed after every graded submission; waiting consumes the deadline. There
/// is no cancellation: once armed, the delay always runs out.
#[derive(Debug)]
pub struct AdvanceTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl AdvanceTimer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arms the timer `delay` from now, replacing any prior deadline.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Sleeps until the armed deadline, consuming it.
    ///
    /// Returns whether the timer had been armed; when it was not, returns
    /// `false` immediately.
    pub async fn wait(&mut self) -> bool {
        match self.deadline.take() {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                true
            }
            None => false,
        }
    }
}

impl Default for AdvanceTimer {
    fn default() -> Self {
        Self::new(AUTO_ADVANCE_DELAY)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_without_arming_returns_immediately() {
        let mut timer = AdvanceTimer::new(Duration::from_secs(60));
        assert!(!timer.wait().await);
    }

    #[tokio::test]
    async fn armed_timer_waits_out_the_delay_once() {
        let delay = Duration::from_millis(20);
        let mut timer = AdvanceTimer::new(delay);

        timer.arm();
        assert!(timer.is_armed());

        let started = Instant::now();
        assert!(timer.wait().await);
        assert!(started.elapsed() >= delay);

        // deadline is consumed
        assert!(!timer.is_armed());
        assert!(!timer.wait().await);
    }

    #[tokio::test]
    async fn rearming_replaces_the_deadline() {
        let mut timer = AdvanceTimer::new(Duration::from_millis(10));
        timer.arm();
        timer.arm();

        assert!(timer.wait().await);
        assert!(!timer.is_armed());
    }
}
