#![forbid(unsafe_code)]

pub mod error;
pub mod session;

pub use drill_core::Clock;

pub use error::SessionError;
pub use session::{AUTO_ADVANCE_DELAY, AdvanceTimer, QuizController, QuizSession, Submission};
