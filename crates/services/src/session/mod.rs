mod advance;
mod controller;
mod service;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use advance::{AUTO_ADVANCE_DELAY, AdvanceTimer};
pub use controller::QuizController;
pub use service::{QuizSession, Submission};
