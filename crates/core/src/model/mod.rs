mod badge;
mod feedback;
mod progress;
mod question;

pub use badge::{Badge, BadgeSet};
pub use feedback::{Feedback, FeedbackKind};
pub use progress::Progress;
pub use question::{Difficulty, Question, QuestionError, Topic};
