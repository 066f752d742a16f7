#![forbid(unsafe_code)]

pub mod http;
pub mod source;

pub use http::{HttpQuestionSource, QuestionRecord, QuestionServiceConfig};
pub use source::{FetchError, QuestionSource, ScriptedQuestionSource};
