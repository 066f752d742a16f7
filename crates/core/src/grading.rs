use thiserror::Error;

use crate::model::Topic;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("invalid numeric input: {0}")]
    InvalidNumericInput(String),
}

//
// ─── GRADING ───────────────────────────────────────────────────────────────────
//

/// Absolute difference below which two numeric answers count as equal.
///
/// The comparison is strictly less-than: a difference of exactly 0.01 is
/// incorrect.
pub const NUMERIC_TOLERANCE: f64 = 0.01;

/// Valid letters for a multiple-choice answer.
const CHOICE_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Outcome of grading a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Grades a user's free-text answer against the expected answer under the
/// topic's comparison rule.
///
/// - `Algebra`, `Arithmetic`: exact match after trimming and lowercasing
///   both sides.
/// - `Calculus`: multiple choice. Correct iff the input, uppercased, is one
///   of A-D and equals the uppercased expected answer. Any other input is
///   incorrect rather than an error. Whitespace is not forgiven here.
/// - `Geometry`, `Trigonometry`: both sides are parsed as floating-point
///   numbers and compared within [`NUMERIC_TOLERANCE`].
///
/// # Examples
///
/// ```
/// # use drill_core::grading::{grade, Verdict};
/// # use drill_core::model::Topic;
/// let verdict = grade(Topic::Algebra, "  X = 5 ", "x = 5")?;
/// assert_eq!(verdict, Verdict::Correct);
/// # Ok::<(), drill_core::grading::GradeError>(())
/// ```
///
/// # Errors
///
/// Returns `GradeError::InvalidNumericInput` on the numeric path when either
/// side fails to parse as a number or parses to `NaN`.
pub fn grade(topic: Topic, user_text: &str, expected: &str) -> Result<Verdict, GradeError> {
    let correct = match topic {
        Topic::Algebra | Topic::Arithmetic => {
            user_text.trim().to_lowercase() == expected.trim().to_lowercase()
        }
        Topic::Calculus => {
            let choice = user_text.to_uppercase();
            CHOICE_LETTERS.contains(&choice.as_str()) && choice == expected.to_uppercase()
        }
        Topic::Geometry | Topic::Trigonometry => {
            let user_value = parse_numeric(user_text)?;
            let expected_value = parse_numeric(expected)?;
            (user_value - expected_value).abs() < NUMERIC_TOLERANCE
        }
    };

    Ok(if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    })
}

fn parse_numeric(text: &str) -> Result<f64, GradeError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| GradeError::InvalidNumericInput(text.to_owned()))?;
    // "NaN" parses but cannot be meaningfully compared.
    if value.is_nan() {
        return Err(GradeError::InvalidNumericInput(text.to_owned()));
    }
    Ok(value)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
