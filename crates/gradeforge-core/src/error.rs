//! Input validation errors.
//!
//! Every operation in this crate distinguishes malformed input (an error)
//! from "no results" (an empty result set). An infeasible target or an
//! exhausted search is never an error.

use thiserror::Error;

/// Errors raised by grade-scale construction, GPA metrics, and the simulator.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The weight list does not match the declared course count.
    #[error("expected {expected} credit-unit entries, got {actual}")]
    CreditUnitMismatch { expected: usize, actual: usize },

    /// A credit unit of zero (credit units are positive integers).
    #[error("credit units must be positive (course {position})")]
    NonPositiveCreditUnit { position: usize },

    /// Credit units for a CGPA update must be positive.
    #[error("new credit units must be positive")]
    NoNewCreditUnits,

    /// A grade letter not present in the scale.
    #[error("unknown grade letter: {0}")]
    UnknownGrade(String),

    /// A grade scale with no entries.
    #[error("grade scale must contain at least one letter")]
    EmptyScale,

    /// The same letter appears twice in a scale.
    #[error("duplicate grade letter: {0}")]
    DuplicateLetter(String),

    /// A grade-point value outside the valid numeric range.
    #[error("grade points for '{letter}' must be finite and non-negative, got {points}")]
    InvalidPoints { letter: String, points: f64 },
}

impl GradeError {
    /// Returns `true` if this error came from a malformed request rather
    /// than a malformed scale definition.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            GradeError::CreditUnitMismatch { .. }
                | GradeError::NonPositiveCreditUnit { .. }
                | GradeError::NoNewCreditUnits
                | GradeError::UnknownGrade(_)
        )
    }
}
