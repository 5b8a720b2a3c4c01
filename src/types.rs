//! Common Types and Constants
//!
//! Shared tunables, the error taxonomy, and the answer outcome payload used
//! across all algorithm modules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==================== Constants ====================

/// Neutral selection weight assigned to items never answered before
pub const W_NEUTRAL: f64 = 1.0;

/// Weight floor; strictly positive so no candidate is ever starved
pub const W_MIN: f64 = 0.25;

/// Weight ceiling
pub const W_MAX: f64 = 8.0;

/// Multiplicative weight boost applied on an incorrect answer
pub const WRONG_BOOST: f64 = 2.0;

/// Multiplicative weight decay applied on a correct answer
pub const CORRECT_DECAY: f64 = 0.7;

/// Minimum all-time attempts before an item can be classified mastered
pub const ATTEMPT_THRESHOLD: u32 = 10;

/// Minimum all-time accuracy for mastery (inclusive)
pub const ACCURACY_THRESHOLD: f64 = 0.90;

/// Default consecutive-correct streak that flips the question direction
pub const DEFAULT_FLIP_STREAK: u32 = 3;

/// Numerical stability epsilon
pub const EPSILON: f64 = 1e-10;

// ==================== Error Types ====================

/// Algorithm error taxonomy
///
/// Every variant signals a caller bug; numeric edge cases (zero-attempt
/// accuracy, degenerate total weight) resolve to documented safe defaults
/// instead of erroring.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgoError {
    #[error("candidate pool is empty")]
    EmptyCandidates,

    #[error("requested {requested} distinct draws but only {available} candidates are available")]
    DrawCountExceedsPool { requested: usize, available: usize },
}

pub type AlgoResult<T> = Result<T, AlgoError>;

// ==================== Outcome Payload ====================

/// Answer outcome reported after each question.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the learner answered correctly
    pub correct: bool,
    /// Per-question elapsed time, auxiliary payload only; never alters
    /// selection, weighting, mastery, or direction logic
    pub elapsed_ms: Option<u64>,
}

impl Outcome {
    /// A correct answer with no timing attached
    pub fn correct() -> Self {
        Self {
            correct: true,
            elapsed_ms: None,
        }
    }

    /// An incorrect answer with no timing attached
    pub fn wrong() -> Self {
        Self {
            correct: false,
            elapsed_ms: None,
        }
    }

    /// Attach the elapsed answer time
    pub fn with_elapsed(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }
}

// ==================== Unit Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(W_MIN > 0.0, "weight floor must be strictly positive");
        assert!(W_MIN < W_NEUTRAL && W_NEUTRAL < W_MAX);
        assert!(WRONG_BOOST > 1.0);
        assert!(CORRECT_DECAY > 0.0 && CORRECT_DECAY < 1.0);
        assert!(ACCURACY_THRESHOLD > 0.0 && ACCURACY_THRESHOLD <= 1.0);
        assert!(ATTEMPT_THRESHOLD > 0);
        assert!(DEFAULT_FLIP_STREAK > 0);
        assert!(EPSILON > 0.0 && EPSILON < 1e-6);
    }

    #[test]
    fn test_error_display() {
        let err = AlgoError::EmptyCandidates;
        assert_eq!(err.to_string(), "candidate pool is empty");

        let err = AlgoError::DrawCountExceedsPool {
            requested: 4,
            available: 3,
        };
        assert!(err.to_string().contains("4"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_outcome_constructors() {
        assert!(Outcome::correct().correct);
        assert!(!Outcome::wrong().correct);
        assert_eq!(Outcome::correct().elapsed_ms, None);

        let timed = Outcome::wrong().with_elapsed(2500);
        assert!(!timed.correct);
        assert_eq!(timed.elapsed_ms, Some(2500));
    }

    #[test]
    fn test_outcome_serde_roundtrip() {
        let outcome = Outcome::correct().with_elapsed(830);
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back.correct, outcome.correct);
        assert_eq!(back.elapsed_ms, outcome.elapsed_ms);
    }
}
