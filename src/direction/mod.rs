//! Question Direction Control ("smart reverse mode")
//!
//! Decides, independent of item content, whether the next question asks in
//! the forward direction (symbol → reading) or the reverse (reading →
//! symbol).
//!
//! The default strategy flips direction only after a sustained streak of
//! consecutive correct answers in the current direction; a single miss
//! resets the streak without flipping, so one unlucky guess never changes
//! what is being tested. Alternate strategies (a fixed external override, a
//! random coin flip) sit behind the same trait and are chosen per session
//! by configuration.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_FLIP_STREAK;

// ==================== Data Structures ====================

/// Question direction flag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Per-session direction decision strategy.
///
/// `record_answer` is evaluated once per answer submission; `current`
/// reports the direction for the next question.
pub trait DirectionStrategy {
    fn current(&self) -> Direction;
    fn record_answer(&mut self, correct: bool);
}

// ==================== Smart Reverse ====================

/// Streak-driven two-state machine: `Forward ↔ Reverse`.
///
/// Starts in `Forward` with streak 0. A correct answer increments the
/// streak; reaching the configured threshold flips the direction and resets
/// the streak. A wrong answer resets the streak without flipping.
#[derive(Clone, Debug)]
pub struct SmartReverse {
    direction: Direction,
    streak: u32,
    flip_streak: u32,
}

impl SmartReverse {
    /// Create a controller with the default flip threshold
    pub fn new() -> Self {
        Self::with_flip_streak(DEFAULT_FLIP_STREAK)
    }

    /// Create a controller with a custom flip threshold (minimum 1)
    pub fn with_flip_streak(flip_streak: u32) -> Self {
        Self {
            direction: Direction::Forward,
            streak: 0,
            flip_streak: flip_streak.max(1),
        }
    }

    /// Current consecutive-correct streak in the current direction
    pub fn streak(&self) -> u32 {
        self.streak
    }
}

impl Default for SmartReverse {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionStrategy for SmartReverse {
    fn current(&self) -> Direction {
        self.direction
    }

    fn record_answer(&mut self, correct: bool) {
        if correct {
            self.streak += 1;
            if self.streak >= self.flip_streak {
                self.direction = self.direction.flip();
                self.streak = 0;
                tracing::debug!(direction = ?self.direction, "direction flipped after streak");
            }
        } else {
            self.streak = 0;
        }
    }
}

// ==================== Fixed Override ====================

/// External override: a caller-supplied fixed direction.
///
/// The streak transition rule does not run; answers are ignored.
#[derive(Clone, Copy, Debug)]
pub struct FixedDirection {
    direction: Direction,
}

impl FixedDirection {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl DirectionStrategy for FixedDirection {
    fn current(&self) -> Direction {
        self.direction
    }

    fn record_answer(&mut self, _correct: bool) {}
}

// ==================== Random ====================

/// Coin-flip strategy: re-rolls the direction after every answer.
#[derive(Clone, Debug)]
pub struct RandomDirection {
    direction: Direction,
    rng: ChaCha8Rng,
}

impl RandomDirection {
    pub fn new() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            direction: Direction::Forward,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDirection {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionStrategy for RandomDirection {
    fn current(&self) -> Direction {
        self.direction
    }

    fn record_answer(&mut self, _correct: bool) {
        self.direction = if self.rng.gen::<bool>() {
            Direction::Forward
        } else {
            Direction::Reverse
        };
    }
}

// ==================== Unit Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_forward_with_zero_streak() {
        let controller = SmartReverse::new();
        assert_eq!(controller.current(), Direction::Forward);
        assert_eq!(controller.streak(), 0);
    }

    #[test]
    fn test_three_correct_answers_flip_and_reset() {
        let mut controller = SmartReverse::with_flip_streak(3);

        controller.record_answer(true);
        controller.record_answer(true);
        assert_eq!(controller.current(), Direction::Forward);
        assert_eq!(controller.streak(), 2);

        controller.record_answer(true);
        assert_eq!(controller.current(), Direction::Reverse);
        assert_eq!(controller.streak(), 0, "streak resets on flip");
    }

    #[test]
    fn test_wrong_answer_resets_streak_without_flipping() {
        let mut controller = SmartReverse::with_flip_streak(3);

        controller.record_answer(true);
        controller.record_answer(true);
        controller.record_answer(false);

        assert_eq!(controller.current(), Direction::Forward, "a miss never flips");
        assert_eq!(controller.streak(), 0);
    }

    #[test]
    fn test_flips_back_after_second_streak() {
        let mut controller = SmartReverse::with_flip_streak(2);

        controller.record_answer(true);
        controller.record_answer(true);
        assert_eq!(controller.current(), Direction::Reverse);

        controller.record_answer(true);
        controller.record_answer(true);
        assert_eq!(controller.current(), Direction::Forward);
    }

    #[test]
    fn test_flip_streak_floor_is_one() {
        let mut controller = SmartReverse::with_flip_streak(0);
        controller.record_answer(true);
        assert_eq!(controller.current(), Direction::Reverse, "threshold floors at 1");
    }

    #[test]
    fn test_fixed_direction_ignores_answers() {
        let mut controller = FixedDirection::new(Direction::Reverse);

        for _ in 0..10 {
            controller.record_answer(true);
        }
        controller.record_answer(false);

        assert_eq!(controller.current(), Direction::Reverse);
    }

    #[test]
    fn test_random_direction_is_seed_reproducible() {
        let mut r1 = RandomDirection::with_seed(42);
        let mut r2 = RandomDirection::with_seed(42);

        assert_eq!(r1.current(), Direction::Forward, "starts forward");
        for _ in 0..50 {
            r1.record_answer(true);
            r2.record_answer(false);
            assert_eq!(r1.current(), r2.current(), "direction ignores correctness");
        }
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(Direction::Forward.flip(), Direction::Reverse);
        assert_eq!(Direction::Reverse.flip(), Direction::Forward);
    }
}
