//! Drill Session
//!
//! The control-flow glue around the algorithm components: a session asks
//! its direction strategy for the current direction, draws the next item
//! from the adaptive selector, and on answer submission fans the outcome
//! out to the selector (weight), the ledger (counters), and the direction
//! strategy (streak), in that order.
//!
//! Everything runs synchronously within the caller's answer handler; each
//! session exclusively owns its selector, ledger, and strategy instances,
//! so no locking is involved.

use std::collections::HashSet;

use crate::direction::{Direction, DirectionStrategy, FixedDirection, SmartReverse};
use crate::ledger::PerformanceLedger;
use crate::mastery;
use crate::selector::{AdaptiveSelector, SelectorOptions};
use crate::types::{AlgoResult, Outcome, DEFAULT_FLIP_STREAK};

// ==================== Configuration ====================

/// Session configuration options
#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Consecutive-correct streak that flips the question direction
    pub flip_streak: u32,
    /// Fixed direction override; disables smart reverse entirely when set
    pub fixed_direction: Option<Direction>,
    /// Random seed for reproducibility (optional)
    pub seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            flip_streak: DEFAULT_FLIP_STREAK,
            fixed_direction: None,
            seed: None,
        }
    }
}

// ==================== Question Types ====================

/// A single-item question
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub item_id: String,
    pub direction: Direction,
}

/// A multi-slot question (e.g. a three-character word built from the pool)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordQuestion {
    pub item_ids: Vec<String>,
    pub direction: Direction,
}

// ==================== Main Implementation ====================

/// One quiz session: selector + ledger + direction strategy.
pub struct DrillSession {
    selector: AdaptiveSelector,
    ledger: PerformanceLedger,
    strategy: Box<dyn DirectionStrategy + Send>,
}

impl DrillSession {
    /// Create a session with default options
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    /// Create a session from configuration
    pub fn with_options(options: SessionOptions) -> Self {
        let strategy: Box<dyn DirectionStrategy + Send> = match options.fixed_direction {
            Some(direction) => Box::new(FixedDirection::new(direction)),
            None => Box::new(SmartReverse::with_flip_streak(options.flip_streak)),
        };

        let selector = AdaptiveSelector::with_options(SelectorOptions {
            seed: options.seed,
            ..Default::default()
        });

        Self {
            selector,
            ledger: PerformanceLedger::new(),
            strategy,
        }
    }

    /// Create a session over pre-built components (custom strategies,
    /// restored selector/ledger state)
    pub fn with_parts(
        selector: AdaptiveSelector,
        ledger: PerformanceLedger,
        strategy: Box<dyn DirectionStrategy + Send>,
    ) -> Self {
        Self {
            selector,
            ledger,
            strategy,
        }
    }

    // ==================== Question Flow ====================

    /// Draw the next question from the candidate pool
    pub fn next_question<S: AsRef<str>>(&mut self, candidates: &[S]) -> AlgoResult<Question> {
        let direction = self.strategy.current();
        let item_id = self.selector.select_weighted(candidates)?;
        Ok(Question { item_id, direction })
    }

    /// Draw a multi-slot question of `len` distinct items
    pub fn next_word_question<S: AsRef<str>>(
        &mut self,
        candidates: &[S],
        len: usize,
    ) -> AlgoResult<WordQuestion> {
        let direction = self.strategy.current();
        let item_ids = self.selector.select_distinct(candidates, len)?;
        Ok(WordQuestion {
            item_ids,
            direction,
        })
    }

    /// Draw up to `n` distractors for a multiple-choice rendering
    pub fn distractors<S: AsRef<str>>(
        &mut self,
        pool: &[S],
        answer_id: &str,
        n: usize,
    ) -> Vec<String> {
        self.selector.distractors(pool, answer_id, n)
    }

    /// Report an answer outcome for one item.
    ///
    /// Updates the selection weight, the lifetime counters, and the
    /// direction streak; elapsed time in the outcome is carried as payload
    /// only.
    pub fn submit_answer(&mut self, item_id: &str, outcome: Outcome) {
        self.selector.update_weight(item_id, outcome.correct);
        self.ledger.record(item_id, outcome);
        self.strategy.record_answer(outcome.correct);
    }

    // ==================== Queries ====================

    /// Direction the next question will use
    pub fn direction(&self) -> Direction {
        self.strategy.current()
    }

    /// Mastered items, derived fresh from this session's ledger
    pub fn mastered(&self) -> HashSet<String> {
        mastery::compute_mastered(&self.ledger)
    }

    /// Whether every id in the list is mastered
    pub fn is_set_mastered<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        mastery::is_set_mastered(&self.ledger, ids)
    }

    pub fn selector(&self) -> &AdaptiveSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut AdaptiveSelector {
        &mut self.selector
    }

    pub fn ledger(&self) -> &PerformanceLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut PerformanceLedger {
        &mut self.ledger
    }
}

impl Default for DrillSession {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Unit Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::W_NEUTRAL;

    fn seeded() -> DrillSession {
        DrillSession::with_options(SessionOptions {
            seed: Some(42),
            ..Default::default()
        })
    }

    #[test]
    fn test_submit_answer_updates_all_three_components() {
        let mut session = seeded();
        let question = session.next_question(&["あ", "い", "う"]).unwrap();

        session.submit_answer(&question.item_id, Outcome::wrong().with_elapsed(1800));

        assert!(session.selector().weight_of(&question.item_id) > W_NEUTRAL);
        assert_eq!(session.ledger().entry(&question.item_id).incorrect, 1);
        // wrong answer: streak stays reset, direction unchanged
        assert_eq!(session.direction(), Direction::Forward);
    }

    #[test]
    fn test_direction_follows_streak_across_questions() {
        let mut session = seeded();
        let pool = vec!["a", "b", "c"];

        for _ in 0..3 {
            let question = session.next_question(&pool).unwrap();
            assert_eq!(question.direction, Direction::Forward);
            session.submit_answer(&question.item_id, Outcome::correct());
        }

        let question = session.next_question(&pool).unwrap();
        assert_eq!(question.direction, Direction::Reverse);
    }

    #[test]
    fn test_fixed_direction_override_disables_controller() {
        let mut session = DrillSession::with_options(SessionOptions {
            fixed_direction: Some(Direction::Reverse),
            seed: Some(42),
            ..Default::default()
        });
        let pool = vec!["a", "b"];

        for _ in 0..10 {
            let question = session.next_question(&pool).unwrap();
            assert_eq!(question.direction, Direction::Reverse);
            session.submit_answer(&question.item_id, Outcome::correct());
        }
    }

    #[test]
    fn test_word_question_draws_distinct_items() {
        let mut session = seeded();
        let pool = vec!["k", "a", "n", "j", "i"];

        let word = session.next_word_question(&pool, 3).unwrap();
        assert_eq!(word.item_ids.len(), 3);
        let unique: HashSet<&String> = word.item_ids.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_word_question_rejects_short_pool() {
        let mut session = seeded();
        assert!(session.next_word_question(&["a", "b"], 3).is_err());
    }

    #[test]
    fn test_mastery_queries_read_the_session_ledger() {
        let mut session = seeded();

        for _ in 0..10 {
            session.submit_answer("日", Outcome::correct());
        }
        session.submit_answer("月", Outcome::wrong());

        assert!(session.mastered().contains("日"));
        assert!(session.is_set_mastered(&["日"]));
        assert!(!session.is_set_mastered(&["日", "月"]));
    }

    #[test]
    fn test_custom_strategy_injection() {
        let session = DrillSession::with_parts(
            AdaptiveSelector::with_seed(1),
            PerformanceLedger::new(),
            Box::new(FixedDirection::new(Direction::Reverse)),
        );
        assert_eq!(session.direction(), Direction::Reverse);
    }
}
