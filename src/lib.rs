//! # moji-algo - adaptive drill core for kana/kanji/vocabulary practice
//!
//! This crate provides the pure-Rust algorithms behind the quiz modes:
//!
//! - **Adaptive selection** - weighted item draws biased toward recent misses
//! - **Mastery classification** - all-time accuracy thresholds over the ledger
//! - **Smart reverse mode** - streak-driven question-direction control
//!
//! ## Design goals
//!
//! - **Pure Rust** - no UI or storage dependencies, usable from any host
//! - **Deterministic** - every randomized component takes a seed, so tests
//!   and replays are reproducible
//! - **Explicit state** - selectors, ledgers, and direction strategies are
//!   constructed per session and passed explicitly; no ambient globals
//! - **Well tested** - every module carries its own unit tests
//!
//! ## Module structure
//!
//! - [`selector`] - weighted adaptive item selection (prefix-sum draw,
//!   weight boost/decay, multi-slot draws, distractors)
//! - [`ledger`] - lifetime correct/incorrect counters per item
//! - [`mastery`] - mastered-set read-model over the ledger
//! - [`direction`] - forward/reverse direction strategies
//! - [`session`] - per-session glue wiring the components together
//! - [`types`] - shared constants, errors, and the outcome payload
//!
//! ## Usage example
//!
//! ```rust
//! use moji_algo::{DrillSession, Outcome, SessionOptions};
//!
//! let mut session = DrillSession::with_options(SessionOptions {
//!     seed: Some(42),
//!     ..Default::default()
//! });
//!
//! let question = session.next_question(&["あ", "い", "う"]).unwrap();
//! session.submit_answer(&question.item_id, Outcome::correct().with_elapsed(1200));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

pub mod direction;
pub mod ledger;
pub mod mastery;
pub mod selector;
pub mod session;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::{AlgoError, AlgoResult, Outcome};

pub use direction::{Direction, DirectionStrategy, FixedDirection, RandomDirection, SmartReverse};

pub use ledger::{LedgerEntry, LedgerState, PerformanceLedger};

pub use mastery::{compute_mastered, is_mastered, is_set_mastered};

pub use selector::{AdaptiveSelector, ItemStat, SelectorOptions, SelectorState};

pub use session::{DrillSession, Question, SessionOptions, WordQuestion};
