//! Adaptive Weighted Selection
//!
//! This module implements the weighted item draw at the heart of every quiz
//! mode.
//!
//! Core principles:
//! - Each item carries a selection weight in `[W_MIN, W_MAX]`, starting at a
//!   neutral default for unseen items
//! - A draw picks one candidate with probability `weight(c) / Σ weight`,
//!   giving a spaced-repetition-like bias: recently missed items are
//!   statistically overrepresented, well-known items decay toward the floor
//!   but never reach zero probability
//! - An incorrect answer multiplies the weight by a boost factor, a correct
//!   answer by a decay factor, both clamped to the bounds
//!
//! Draws use a cumulative prefix-sum array with binary search, so a draw is
//! O(log n) after an O(n) build and fully deterministic under a seeded RNG.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::types::{
    AlgoError, AlgoResult, CORRECT_DECAY, EPSILON, WRONG_BOOST, W_MAX, W_MIN, W_NEUTRAL,
};

// ==================== Data Structures ====================

/// Per-item selection statistics, created lazily on first sighting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ItemStat {
    /// In-session correct answers
    pub correct: u32,
    /// In-session incorrect answers
    pub incorrect: u32,
    /// Current selection weight, always finite and within bounds
    pub weight: f64,
    /// Monotonic tick of the last presentation (0 = never presented)
    pub last_seen_at: u64,
}

impl Default for ItemStat {
    fn default() -> Self {
        Self {
            correct: 0,
            incorrect: 0,
            weight: W_NEUTRAL,
            last_seen_at: 0,
        }
    }
}

/// Selector configuration options
#[derive(Clone, Debug)]
pub struct SelectorOptions {
    /// Weight assigned to unseen items (default: 1.0)
    pub neutral_weight: f64,
    /// Weight floor, must stay strictly positive (default: 0.25)
    pub min_weight: f64,
    /// Weight ceiling (default: 8.0)
    pub max_weight: f64,
    /// Multiplicative boost on incorrect answers (default: 2.0)
    pub wrong_boost: f64,
    /// Multiplicative decay on correct answers (default: 0.7)
    pub correct_decay: f64,
    /// Random seed for reproducibility (optional)
    pub seed: Option<u64>,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            neutral_weight: W_NEUTRAL,
            min_weight: W_MIN,
            max_weight: W_MAX,
            wrong_boost: WRONG_BOOST,
            correct_decay: CORRECT_DECAY,
            seed: None,
        }
    }
}

/// Serializable selector snapshot
///
/// Whether the weight table survives across sessions is a host decision;
/// this snapshot is the capability, not the policy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectorState {
    /// Version number (for migration)
    pub version: String,
    /// Monotonic presentation clock
    pub clock: u64,
    /// Item statistics (JSON serialized)
    pub stats_json: String,
}

// ==================== Main Implementation ====================

/// Weighted adaptive item selector.
///
/// Owns the per-item weight table and a seeded RNG; one instance per
/// session, mutated only by the session's own answer handlers.
#[derive(Clone, Debug)]
pub struct AdaptiveSelector {
    /// Item statistics (indexed by item id)
    stats: HashMap<String, ItemStat>,
    /// Random number generator
    rng: ChaCha8Rng,
    /// Monotonic presentation clock, bumped on every mark_seen
    clock: u64,
    neutral_weight: f64,
    min_weight: f64,
    max_weight: f64,
    wrong_boost: f64,
    correct_decay: f64,
}

impl AdaptiveSelector {
    /// Create a new selector with default options
    pub fn new() -> Self {
        Self::with_options(SelectorOptions::default())
    }

    /// Create a new selector with custom options
    pub fn with_options(options: SelectorOptions) -> Self {
        let seed = options.seed.unwrap_or_else(|| {
            // Use system time as default seed
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        let min_weight = options.min_weight.max(EPSILON);
        let max_weight = options.max_weight.max(min_weight);

        Self {
            stats: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: 0,
            neutral_weight: options.neutral_weight.clamp(min_weight, max_weight),
            min_weight,
            max_weight,
            wrong_boost: options.wrong_boost,
            correct_decay: options.correct_decay,
        }
    }

    /// Create a new selector with a specific seed (for testing)
    pub fn with_seed(seed: u64) -> Self {
        Self::with_options(SelectorOptions {
            seed: Some(seed),
            ..Default::default()
        })
    }

    // ==================== Selection ====================

    /// Draw one candidate with probability proportional to its weight.
    ///
    /// The drawn item is marked seen. Errors with
    /// [`AlgoError::EmptyCandidates`] on an empty pool; a degenerate total
    /// weight falls back to a uniform draw.
    pub fn select_weighted<S: AsRef<str>>(&mut self, candidates: &[S]) -> AlgoResult<String> {
        if candidates.is_empty() {
            return Err(AlgoError::EmptyCandidates);
        }

        // Cumulative prefix sums over current weights
        let mut prefix = Vec::with_capacity(candidates.len());
        let mut total = 0.0_f64;
        for candidate in candidates {
            total += self.weight_of(candidate.as_ref());
            prefix.push(total);
        }

        let index = if total.is_finite() && total > EPSILON {
            let target = self.rng.gen::<f64>() * total;
            // First prefix strictly above the target
            prefix
                .partition_point(|&p| p <= target)
                .min(candidates.len() - 1)
        } else {
            tracing::warn!(total, "degenerate total weight, falling back to uniform draw");
            self.rng.gen_range(0..candidates.len())
        };

        let id = candidates[index].as_ref().to_string();
        self.mark_seen(&id);
        Ok(id)
    }

    /// Draw `n` distinct candidates without replacement.
    ///
    /// Already-drawn ids are removed from the working pool before the next
    /// draw, so a multi-slot question (e.g. a three-character word) never
    /// repeats an item within the batch. Duplicate candidate ids are
    /// collapsed before counting the pool.
    pub fn select_distinct<S: AsRef<str>>(
        &mut self,
        candidates: &[S],
        n: usize,
    ) -> AlgoResult<Vec<String>> {
        let mut dedup = HashSet::new();
        let mut pool: Vec<&str> = candidates
            .iter()
            .map(|c| c.as_ref())
            .filter(|id| dedup.insert(*id))
            .collect();

        if pool.is_empty() {
            return Err(AlgoError::EmptyCandidates);
        }
        if n > pool.len() {
            return Err(AlgoError::DrawCountExceedsPool {
                requested: n,
                available: pool.len(),
            });
        }

        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let picked = self.select_weighted(&pool)?;
            pool.retain(|id| *id != picked);
            drawn.push(picked);
        }
        Ok(drawn)
    }

    /// Draw up to `n` distractors from the pool, excluding the answer id.
    ///
    /// A small pool legitimately yields fewer than `n` distractors; that is
    /// a smaller result set, not an error.
    pub fn distractors<S: AsRef<str>>(
        &mut self,
        pool: &[S],
        answer_id: &str,
        n: usize,
    ) -> Vec<String> {
        let mut dedup = HashSet::new();
        let mut working: Vec<&str> = pool
            .iter()
            .map(|c| c.as_ref())
            .filter(|id| *id != answer_id && dedup.insert(*id))
            .collect();

        let take = n.min(working.len());
        let mut drawn = Vec::with_capacity(take);
        for _ in 0..take {
            match self.select_weighted(&working) {
                Ok(picked) => {
                    working.retain(|id| *id != picked);
                    drawn.push(picked);
                }
                Err(_) => break,
            }
        }
        drawn
    }

    // ==================== Updates ====================

    /// Record that an item was presented: bumps the monotonic clock and
    /// stamps the item. Never touches counters or weight.
    pub fn mark_seen(&mut self, id: &str) {
        self.clock += 1;
        let tick = self.clock;
        let neutral = self.neutral_weight;
        let stat = self
            .stats
            .entry(id.to_string())
            .or_insert_with(|| ItemStat {
                weight: neutral,
                ..ItemStat::default()
            });
        stat.last_seen_at = tick;
    }

    /// Adjust an item's weight after an answer.
    ///
    /// Incorrect multiplies by the boost factor (capped at the ceiling),
    /// correct multiplies by the decay factor (floored). Repeated wrong
    /// answers therefore diverge to a strictly higher selection probability
    /// than repeated right answers for any pool containing both.
    pub fn update_weight(&mut self, id: &str, was_correct: bool) {
        let (min, max) = (self.min_weight, self.max_weight);
        let (boost, decay) = (self.wrong_boost, self.correct_decay);
        let neutral = self.neutral_weight;

        let stat = self
            .stats
            .entry(id.to_string())
            .or_insert_with(|| ItemStat {
                weight: neutral,
                ..ItemStat::default()
            });

        if was_correct {
            stat.correct += 1;
            stat.weight = (stat.weight * decay).max(min);
        } else {
            stat.incorrect += 1;
            stat.weight = (stat.weight * boost).min(max);
        }
        tracing::debug!(id, weight = stat.weight, was_correct, "weight updated");
    }

    // ==================== Query Methods ====================

    /// Current weight for an item; the neutral default for unseen ids
    pub fn weight_of(&self, id: &str) -> f64 {
        self.stats
            .get(id)
            .map(|s| s.weight)
            .unwrap_or(self.neutral_weight)
    }

    /// Set an item's weight directly (clamped to the configured bounds)
    pub fn set_weight(&mut self, id: &str, weight: f64) {
        let (min, max) = (self.min_weight, self.max_weight);
        let neutral = self.neutral_weight;
        let stat = self
            .stats
            .entry(id.to_string())
            .or_insert_with(|| ItemStat {
                weight: neutral,
                ..ItemStat::default()
            });
        stat.weight = if weight.is_finite() {
            weight.clamp(min, max)
        } else {
            neutral
        };
    }

    /// Full statistics for an item; zeroed default for unseen ids
    pub fn stat(&self, id: &str) -> ItemStat {
        self.stats.get(id).copied().unwrap_or_else(|| ItemStat {
            weight: self.neutral_weight,
            ..ItemStat::default()
        })
    }

    /// Number of items with recorded statistics
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    // ==================== State Management ====================

    /// Get serializable state for persistence
    pub fn get_state(&self) -> SelectorState {
        SelectorState {
            version: "1.0.0".to_string(),
            clock: self.clock,
            stats_json: serde_json::to_string(&self.stats).unwrap_or_default(),
        }
    }

    /// Restore state from serialized data
    ///
    /// Restored weights are re-clamped to the configured bounds; malformed
    /// snapshots are ignored.
    pub fn set_state(&mut self, state: SelectorState) {
        match serde_json::from_str::<HashMap<String, ItemStat>>(&state.stats_json) {
            Ok(stats) => {
                let (min, max) = (self.min_weight, self.max_weight);
                let neutral = self.neutral_weight;
                self.stats = stats
                    .into_iter()
                    .map(|(id, mut stat)| {
                        stat.weight = if stat.weight.is_finite() {
                            stat.weight.clamp(min, max)
                        } else {
                            neutral
                        };
                        (id, stat)
                    })
                    .collect();
                self.clock = state.clock;
            }
            Err(err) => {
                tracing::warn!(error = %err, version = %state.version, "selector snapshot rejected");
            }
        }
    }

    /// Set random seed (for testing)
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

impl Default for AdaptiveSelector {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Unit Tests ====================
