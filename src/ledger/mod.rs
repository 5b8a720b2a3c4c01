//! Performance Ledger
//!
//! All-time per-item answer counters: the persisted substrate that mastery
//! classification reads. Entries are created lazily on first sighting and
//! counters only ever grow; the ledger itself never shrinks.
//!
//! The ledger is deliberately independent of the selector's weight table:
//! weights are a session-tuning signal, while these counters are the
//! lifetime record the host app persists between sessions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Outcome;

/// All-time counters for one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Correct answers, never decremented
    pub correct: u32,
    /// Incorrect answers, never decremented
    pub incorrect: u32,
}

impl LedgerEntry {
    /// Total recorded attempts
    pub fn attempts(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// All-time accuracy in [0, 1]; defined as 0.0 at zero attempts
    pub fn accuracy(&self) -> f64 {
        let attempts = self.attempts();
        if attempts == 0 {
            0.0
        } else {
            self.correct as f64 / attempts as f64
        }
    }
}

/// Serializable ledger snapshot for persistence
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerState {
    /// Version number (for migration)
    pub version: String,
    /// Entries (JSON serialized)
    pub entries_json: String,
}

/// Mapping from item identifier to lifetime answer counters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PerformanceLedger {
    entries: HashMap<String, LedgerEntry>,
}

impl PerformanceLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answer outcome for an item, creating its entry lazily
    pub fn record(&mut self, id: &str, outcome: Outcome) {
        let entry = self.entries.entry(id.to_string()).or_default();
        if outcome.correct {
            entry.correct += 1;
        } else {
            entry.incorrect += 1;
        }
    }

    /// Counters for an item; zeroed entry for ids never recorded
    pub fn entry(&self, id: &str) -> LedgerEntry {
        self.entries.get(id).copied().unwrap_or_default()
    }

    /// Number of items with at least one recorded attempt
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the full entry map (used by batch classification)
    pub fn entries(&self) -> &HashMap<String, LedgerEntry> {
        &self.entries
    }

    /// Get serializable state for persistence
    pub fn get_state(&self) -> LedgerState {
        LedgerState {
            version: "1.0.0".to_string(),
            entries_json: serde_json::to_string(&self.entries).unwrap_or_default(),
        }
    }

    /// Restore state from serialized data
    ///
    /// Malformed snapshots are ignored and leave the ledger untouched.
    pub fn set_state(&mut self, state: LedgerState) {
        match serde_json::from_str::<HashMap<String, LedgerEntry>>(&state.entries_json) {
            Ok(entries) => self.entries = entries,
            Err(err) => {
                tracing::warn!(error = %err, version = %state.version, "ledger snapshot rejected");
            }
        }
    }
}

// ==================== Unit Tests ====================
