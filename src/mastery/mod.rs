//! Mastery Classification
//!
//! Pure read-model over the performance ledger: an item is mastered iff it
//! has at least [`ATTEMPT_THRESHOLD`] all-time attempts and its all-time
//! accuracy is at least [`ACCURACY_THRESHOLD`]. Both bounds are inclusive.
//!
//! Nothing here is incrementally maintained; callers recompute membership
//! from current ledger state whenever they need it. Classification always
//! reads the persisted all-time counters, never in-session selector weights.

use rayon::prelude::*;
use std::collections::HashSet;

use crate::ledger::{LedgerEntry, PerformanceLedger};
use crate::types::{ACCURACY_THRESHOLD, ATTEMPT_THRESHOLD};

/// Whether a single entry meets the mastery thresholds.
///
/// Zero attempts means undefined accuracy, treated as 0, so never mastered.
pub fn is_mastered(entry: &LedgerEntry) -> bool {
    entry.attempts() >= ATTEMPT_THRESHOLD && entry.accuracy() >= ACCURACY_THRESHOLD
}

/// The set of mastered item ids, derived fresh from the ledger.
pub fn compute_mastered(ledger: &PerformanceLedger) -> HashSet<String> {
    ledger
        .entries()
        .par_iter()
        .filter(|(_, entry)| is_mastered(entry))
        .map(|(id, _)| id.clone())
        .collect()
}

/// Whether every id in the list is mastered.
///
/// An empty id list is vacuously mastered, matching the "fully mastered
/// set" definition used by set filters in the UI.
pub fn is_set_mastered<S: AsRef<str>>(ledger: &PerformanceLedger, ids: &[S]) -> bool {
    ids.iter()
        .all(|id| is_mastered(&ledger.entry(id.as_ref())))
}

// ==================== Unit Tests ====================
