//! All-Moves-As-First statistics
//!
//! The AMAF table is keyed by the cell a piece landed in and is shared by
//! the whole tree for one search: the same action anywhere in the game feeds
//! the same entry. It is created per search call and passed explicitly into
//! selection and backpropagation.

use std::collections::HashMap;

use crate::board::Action;
use crate::utils::win_rate;

/// Win/visit counters for one action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionStats {
    pub wins: u64,
    pub visits: u64,
}

impl ActionStats {
    /// Returns `wins / visits`, or 0 when unseen
    pub fn value(&self) -> f64 {
        win_rate(self.wins, self.visits)
    }
}

/// Global action statistics for one search
#[derive(Debug, Clone, Default)]
pub struct AmafTable {
    entries: HashMap<Action, ActionStats>,
}

impl AmafTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sample for `action`
    pub fn record(&mut self, action: Action, won: bool) {
        let entry = self.entries.entry(action).or_default();
        entry.visits += 1;
        if won {
            entry.wins += 1;
        }
    }

    /// Returns the counters for `action`, zero when unseen
    pub fn get(&self, action: Action) -> ActionStats {
        self.entries.get(&action).copied().unwrap_or_default()
    }

    /// Returns the AMAF win rate for `action`, 0 when unseen
    pub fn value(&self, action: Action) -> f64 {
        self.get(action).value()
    }

    /// Number of distinct actions seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no action has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all recorded actions
    pub fn iter(&self) -> impl Iterator<Item = (&Action, &ActionStats)> {
        self.entries.iter()
    }
}
