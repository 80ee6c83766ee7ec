//! What a finished search looked like
//!
//! Besides timing, the statistics keep how the root's visits were spread
//! over the columns, which is what the final move is read from.

use std::fmt::Write;
use std::time::Duration;

use crate::board::COLS;

/// Statistics collected during a search
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Name of the selection policy that drove the search
    pub variant: &'static str,

    /// Number of completed iterations
    pub iterations: usize,

    /// Wall-clock time spent searching
    pub total_time: Duration,

    /// Number of nodes in the tree, root included
    pub tree_size: usize,

    /// Deepest node reached by the selection walk
    pub max_depth: usize,

    /// Whether the wall-clock budget ended the search
    pub stopped_by_time: bool,

    /// Visits of each root child keyed by the column it plays, in creation order
    pub root_visits: Vec<(usize, u64)>,
}

impl SearchStatistics {
    /// Creates empty statistics for a search driven by `variant`
    pub fn new(variant: &'static str) -> Self {
        SearchStatistics {
            variant,
            tree_size: 1,
            ..Default::default()
        }
    }

    /// Iterations per wall-clock second
    pub fn iterations_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / secs
    }

    /// Column of the most visited root child; the first one wins ties
    pub fn best_column(&self) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for &(column, visits) in &self.root_visits {
            if best.map_or(true, |(_, most)| visits > most) {
                best = Some((column, visits));
            }
        }
        best.map(|(column, _)| column)
    }

    /// Share of root visits that went to the best column, in `[0, 1]`
    pub fn best_share(&self) -> f64 {
        let total: u64 = self.root_visits.iter().map(|&(_, v)| v).sum();
        let best = self
            .root_visits
            .iter()
            .map(|&(_, v)| v)
            .max()
            .unwrap_or(0);
        if total == 0 {
            0.0
        } else {
            best as f64 / total as f64
        }
    }

    /// Multi-line report of the search
    pub fn summary(&self) -> String {
        let stop = if self.stopped_by_time {
            "time budget"
        } else {
            "iteration budget"
        };

        let mut per_column = [None; COLS];
        for &(column, visits) in &self.root_visits {
            if let Some(slot) = per_column.get_mut(column) {
                *slot = Some(visits);
            }
        }
        let mut spread = String::new();
        for (column, visits) in per_column.iter().enumerate() {
            let _ = match visits {
                Some(v) => write!(spread, " {}:{}", column, v),
                None => write!(spread, " {}:-", column),
            };
        }

        let best = match self.best_column() {
            Some(column) => format!(
                "column {} ({:.1}% of root visits)",
                column,
                100.0 * self.best_share()
            ),
            None => "none".to_string(),
        };

        format!(
            "{} search, stopped by {}:\n\
             - Iterations: {} in {:.3} s ({:.0}/s)\n\
             - Tree size: {} nodes, selection depth {}\n\
             - Root visits:{}\n\
             - Best: {}",
            self.variant,
            stop,
            self.iterations,
            self.total_time.as_secs_f64(),
            self.iterations_per_second(),
            self.tree_size,
            self.max_depth,
            spread,
            best
        )
    }
}
