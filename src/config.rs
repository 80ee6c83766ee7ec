//! Configuration options for the search
//!
//! This module defines the parameters that control how long the engine
//! thinks and which selection/backpropagation variant it runs.

use std::time::Duration;

use crate::{Error, Result};

/// Default thinking time per move
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(3);

/// Default UCT exploration constant
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 2.0;

/// How long a search runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Iterate until this much wall-clock time has elapsed
    ///
    /// The check happens before each iteration, so the last iteration may
    /// overrun slightly.
    Time(Duration),

    /// Run exactly this many iterations
    ///
    /// Used where reproducibility matters more than wall-clock control.
    Iterations(usize),
}

/// Which statistics augment UCT during selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Plain UCT
    Uct,

    /// UCT plus a global All-Moves-As-First table
    ///
    /// The same cell played anywhere in a rollout updates the same entry.
    Amaf,

    /// UCT blended with per-child Rapid Action Value Estimation
    ///
    /// Statistics are kept per sibling set rather than globally, and their
    /// weight decays as the parent collects visits.
    Rave,
}

/// Configuration for the search
///
/// # Example
///
/// ```
/// use connect4_mcts::config::{SearchBudget, SearchConfig, Variant};
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_exploration_constant(1.5)
///     .with_time_budget(Duration::from_millis(500))
///     .with_variant(Variant::Amaf);
///
/// assert_eq!(config.budget, SearchBudget::Time(Duration::from_millis(500)));
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Exploration constant `C` of the UCT formula
    pub exploration_constant: f64,

    /// When the search stops
    pub budget: SearchBudget,

    /// Selection/backpropagation variant
    pub variant: Variant,

    /// Equivalence parameter of the RAVE beta schedule
    ///
    /// When unset, the time budget in seconds is used, which ties the decay
    /// rate to the clock rather than to the number of iterations.
    pub rave_equivalence: Option<f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            budget: SearchBudget::Time(DEFAULT_TIME_BUDGET),
            variant: Variant::Rave,
            rave_equivalence: None,
        }
    }
}

impl SearchConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets a wall-clock budget
    pub fn with_time_budget(mut self, duration: Duration) -> Self {
        self.budget = SearchBudget::Time(duration);
        self
    }

    /// Sets an iteration budget
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.budget = SearchBudget::Iterations(iterations);
        self
    }

    /// Sets the search variant
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the RAVE equivalence parameter explicitly
    pub fn with_rave_equivalence(mut self, equivalence: f64) -> Self {
        self.rave_equivalence = Some(equivalence);
        self
    }

    /// Returns the equivalence parameter used by the RAVE beta schedule
    pub fn effective_rave_equivalence(&self) -> f64 {
        match (self.rave_equivalence, self.budget) {
            (Some(equivalence), _) => equivalence,
            (None, SearchBudget::Time(duration)) => duration.as_secs_f64(),
            (None, SearchBudget::Iterations(_)) => DEFAULT_TIME_BUDGET.as_secs_f64(),
        }
    }

    /// Checks that the parameters are usable
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }

        if let Some(equivalence) = self.rave_equivalence {
            if !equivalence.is_finite() || equivalence <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "RAVE equivalence must be finite and positive, got {}",
                    equivalence
                )));
            }
        }

        Ok(())
    }
}
