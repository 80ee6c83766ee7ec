//! # connect4-mcts
//!
//! A Monte Carlo Tree Search engine that picks moves for a computer-controlled
//! Connect Four player under a wall-clock budget.
//!
//! ## Features
//!
//! - Connect Four rules: gravity drops, incremental and full-board win checks
//! - Arena-backed search tree with lazy one-child-per-call expansion
//! - Three selection variants sharing one engine: plain UCT,
//!   All-Moves-As-First (AMAF) and Rapid Action Value Estimation (RAVE)
//! - Injectable, seedable random source for reproducible searches
//! - Search statistics and tree visualization
//!
//! ## Basic Usage
//!
//! ```
//! use connect4_mcts::{compute_move, Board, Player, SearchConfig, Variant};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! fn main() -> Result<(), connect4_mcts::Error> {
//!     let mut board = Board::new(Player::A);
//!     board.apply_move(3)?;
//!
//!     // A handful of iterations keeps the doctest fast; real play would
//!     // use a time budget.
//!     let config = SearchConfig::default()
//!         .with_variant(Variant::Amaf)
//!         .with_iterations(100);
//!
//!     let mut rng = StdRng::seed_from_u64(42);
//!     let action = compute_move(&board, &config, &mut rng)?;
//!
//!     board.apply_move(action.column)?;
//!     println!("{}", board);
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Every call builds a fresh tree rooted at the current board and repeats:
//!
//! 1. **Selection**: walk down while the current node is fully expanded,
//!    scoring children with the configured [`SelectionPolicy`].
//! 2. **Expansion**: add one new child and pick the first unvisited one.
//! 3. **Simulation**: play random moves to the end of the game, recording
//!    the cells filled along the way.
//! 4. **Backpropagation**: update visit and win counts from the leaf to the
//!    root, plus the AMAF table or the RAVE sibling statistics.
//!
//! When the budget is spent, the most visited root child is the answer.
//!
//! ## Customizing Policies
//!
//! ```rust
//! use connect4_mcts::{Board, Mcts, SearchConfig};
//! use connect4_mcts::policy::{
//!     backpropagation::StandardPolicy,
//!     selection::UctPolicy,
//!     simulation::RandomPolicy,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = SearchConfig::default().with_iterations(50);
//!
//! let mut mcts = Mcts::new(Board::default(), config)
//!     .with_selection_policy(UctPolicy::new(1.5))
//!     .with_simulation_policy(RandomPolicy::new())
//!     .with_backpropagation_policy(StandardPolicy::new());
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let result = mcts.search(&mut rng);
//! println!("Search completed with result: {:?}", result);
//! println!("{}", mcts.get_statistics().summary());
//! ```
//!
//! To play against the engine in a terminal:
//!
//! ```bash
//! cargo run --example connect_four
//! ```

pub mod board;
pub mod config;
pub mod heuristics;
pub mod interface;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use board::{Action, Board, Cell, Outcome, Player};
pub use config::{SearchBudget, SearchConfig, Variant};
pub use heuristics::AmafTable;
pub use mcts::{compute_move, Mcts};
pub use policy::{BackpropagationPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{Node, NodeId, SearchTree};

/// Error types for the engine
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The column has no empty cell left
    #[error("Column {0} is full")]
    ColumnFull(usize),

    /// The column index is outside the board
    #[error("Column {0} is outside the board")]
    InvalidColumn(usize),

    /// The board is already decided or the search produced no child
    #[error("No legal move available from current board")]
    NoLegalMove,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
