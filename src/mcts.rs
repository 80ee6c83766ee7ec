//! The search driver
//!
//! [`Mcts`] builds a fresh tree rooted at the current board, runs
//! select → rollout → backpropagate until the budget is spent, and reports
//! the most visited root move.

use std::time::Instant;

use log::{debug, warn};
use rand::Rng;

use crate::{
    board::{Action, Board},
    config::{SearchBudget, SearchConfig, Variant},
    heuristics::AmafTable,
    policy::{
        backpropagation::{AmafPolicy, BackpropagationPolicy, RavePolicy, StandardPolicy},
        selection::{AmafUctPolicy, RaveUctPolicy, SelectionPolicy, UctPolicy},
        simulation::{RandomPolicy, Rollout, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    Error, Result,
};

/// Picks the next move for `board`
///
/// Builds a tree for this call only; nothing carries over between moves.
/// Returns [`Error::NoLegalMove`] when the board is already decided or the
/// budget allowed no iteration.
///
/// # Example
///
/// ```
/// use connect4_mcts::{compute_move, Board, Player, SearchConfig};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let board = Board::new(Player::A);
/// let config = SearchConfig::default().with_iterations(200);
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let action = compute_move(&board, &config, &mut rng).unwrap();
/// assert!(action.column < 7);
/// assert_eq!(action.row, 0);
/// ```
pub fn compute_move<R: Rng>(board: &Board, config: &SearchConfig, rng: &mut R) -> Result<Action> {
    Mcts::new(*board, config.clone()).search(rng)
}

/// Monte Carlo Tree Search over Connect Four boards
pub struct Mcts {
    /// Tree built by the last search
    tree: SearchTree,

    /// Configuration for the search
    config: SearchConfig,

    /// Statistics gathered during search
    statistics: SearchStatistics,

    /// Policy for scoring children during selection
    selection_policy: Box<dyn SelectionPolicy>,

    /// Policy for playing out leaves
    simulation_policy: Box<dyn SimulationPolicy>,

    /// Policy for folding rollouts back into the tree
    backpropagation_policy: Box<dyn BackpropagationPolicy>,
}

impl Mcts {
    /// Creates a searcher for `board`, with policies matching `config.variant`
    pub fn new(board: Board, config: SearchConfig) -> Self {
        let selection_policy: Box<dyn SelectionPolicy> = match config.variant {
            Variant::Uct => Box::new(UctPolicy::new(config.exploration_constant)),
            Variant::Amaf => Box::new(AmafUctPolicy::new(config.exploration_constant)),
            Variant::Rave => Box::new(RaveUctPolicy::new(
                config.exploration_constant,
                config.effective_rave_equivalence(),
            )),
        };

        let backpropagation_policy: Box<dyn BackpropagationPolicy> = match config.variant {
            Variant::Uct => Box::new(StandardPolicy::new()),
            Variant::Amaf => Box::new(AmafPolicy::new()),
            Variant::Rave => Box::new(RavePolicy::new()),
        };

        Mcts {
            tree: SearchTree::new(board),
            config,
            statistics: SearchStatistics::new(selection_policy.name()),
            selection_policy,
            simulation_policy: Box::new(RandomPolicy::new()),
            backpropagation_policy,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Runs the search with a fresh AMAF table and returns the chosen move
    pub fn search<R: Rng>(&mut self, rng: &mut R) -> Result<Action> {
        let mut amaf = AmafTable::new();
        self.search_with_table(rng, &mut amaf)
    }

    /// Runs the search, recording action statistics into `amaf`
    ///
    /// The tree is rebuilt from the root board on every call.
    pub fn search_with_table<R: Rng>(&mut self, rng: &mut R, amaf: &mut AmafTable) -> Result<Action> {
        self.config.validate()?;

        let board = self.tree.get(self.tree.root()).board;
        self.tree = SearchTree::new(board);
        self.statistics = SearchStatistics::new(self.selection_policy.name());

        if self.tree.get(self.tree.root()).terminal {
            return Err(Error::NoLegalMove);
        }

        debug!(
            "starting {} search with budget {:?}",
            self.selection_policy.name(),
            self.config.budget
        );

        let start_time = Instant::now();
        loop {
            if self.budget_exhausted(start_time) {
                break;
            }

            self.execute_iteration(rng, amaf);
            self.statistics.iterations += 1;
        }

        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = self.tree.len();
        self.statistics.root_visits = self.root_visits();

        let result = self.select_best_action();
        debug!(
            "search finished after {} iterations in {:?}: {:?}",
            self.statistics.iterations, self.statistics.total_time, result
        );
        result
    }

    fn budget_exhausted(&mut self, start_time: Instant) -> bool {
        match self.config.budget {
            SearchBudget::Iterations(limit) => self.statistics.iterations >= limit,
            SearchBudget::Time(limit) => {
                let exhausted = start_time.elapsed() >= limit;
                if exhausted {
                    self.statistics.stopped_by_time = true;
                }
                exhausted
            }
        }
    }

    /// Execute a single iteration of the search
    fn execute_iteration<R: Rng>(&mut self, rng: &mut R, amaf: &mut AmafTable) {
        // 1. Selection and expansion
        let leaf = self.select(amaf);

        // 2. Simulation
        let board = self.tree.get(leaf).board;
        let rollout = self.simulation_policy.simulate(&board, rng);

        // 3. Backpropagation
        self.backpropagate(leaf, &rollout, amaf);
    }

    /// Walks down through fully expanded nodes, then expands one child
    ///
    /// Returns the node to roll out from: a terminal node, the first
    /// unvisited child of the node where the walk stopped, or that node
    /// itself when it has nothing left to offer.
    fn select(&mut self, amaf: &AmafTable) -> NodeId {
        let mut node = self.tree.root();

        while self.tree.is_fully_expanded(node) {
            match self.selection_policy.select_child(&self.tree, node, amaf) {
                Some(child) => node = child,
                None => {
                    if !self.tree.get(node).terminal {
                        warn!("selection stopped at {}: no comparable child score", node);
                    }
                    break;
                }
            }
            self.statistics.max_depth = self.statistics.max_depth.max(self.tree.get(node).depth);
        }

        if self.tree.get(node).terminal {
            return node;
        }

        self.tree.expand_one(node);
        if self.tree.get(node).is_leaf() {
            return node;
        }

        self.tree.pick_unvisited(node).unwrap_or(node)
    }

    /// Updates every node from `leaf` up to the root
    fn backpropagate(&mut self, leaf: NodeId, rollout: &Rollout, amaf: &mut AmafTable) {
        let mut current = Some(leaf);
        while let Some(node) = current {
            self.backpropagation_policy
                .update_stats(&mut self.tree, node, rollout, amaf);
            current = self.tree.get(node).parent;
        }
    }

    fn root_visits(&self) -> Vec<(usize, u64)> {
        self.tree
            .children(self.tree.root())
            .iter()
            .filter_map(|&child| {
                let node = self.tree.get(child);
                node.action.map(|action| (action.column, node.visits))
            })
            .collect()
    }

    /// Returns the move leading to the most visited root child
    fn select_best_action(&self) -> Result<Action> {
        let root = self.tree.root();
        let best = self
            .tree
            .most_visited_child(root)
            .ok_or(Error::NoLegalMove)?;

        self.tree
            .get(root)
            .board
            .diff(&self.tree.get(best).board)
            .ok_or(Error::NoLegalMove)
    }

    /// Returns the tree built by the last search
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Returns the board the search starts from
    pub fn root_board(&self) -> &Board {
        &self.tree.get(self.tree.root()).board
    }

    /// Returns the configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns a visualization of the search tree down to `max_depth`
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        self.tree.visualize(max_depth)
    }
}
