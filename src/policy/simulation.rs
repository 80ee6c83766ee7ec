//! Simulation policies
//!
//! Simulation policies play a game out from a leaf board and report the
//! outcome together with the moves made along the way. The recorded moves
//! feed the AMAF and RAVE statistics during backpropagation.

use rand::{seq::SliceRandom, RngCore};

use crate::board::{Action, Board, Outcome, Player};

/// Result of one playout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollout {
    /// Terminal outcome, `Win` or `Tie`
    pub outcome: Outcome,

    /// Moves played during the playout, in order, excluding the moves that
    /// led from the root to the leaf
    pub actions: Vec<Action>,
}

impl Rollout {
    /// Returns the winner of the playout, if any
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }

    /// Returns true if `player` won the playout
    pub fn is_won_by(&self, player: Player) -> bool {
        self.winner() == Some(player)
    }
}

/// Trait for policies that simulate games
pub trait SimulationPolicy: Send + Sync {
    /// Plays `board` out to a terminal state
    ///
    /// The side to move on `board` moves first. A board that is already
    /// terminal is reported as is with no actions.
    fn simulate(&self, board: &Board, rng: &mut dyn RngCore) -> Rollout;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy>;
}

/// Random simulation policy
///
/// Plays uniformly random legal moves, checking only the lines through each
/// newly placed piece so the playout stops the moment a line completes.
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationPolicy for RandomPolicy {
    fn simulate(&self, board: &Board, rng: &mut dyn RngCore) -> Rollout {
        let mut actions = Vec::new();

        let outcome = board.check_outcome();
        if outcome.is_terminal() {
            return Rollout { outcome, actions };
        }

        let mut current = *board;
        loop {
            let mover = current.turn();
            let successors = current.successors();
            let (next, action) = match successors.choose(&mut *rng) {
                Some(&pair) => pair,
                None => {
                    return Rollout {
                        outcome: Outcome::Tie,
                        actions,
                    }
                }
            };

            actions.push(action);
            current = next;

            if current.wins_at(action) {
                return Rollout {
                    outcome: Outcome::Win(mover),
                    actions,
                };
            }
        }
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy> {
        Box::new(self.clone())
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl SimulationPolicy for Box<dyn SimulationPolicy> {
    fn simulate(&self, board: &Board, rng: &mut dyn RngCore) -> Rollout {
        (**self).simulate(board, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy> {
        (**self).clone_box()
    }
}
