//! Backpropagation policies
//!
//! A backpropagation policy updates one node on the path from the rolled-out
//! leaf back to the root. The search calls it once per ancestor, leaf first.

use crate::{
    heuristics::AmafTable,
    policy::simulation::Rollout,
    tree::{NodeId, SearchTree},
};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy: Send + Sync {
    /// Updates statistics for `node` (and whatever tables the policy keeps)
    fn update_stats(
        &self,
        tree: &mut SearchTree,
        node: NodeId,
        rollout: &Rollout,
        amaf: &mut AmafTable,
    );

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy>;
}

/// Counts the visit, and the win if the node's mover won the rollout
fn update_node(tree: &mut SearchTree, node: NodeId, rollout: &Rollout) -> bool {
    let node = tree.get_mut(node);
    let won = rollout.is_won_by(node.produced_by);
    node.visits += 1;
    if won {
        node.wins += 1;
    }
    won
}

/// Standard backpropagation policy
///
/// Increments the visit count, and the win count when the player who moved
/// into the node won. Ties only count as visits.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BackpropagationPolicy for StandardPolicy {
    fn update_stats(
        &self,
        tree: &mut SearchTree,
        node: NodeId,
        rollout: &Rollout,
        _amaf: &mut AmafTable,
    ) {
        update_node(tree, node, rollout);
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy> {
        Box::new(self.clone())
    }
}

/// All-Moves-As-First backpropagation policy
///
/// Besides the standard update, every action of the rollout is recorded in
/// the global table at every ancestor, credited as a win when that
/// ancestor's mover won. The same action is therefore counted once per node
/// on the path.
#[derive(Debug, Clone)]
pub struct AmafPolicy;

impl AmafPolicy {
    /// Creates a new AMAF policy
    pub fn new() -> Self {
        AmafPolicy
    }
}

impl Default for AmafPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BackpropagationPolicy for AmafPolicy {
    fn update_stats(
        &self,
        tree: &mut SearchTree,
        node: NodeId,
        rollout: &Rollout,
        amaf: &mut AmafTable,
    ) {
        let won = update_node(tree, node, rollout);
        for &action in &rollout.actions {
            amaf.record(action, won);
        }
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy> {
        Box::new(self.clone())
    }
}

/// Rapid Action Value Estimation backpropagation policy
///
/// Besides the standard update, for each rollout action the children of the
/// node whose board differs from the node's board at that action's cell get
/// a RAVE sample, credited as a win when the node's mover won. Only the
/// sibling set under each ancestor is touched.
#[derive(Debug, Clone)]
pub struct RavePolicy;

impl RavePolicy {
    /// Creates a new RAVE policy
    pub fn new() -> Self {
        RavePolicy
    }
}

impl Default for RavePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BackpropagationPolicy for RavePolicy {
    fn update_stats(
        &self,
        tree: &mut SearchTree,
        node: NodeId,
        rollout: &Rollout,
        _amaf: &mut AmafTable,
    ) {
        let won = update_node(tree, node, rollout);

        let board = tree.get(node).board;
        let children = tree.children(node).to_vec();
        for &action in &rollout.actions {
            for &child in &children {
                let child = tree.get_mut(child);
                if child.board.cell_at(action) != board.cell_at(action) {
                    child.rave_visits += 1;
                    if won {
                        child.rave_wins += 1;
                    }
                }
            }
        }
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy> {
        Box::new(self.clone())
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl BackpropagationPolicy for Box<dyn BackpropagationPolicy> {
    fn update_stats(
        &self,
        tree: &mut SearchTree,
        node: NodeId,
        rollout: &Rollout,
        amaf: &mut AmafTable,
    ) {
        (**self).update_stats(tree, node, rollout, amaf)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy> {
        (**self).clone_box()
    }
}
