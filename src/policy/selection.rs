//! Selection policies
//!
//! Selection policies score the children of a fully expanded node during the
//! walk down the tree. All three variants share the UCT term; they differ in
//! how (and whether) they fold in action statistics gathered from rollouts.

use crate::{
    heuristics::AmafTable,
    tree::{NodeId, SearchTree},
    utils::{rave_beta, uct_value},
};

/// Trait for policies that pick the child to descend into
pub trait SelectionPolicy: Send + Sync {
    /// Scores `child` under `parent`; both must have been visited
    fn score(&self, tree: &SearchTree, parent: NodeId, child: NodeId, amaf: &AmafTable) -> f64;

    /// Returns the child with the highest score
    ///
    /// Ties go to the first child in creation order. Returns `None` when the
    /// node has no children or no score is comparable (NaN everywhere).
    fn select_child(&self, tree: &SearchTree, node: NodeId, amaf: &AmafTable) -> Option<NodeId> {
        let mut best_value = f64::NEG_INFINITY;
        let mut best = None;

        for &child in tree.children(node) {
            let value = self.score(tree, node, child, amaf);
            if value > best_value {
                best_value = value;
                best = Some(child);
            }
        }

        best
    }

    /// Short name used in logs and statistics
    fn name(&self) -> &'static str;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy>;
}

/// Plain UCT
///
/// ```text
/// UCT = wins / visits + C * sqrt(ln(parent_visits) / visits)
/// ```
#[derive(Debug, Clone)]
pub struct UctPolicy {
    /// Exploration constant `C`
    pub exploration_constant: f64,
}

impl UctPolicy {
    /// Creates a new UCT policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UctPolicy {
            exploration_constant,
        }
    }

    fn uct(&self, tree: &SearchTree, parent: NodeId, child: NodeId) -> f64 {
        let parent = tree.get(parent);
        let child = tree.get(child);
        uct_value(
            child.wins,
            child.visits,
            parent.visits,
            self.exploration_constant,
        )
    }
}

impl Default for UctPolicy {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl SelectionPolicy for UctPolicy {
    fn score(&self, tree: &SearchTree, parent: NodeId, child: NodeId, _amaf: &AmafTable) -> f64 {
        self.uct(tree, parent, child)
    }

    fn name(&self) -> &'static str {
        "uct"
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}

/// UCT plus the global AMAF win rate of the move that produced the child
///
/// The AMAF term is added as is, with no decay weight.
#[derive(Debug, Clone)]
pub struct AmafUctPolicy {
    uct: UctPolicy,
}

impl AmafUctPolicy {
    /// Creates a new AMAF-augmented policy
    pub fn new(exploration_constant: f64) -> Self {
        AmafUctPolicy {
            uct: UctPolicy::new(exploration_constant),
        }
    }
}

impl SelectionPolicy for AmafUctPolicy {
    fn score(&self, tree: &SearchTree, parent: NodeId, child: NodeId, amaf: &AmafTable) -> f64 {
        let amaf_value = tree
            .get(child)
            .action
            .map(|action| amaf.value(action))
            .unwrap_or(0.0);

        self.uct.uct(tree, parent, child) + amaf_value
    }

    fn name(&self) -> &'static str {
        "amaf"
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}

/// UCT blended with the child's local RAVE statistics
///
/// ```text
/// score = (1 - beta) * UCT + beta * rave_wins / rave_visits
/// beta  = sqrt(k / (3 * parent_visits + k))
/// ```
#[derive(Debug, Clone)]
pub struct RaveUctPolicy {
    uct: UctPolicy,
    /// Equivalence parameter `k` of the beta schedule
    pub equivalence: f64,
}

impl RaveUctPolicy {
    /// Creates a new RAVE-augmented policy
    pub fn new(exploration_constant: f64, equivalence: f64) -> Self {
        RaveUctPolicy {
            uct: UctPolicy::new(exploration_constant),
            equivalence,
        }
    }
}

impl SelectionPolicy for RaveUctPolicy {
    fn score(&self, tree: &SearchTree, parent: NodeId, child: NodeId, _amaf: &AmafTable) -> f64 {
        let beta = rave_beta(self.equivalence, tree.get(parent).visits);
        let uct = self.uct.uct(tree, parent, child);
        (1.0 - beta) * uct + beta * tree.get(child).rave_value()
    }

    fn name(&self) -> &'static str {
        "rave"
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl SelectionPolicy for Box<dyn SelectionPolicy> {
    fn score(&self, tree: &SearchTree, parent: NodeId, child: NodeId, amaf: &AmafTable) -> f64 {
        (**self).score(tree, parent, child, amaf)
    }

    fn select_child(&self, tree: &SearchTree, node: NodeId, amaf: &AmafTable) -> Option<NodeId> {
        (**self).select_child(tree, node, amaf)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        (**self).clone_box()
    }
}
