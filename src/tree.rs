//! Search tree storage
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`].
//! Children are owned by their parent's `children` list; the `parent` link
//! is a plain index used only for walking back up during backpropagation.
//! A fresh tree is built for every search and dropped afterwards.

use std::fmt;

use log::trace;

use crate::board::{Action, Board, Player, COLS};

/// Index of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the search tree
///
/// `visits` and `wins` are counted from the perspective of `produced_by`,
/// the player whose move created this node's board. That is the opponent of
/// the player to move on `board`.
#[derive(Debug, Clone)]
pub struct Node {
    /// Board snapshot at this node
    pub board: Board,

    /// Player whose move led to this board (for the root, the opponent of the side to move)
    pub produced_by: Player,

    /// Cell filled by the move from the parent (None for root)
    pub action: Option<Action>,

    /// Number of completed iterations that passed through this node
    pub visits: u64,

    /// Number of those iterations won by `produced_by`
    pub wins: u64,

    /// RAVE visits for the move that produced this node, gathered from every
    /// rollout that passed through the parent
    pub rave_visits: u64,

    /// RAVE wins matching `rave_visits`
    pub rave_wins: u64,

    /// Owning ancestor (None for root)
    pub parent: Option<NodeId>,

    /// Children in creation order, one per distinct successor board
    pub children: Vec<NodeId>,

    /// True if `board` is already won or tied
    pub terminal: bool,

    /// True once every successor board has been materialized
    pub expanded: bool,

    /// Depth of this node in the tree (root = 0)
    pub depth: usize,
}

impl Node {
    fn new(
        board: Board,
        produced_by: Player,
        action: Option<Action>,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Self {
        Node {
            terminal: board.is_terminal(),
            board,
            produced_by,
            action,
            visits: 0,
            wins: 0,
            rave_visits: 0,
            rave_wins: 0,
            parent,
            children: Vec::new(),
            expanded: false,
            depth,
        }
    }

    /// Returns the win rate for `produced_by`, or 0 before the first visit
    pub fn value(&self) -> f64 {
        crate::utils::win_rate(self.wins, self.visits)
    }

    /// Returns the RAVE win rate, or 0 if no RAVE sample was recorded
    pub fn rave_value(&self) -> f64 {
        crate::utils::win_rate(self.rave_wins, self.rave_visits)
    }

    /// Returns true if this node has no children yet
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed MCTS tree
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    /// Creates a tree whose root holds `board`
    pub fn new(board: Board) -> Self {
        let root = Node::new(board, board.turn().other(), None, None, 0);
        SearchTree { nodes: vec![root] }
    }

    /// Returns the root id
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns a node by id
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns a mutable node by id
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false once constructed; present for API completeness
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the children of a node in creation order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Materializes one new child of `id`
    ///
    /// Columns are tried left to right; the first drop whose resulting board
    /// is not already held by an existing child is appended. When no such
    /// board remains the node is marked `expanded` and nothing is added.
    /// Returns the new child, if any.
    pub fn expand_one(&mut self, id: NodeId) -> Option<NodeId> {
        if self.get(id).expanded {
            return None;
        }

        let node = self.get(id);
        let candidate = (0..COLS)
            .filter_map(|column| node.board.with_move(column))
            .find(|(board, _)| {
                !node
                    .children
                    .iter()
                    .any(|&child| self.get(child).board.same_cells(board))
            });

        match candidate {
            Some((board, action)) => {
                let mover = node.board.turn();
                let depth = node.depth + 1;
                let child_id = NodeId(self.nodes.len());
                self.nodes
                    .push(Node::new(board, mover, Some(action), Some(id), depth));
                self.get_mut(id).children.push(child_id);
                trace!("expanded {} with {} -> {}", id, action, child_id);
                Some(child_id)
            }
            None => {
                self.get_mut(id).expanded = true;
                None
            }
        }
    }

    /// Returns true if every legal column has a child and every child was visited
    ///
    /// Recomputed on each call; a node with an unexplored column is never
    /// fully expanded.
    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        let node = self.get(id);
        node.children.len() == node.board.legal_column_count()
            && node.children.iter().all(|&child| self.get(child).visits > 0)
    }

    /// Returns the first child of `id`, in creation order, that was never visited
    pub fn pick_unvisited(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).visits == 0)
    }

    /// Returns the most visited child of `id`, earliest wins ties
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, u64)> = None;
        for &child in &self.get(id).children {
            let visits = self.get(child).visits;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((child, visits)),
            }
        }
        best.map(|(child, _)| child)
    }

    /// Returns the chain of ids from `id` up to and including the root
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.get(parent).parent;
        }
        chain
    }

    /// Renders the tree as indented text down to `max_depth`
    pub fn visualize(&self, max_depth: usize) -> String {
        let mut output = String::new();
        self.visualize_node(self.root(), max_depth, &mut output);
        output
    }

    fn visualize_node(&self, id: NodeId, max_depth: usize, output: &mut String) {
        let node = self.get(id);
        let indent = "  ".repeat(node.depth);
        let label = match node.action {
            Some(action) => format!("{} by {}", action, node.produced_by),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (visits: {}, wins: {}, rave: {}/{})\n",
            indent, label, node.visits, node.wins, node.rave_wins, node.rave_visits
        ));

        if node.depth < max_depth {
            for &child in &node.children {
                self.visualize_node(child, max_depth, output);
            }
        }
    }
}
