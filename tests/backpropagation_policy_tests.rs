use connect4_mcts::{
    board::{Action, Board, Outcome, Player},
    heuristics::AmafTable,
    policy::{
        backpropagation::{AmafPolicy, BackpropagationPolicy, RavePolicy, StandardPolicy},
        simulation::Rollout,
    },
    tree::{NodeId, SearchTree},
};

/// Root (mover B) -> child (mover A) -> grandchild (mover B)
fn path_tree() -> (SearchTree, Vec<NodeId>) {
    let mut tree = SearchTree::new(Board::new(Player::A));
    let root = tree.root();
    let child = tree.expand_one(root).unwrap();
    let grandchild = tree.expand_one(child).unwrap();
    (tree, vec![grandchild, child, root])
}

fn backpropagate(
    policy: &dyn BackpropagationPolicy,
    tree: &mut SearchTree,
    path: &[NodeId],
    rollout: &Rollout,
    amaf: &mut AmafTable,
) {
    for &node in path {
        policy.update_stats(tree, node, rollout, amaf);
    }
}

fn win_for(player: Player, actions: Vec<Action>) -> Rollout {
    Rollout {
        outcome: Outcome::Win(player),
        actions,
    }
}

#[test]
fn test_standard_policy_credits_the_mover() {
    let (mut tree, path) = path_tree();
    let mut amaf = AmafTable::new();
    let policy = StandardPolicy::new();

    backpropagate(&policy, &mut tree, &path, &win_for(Player::A, vec![]), &mut amaf);

    let [grandchild, child, root] = [path[0], path[1], path[2]];
    assert_eq!(tree.get(grandchild).visits, 1);
    assert_eq!(tree.get(child).visits, 1);
    assert_eq!(tree.get(root).visits, 1);

    assert_eq!(tree.get(grandchild).wins, 0);
    assert_eq!(tree.get(child).wins, 1);
    assert_eq!(tree.get(root).wins, 0);
    assert!(amaf.is_empty());
}

#[test]
fn test_tie_only_counts_visits() {
    let (mut tree, path) = path_tree();
    let mut amaf = AmafTable::new();
    let tie = Rollout {
        outcome: Outcome::Tie,
        actions: vec![Action::new(2, 0), Action::new(0, 5)],
    };

    backpropagate(&AmafPolicy::new(), &mut tree, &path, &tie, &mut amaf);
    backpropagate(&RavePolicy::new(), &mut tree, &path, &tie, &mut amaf);

    for &node in &path {
        assert_eq!(tree.get(node).visits, 2);
        assert_eq!(tree.get(node).wins, 0);
        assert_eq!(tree.get(node).rave_wins, 0);
    }
    assert_eq!(amaf.get(Action::new(2, 0)).wins, 0);
    assert_eq!(amaf.get(Action::new(2, 0)).visits, 3);
}

#[test]
fn test_amaf_counts_each_action_once_per_ancestor() {
    let (mut tree, path) = path_tree();
    let mut amaf = AmafTable::new();
    let policy = AmafPolicy::new();
    let actions = vec![Action::new(2, 0), Action::new(0, 3), Action::new(1, 3)];

    backpropagate(&policy, &mut tree, &path, &win_for(Player::B, actions.clone()), &mut amaf);

    for &action in &actions {
        let stats = amaf.get(action);
        assert_eq!(stats.visits, path.len() as u64);
        // Grandchild and root are credited to B
        assert_eq!(stats.wins, 2);
    }
    assert_eq!(amaf.len(), actions.len());
    assert_eq!(amaf.get(Action::new(5, 5)).visits, 0);
    assert_eq!(amaf.value(Action::new(5, 5)), 0.0);
}

#[test]
fn test_amaf_visits_never_decrease() {
    let (mut tree, path) = path_tree();
    let mut amaf = AmafTable::new();
    let policy = AmafPolicy::new();
    let action = Action::new(0, 6);
    let mut previous = 0;

    for i in 0..10 {
        let winner = if i % 3 == 0 { Player::A } else { Player::B };
        // Shorter paths contribute fewer samples
        let depth = 1 + i % path.len();
        let rollout = win_for(winner, vec![action]);

        backpropagate(&policy, &mut tree, &path[path.len() - depth..], &rollout, &mut amaf);

        let visits = amaf.get(action).visits;
        assert!(visits >= previous + depth as u64);
        previous = visits;
    }
}

#[test]
fn test_rave_updates_only_matching_siblings() {
    let mut tree = SearchTree::new(Board::new(Player::A));
    let root = tree.root();
    while tree.expand_one(root).is_some() {}
    let children = tree.children(root).to_vec();
    let mut amaf = AmafTable::new();

    // Column 2 at row 0 matches child 2; row 3 of column 5 matches nothing
    let rollout = win_for(Player::B, vec![Action::new(0, 2), Action::new(3, 5)]);
    RavePolicy::new().update_stats(&mut tree, root, &rollout, &mut amaf);

    assert_eq!(tree.get(root).visits, 1);
    assert_eq!(tree.get(root).wins, 1);

    for (column, &child) in children.iter().enumerate() {
        let node = tree.get(child);
        if column == 2 {
            assert_eq!(node.rave_visits, 1);
            // Credited by the root's mover (B), who won
            assert_eq!(node.rave_wins, 1);
        } else {
            assert_eq!(node.rave_visits, 0);
            assert_eq!(node.rave_wins, 0);
        }
        assert_eq!(node.visits, 0);
    }
    assert!(amaf.is_empty());
}

#[test]
fn test_rave_credits_by_ancestor_mover() {
    let (mut tree, path) = path_tree();
    let [grandchild, child, root] = [path[0], path[1], path[2]];
    let mut amaf = AmafTable::new();

    // The child was created by column 0 at row 0, the grandchild by column 0 at row 1
    let rollout = win_for(Player::A, vec![Action::new(0, 0), Action::new(1, 0)]);
    backpropagate(&RavePolicy::new(), &mut tree, &path, &rollout, &mut amaf);

    // Root's mover is B, who lost
    assert_eq!(tree.get(child).rave_visits, 1);
    assert_eq!(tree.get(child).rave_wins, 0);

    // Child's mover is A, who won
    assert_eq!(tree.get(grandchild).rave_visits, 1);
    assert_eq!(tree.get(grandchild).rave_wins, 1);

    assert_eq!(tree.get(root).rave_visits, 0);
}
