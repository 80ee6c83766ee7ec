use connect4_mcts::{
    board::{Action, Board, Player, COLS},
    compute_move,
    config::{SearchConfig, Variant},
    heuristics::AmafTable,
    policy::{backpropagation::StandardPolicy, selection::UctPolicy},
    Error, Mcts,
};
use rand::{rngs::StdRng, SeedableRng};

const VARIANTS: [Variant; 3] = [Variant::Uct, Variant::Amaf, Variant::Rave];

/// A to move; dropping into column 3 completes the bottom row
fn forced_win_board() -> Board {
    Board::from_rows(&["O......", "XXX.OO."], Player::A).unwrap()
}

#[test]
fn test_root_visits_equal_iterations() {
    for variant in VARIANTS {
        for iterations in [1, 7, 50, 300] {
            let config = SearchConfig::default()
                .with_variant(variant)
                .with_iterations(iterations);
            let mut mcts = Mcts::new(Board::new(Player::A), config);
            let mut rng = StdRng::seed_from_u64(iterations as u64);

            mcts.search(&mut rng).unwrap();

            let tree = mcts.tree();
            assert_eq!(tree.get(tree.root()).visits, iterations as u64);
            assert_eq!(mcts.get_statistics().iterations, iterations);
            assert!(!mcts.get_statistics().stopped_by_time);

            // Every child's visits are bounded by its parent's
            for id in (0..tree.len()).map(connect4_mcts::NodeId) {
                let node = tree.get(id);
                assert!(node.wins <= node.visits);
                if let Some(parent) = node.parent {
                    assert!(node.visits <= tree.get(parent).visits);
                }
            }
        }
    }
}

#[test]
fn test_seeded_search_is_deterministic() {
    for variant in VARIANTS {
        let config = SearchConfig::default()
            .with_variant(variant)
            .with_iterations(400);
        let board = Board::from_rows(&["...O...", "..XX..."], Player::B).unwrap();

        let mut first = Mcts::new(board, config.clone());
        let mut second = Mcts::new(board, config);

        let a = first.search(&mut StdRng::seed_from_u64(99)).unwrap();
        let b = second.search(&mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b, "variant {:?}", variant);

        let visits = |mcts: &Mcts| -> Vec<u64> {
            let tree = mcts.tree();
            tree.children(tree.root())
                .iter()
                .map(|&c| tree.get(c).visits)
                .collect()
        };
        assert_eq!(visits(&first), visits(&second));
    }
}

#[test]
fn test_chosen_move_is_a_legal_drop() {
    let board = Board::from_rows(&["X......", "O......", "X.....O", "OX...OX"], Player::B)
        .unwrap();

    for variant in VARIANTS {
        let config = SearchConfig::default()
            .with_variant(variant)
            .with_iterations(200);
        let action = compute_move(&board, &config, &mut StdRng::seed_from_u64(5)).unwrap();

        assert!(action.column < COLS);
        assert_eq!(board.drop_row(action.column), Some(action.row));
    }
}

#[test]
fn test_chosen_move_is_most_visited_root_child() {
    let config = SearchConfig::default().with_iterations(500);
    let mut mcts = Mcts::new(Board::new(Player::A), config);
    let action = mcts.search(&mut StdRng::seed_from_u64(21)).unwrap();

    let tree = mcts.tree();
    let root = tree.root();
    let max_visits = tree
        .children(root)
        .iter()
        .map(|&c| tree.get(c).visits)
        .max()
        .unwrap();
    let first_best = tree
        .children(root)
        .iter()
        .copied()
        .find(|&c| tree.get(c).visits == max_visits)
        .unwrap();

    assert_eq!(tree.get(first_best).action, Some(action));
}

#[test]
fn test_only_one_column_left() {
    // Column 0 is empty, the rest is filled without any line
    let board = Board::from_rows(
        &[
            ".OXXOOX", ".OXXOOX", ".XOOXXO", ".OXXOOX", ".XOOXXO", ".XOOXXO",
        ],
        Player::A,
    )
    .unwrap();
    assert_eq!(board.legal_columns(), vec![0]);
    assert!(!board.is_terminal());

    let config = SearchConfig::default().with_iterations(20);
    let action = compute_move(&board, &config, &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(action, Action::new(0, 0));
}

#[test]
fn test_terminal_board_has_no_move() {
    let won = Board::from_rows(&["O......", "O......", "XXXXOO."], Player::B).unwrap();
    let config = SearchConfig::default().with_iterations(10);

    let mut mcts = Mcts::new(won, config);
    assert_eq!(
        mcts.search(&mut StdRng::seed_from_u64(0)),
        Err(Error::NoLegalMove)
    );
    assert_eq!(mcts.get_statistics().iterations, 0);
}

#[test]
fn test_zero_budget_has_no_move() {
    let config = SearchConfig::default().with_iterations(0);
    let result = compute_move(
        &Board::new(Player::A),
        &config,
        &mut StdRng::seed_from_u64(0),
    );
    assert_eq!(result, Err(Error::NoLegalMove));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let config = SearchConfig::default()
        .with_exploration_constant(f64::NAN)
        .with_iterations(10);
    let result = compute_move(
        &Board::new(Player::A),
        &config,
        &mut StdRng::seed_from_u64(0),
    );
    assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
}

#[test]
fn test_forced_win_is_found() {
    let board = forced_win_board();
    let trials = 10;

    for variant in VARIANTS {
        let config = SearchConfig::default()
            .with_variant(variant)
            .with_iterations(1_500);

        let hits = (0..trials)
            .filter(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                compute_move(&board, &config, &mut rng).unwrap() == Action::new(0, 3)
            })
            .count();

        assert!(
            hits >= 8,
            "variant {:?} found the win in {}/{} trials",
            variant,
            hits,
            trials
        );
    }
}

#[test]
fn test_amaf_table_is_filled_by_amaf_search_only() {
    let board = Board::new(Player::A);
    let iterations = 100;

    let mut amaf = AmafTable::new();
    let config = SearchConfig::default()
        .with_variant(Variant::Amaf)
        .with_iterations(iterations);
    Mcts::new(board, config)
        .search_with_table(&mut StdRng::seed_from_u64(8), &mut amaf)
        .unwrap();

    assert!(!amaf.is_empty());
    for (_, stats) in amaf.iter() {
        assert!(stats.wins <= stats.visits);
    }

    let mut untouched = AmafTable::new();
    let config = SearchConfig::default()
        .with_variant(Variant::Rave)
        .with_iterations(iterations);
    Mcts::new(board, config)
        .search_with_table(&mut StdRng::seed_from_u64(8), &mut untouched)
        .unwrap();
    assert!(untouched.is_empty());
}

#[test]
fn test_custom_policies_override_variant() {
    let config = SearchConfig::default()
        .with_variant(Variant::Rave)
        .with_iterations(200);
    let mut mcts = Mcts::new(Board::new(Player::B), config)
        .with_selection_policy(UctPolicy::new(1.0))
        .with_backpropagation_policy(StandardPolicy::new());

    mcts.search(&mut StdRng::seed_from_u64(3)).unwrap();

    let tree = mcts.tree();
    for id in (0..tree.len()).map(connect4_mcts::NodeId) {
        assert_eq!(tree.get(id).rave_visits, 0);
    }
}

#[test]
fn test_repeated_searches_rebuild_the_tree() {
    let config = SearchConfig::default().with_iterations(50);
    let mut mcts = Mcts::new(Board::new(Player::A), config);

    mcts.search(&mut StdRng::seed_from_u64(1)).unwrap();
    mcts.search(&mut StdRng::seed_from_u64(2)).unwrap();

    let tree = mcts.tree();
    assert_eq!(tree.get(tree.root()).visits, 50);
    assert_eq!(mcts.root_board(), &Board::new(Player::A));
}
