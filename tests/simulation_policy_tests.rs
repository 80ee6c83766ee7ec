use connect4_mcts::{
    board::{Board, Outcome, Player},
    policy::simulation::{RandomPolicy, SimulationPolicy},
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_terminal_board_is_read_without_playing() {
    let board = Board::from_rows(&["XXXXOOO"], Player::B).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let rollout = RandomPolicy::new().simulate(&board, &mut rng);
    assert_eq!(rollout.outcome, Outcome::Win(Player::A));
    assert!(rollout.actions.is_empty());
}

#[test]
fn test_rollout_reaches_a_terminal_state() {
    let policy = RandomPolicy::new();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..200 {
        let board = Board::new(Player::A);
        let rollout = policy.simulate(&board, &mut rng);

        assert!(rollout.outcome.is_terminal());
        assert!(!rollout.actions.is_empty());
        assert!(rollout.actions.len() <= 42);
    }
}

#[test]
fn test_replaying_actions_reproduces_the_outcome() {
    let policy = RandomPolicy::new();
    let mut rng = StdRng::seed_from_u64(5);
    let start = Board::from_rows(&["..O....", ".XXO..."], Player::A).unwrap();

    for _ in 0..100 {
        let rollout = policy.simulate(&start, &mut rng);

        let mut board = start;
        for (i, action) in rollout.actions.iter().enumerate() {
            // Sides alternate starting with the side to move
            let expected_mover = if i % 2 == 0 { Player::A } else { Player::B };
            assert_eq!(board.turn(), expected_mover);

            let played = board.apply_move(action.column).unwrap();
            assert_eq!(played, *action);

            // The playout stops the moment a line completes
            if i + 1 < rollout.actions.len() {
                assert_eq!(board.check_outcome(), Outcome::InProgress);
            }
        }
        assert_eq!(board.check_outcome(), rollout.outcome);

        if let Outcome::Win(winner) = rollout.outcome {
            let last = rollout.actions.len() - 1;
            let last_mover = if last % 2 == 0 { Player::A } else { Player::B };
            assert_eq!(winner, last_mover);
        }
    }
}

#[test]
fn test_rollout_from_last_empty_cell_can_tie() {
    // Only column 6 top cell is open; filling it completes no line
    let board = Board::from_rows(
        &[
            "OOXXOO.", "OOXXOOX", "XXOOXXO", "OOXXOOX", "XXOOXXO", "XXOOXXO",
        ],
        Player::A,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(9);

    let rollout = RandomPolicy::new().simulate(&board, &mut rng);
    assert_eq!(rollout.outcome, Outcome::Tie);
    assert_eq!(rollout.actions.len(), 1);
    assert_eq!(rollout.winner(), None);
}

#[test]
fn test_seeded_rollouts_are_deterministic() {
    let policy = RandomPolicy::new();
    let board = Board::new(Player::B);

    let mut first_rng = StdRng::seed_from_u64(1234);
    let mut second_rng = StdRng::seed_from_u64(1234);

    for _ in 0..20 {
        assert_eq!(
            policy.simulate(&board, &mut first_rng),
            policy.simulate(&board, &mut second_rng)
        );
    }
}
