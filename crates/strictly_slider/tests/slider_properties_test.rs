//! Property tests for the board, shuffle generator and move engine.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use strictly_slider::{
    Board, BoardInvariants, GameSession, InvariantSet, apply_move, is_solved, neighbors_of,
    shuffle,
};

#[test]
fn test_every_scramble_is_solvable_by_inverse_replay() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for grid_size in 2..=8 {
        for steps in 0..=500 {
            let scramble = shuffle(grid_size, steps, &mut rng);
            let mut board = scramble.board().clone();
            let mut session = GameSession::new();

            for clicked in scramble.solution() {
                (board, session) = apply_move(&board, &session, clicked);
            }

            assert!(
                board.is_solved(),
                "grid {} steps {} not solved by inverse replay",
                grid_size,
                steps
            );
            assert!(session.move_count() as usize <= steps);
        }
    }
}

#[test]
fn test_permutation_survives_random_play() {
    let mut rng = SmallRng::seed_from_u64(77);
    for grid_size in 2..=6 {
        let mut board = shuffle(grid_size, 60, &mut rng).into_board();
        let mut session = GameSession::new();
        let cells = grid_size * grid_size;

        for _ in 0..400 {
            // Include off-board indices; they must be ignored.
            let clicked = rng.random_range(0..cells + 3);
            (board, session) = apply_move(&board, &session, clicked);
            assert!(BoardInvariants::check_all(&board).is_ok());

            let mut sorted = board.tiles().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..cells).collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_illegal_clicks_change_nothing() {
    let mut rng = SmallRng::seed_from_u64(5);
    let board = shuffle(4, 80, &mut rng).into_board();
    let session = GameSession::new();
    let legal = neighbors_of(board.empty_index(), 4);

    for clicked in (0..32).chain([usize::MAX]) {
        if legal.contains(&clicked) {
            continue;
        }
        let (next, next_session) = apply_move(&board, &session, clicked);
        assert_eq!(next.tiles(), board.tiles());
        assert_eq!(next.empty_index(), board.empty_index());
        assert_eq!(next_session.move_count(), session.move_count());
    }
}

#[test]
fn test_legal_click_counts_once_and_swaps_two_cells() {
    let mut rng = SmallRng::seed_from_u64(6);
    let board = shuffle(5, 150, &mut rng).into_board();
    let session = GameSession::new();

    for clicked in neighbors_of(board.empty_index(), 5) {
        let (next, next_session) = apply_move(&board, &session, clicked);
        assert_eq!(next_session.move_count(), session.move_count() + 1);
        assert_eq!(next.empty_index(), clicked);

        let changed: Vec<usize> = (0..board.len())
            .filter(|&i| board.tiles()[i] != next.tiles()[i])
            .collect();
        let mut expected = vec![clicked, board.empty_index()];
        expected.sort_unstable();
        assert_eq!(changed, expected);
    }
}

#[test]
fn test_win_iff_identity() {
    assert!(is_solved(&[0, 1, 2, 3, 4, 5, 6, 7, 8]));
    assert!(!is_solved(&[1, 0, 2, 3, 4, 5, 6, 7, 8]));

    let board = Board::from_tiles(3, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]).expect("identity");
    assert!(board.is_solved());
    let board = Board::from_tiles(3, vec![1, 0, 2, 3, 4, 5, 6, 7, 8]).expect("transposed");
    assert!(!board.is_solved());
}
