//! Win and fail detection, run after every applied move.

use crate::board::Board;
use crate::session::{GameSession, Status};
use tracing::instrument;

/// Classifies a session after a move.
///
/// A solved board wins even on the move that also breaks the budget. The
/// budget is exceeded only once `move_count > max_moves`, so the move that
/// reaches `max_moves` exactly is still allowed.
#[instrument(skip(board, session), fields(moves = session.move_count()))]
pub fn evaluate(
    board: &Board,
    session: &GameSession,
    max_moves: Option<u32>,
    is_last_level: bool,
) -> Status {
    if board.is_solved() {
        return if is_last_level {
            Status::AllComplete
        } else {
            Status::LevelComplete
        };
    }

    match max_moves {
        Some(max) if session.move_count() > max => Status::GameOver,
        _ => Status::Playing,
    }
}
