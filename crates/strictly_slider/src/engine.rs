//! Move engine: validates and applies one player click.
//!
//! The engine never classifies the result. Callers run the
//! [`detector`](crate::detector) next, so a move can be tested on its own.

use crate::action::MoveError;
use crate::board::Board;
use crate::contracts::{Contract, SlideContract};
use crate::session::GameSession;
use tracing::{debug, instrument};

/// Applies a click, or reports why it was ignored.
///
/// On success the tile at `clicked` and the blank trade places and the move
/// count goes up by exactly one. The inputs are left untouched.
///
/// # Errors
///
/// Returns [`MoveError`] if the session is not playing, the index is off the
/// board, or the tile is not adjacent to the blank. Debug builds also check
/// the postconditions of [`SlideContract`].
#[instrument(skip(board, session), fields(empty = board.empty_index(), moves = session.move_count()))]
pub fn try_move(
    board: &Board,
    session: &GameSession,
    clicked: usize,
) -> Result<(Board, GameSession), MoveError> {
    let before = (board.clone(), session.clone());
    let slide = SlideContract::pre(&before, &clicked)?;

    let mut next_board = board.clone();
    let mut next_session = session.clone();
    next_board.swap_with_empty(slide.from);
    next_session.record_move();

    #[cfg(debug_assertions)]
    {
        let after = (next_board, next_session);
        SlideContract::post(&before, &after)?;
        (next_board, next_session) = after;
    }

    debug!(%slide, moves = next_session.move_count(), "Slide applied");
    Ok((next_board, next_session))
}

/// Applies a click; illegal clicks are silent no-ops.
///
/// Players click non-adjacent tiles all the time, so a rejected click hands
/// back unchanged copies of the inputs instead of an error.
#[instrument(skip(board, session), fields(empty = board.empty_index(), moves = session.move_count()))]
pub fn apply_move(board: &Board, session: &GameSession, clicked: usize) -> (Board, GameSession) {
    match try_move(board, session, clicked) {
        Ok(next) => next,
        Err(e) => {
            debug!(error = %e, "Click ignored");
            (board.clone(), session.clone())
        }
    }
}
