//! Contract-based validation for slides.
//!
//! Contracts formalize Hoare-style reasoning: {P} slide {Q}. The
//! precondition decides whether a click is a legal slide; the postcondition
//! re-checks the board invariants after it has been applied.

use crate::action::{MoveError, Slide};
use crate::board::Board;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::session::{GameSession, Status};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Output of a successful precondition check.
    type Checked;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Checked, MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Slide Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session must be accepting moves.
pub struct SessionIsPlaying;

impl SessionIsPlaying {
    /// Rejects clicks outside [`Status::Playing`].
    pub fn check(session: &GameSession) -> Result<(), MoveError> {
        match session.status() {
            Status::Playing => Ok(()),
            other => Err(MoveError::NotPlaying(other)),
        }
    }
}

/// Precondition: the click must land on the board.
pub struct IndexOnBoard;

impl IndexOnBoard {
    /// Rejects indices past the last cell.
    pub fn check(board: &Board, index: usize) -> Result<(), MoveError> {
        if index < board.len() {
            Ok(())
        } else {
            Err(MoveError::OutOfRange {
                index,
                len: board.len(),
            })
        }
    }
}

/// Precondition: the clicked tile must touch the blank.
pub struct AdjacentToBlank;

impl AdjacentToBlank {
    /// Rejects tiles that are not grid-adjacent to the blank.
    pub fn check(board: &Board, index: usize) -> Result<(), MoveError> {
        if board.is_movable(index) {
            Ok(())
        } else {
            Err(MoveError::NotAdjacent {
                index,
                empty: board.empty_index(),
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Slide Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for player slides.
///
/// Preconditions:
/// - Session is playing
/// - Index is on the board
/// - Index is adjacent to the blank
///
/// Postconditions:
/// - Tiles remain a permutation
/// - Empty index points at the blank
/// - Exactly two cells changed, and the blank moved to the clicked index
pub struct SlideContract;

impl Contract<(Board, GameSession), usize> for SlideContract {
    type Checked = Slide;

    #[instrument(skip(state))]
    fn pre(state: &(Board, GameSession), index: &usize) -> Result<Slide, MoveError> {
        let (board, session) = state;
        SessionIsPlaying::check(session)?;
        IndexOnBoard::check(board, *index)?;
        AdjacentToBlank::check(board, *index)?;
        Ok(Slide {
            from: *index,
            to: board.empty_index(),
        })
    }

    #[instrument(skip(before, after))]
    fn post(
        before: &(Board, GameSession),
        after: &(Board, GameSession),
    ) -> Result<(), MoveError> {
        let (before, before_session) = before;
        let (after, after_session) = after;
        BoardInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let changed = before
            .tiles()
            .iter()
            .zip(after.tiles())
            .filter(|(a, b)| a != b)
            .count();
        if changed != 2 || after.tiles()[before.empty_index()] != before.tiles()[after.empty_index()]
        {
            return Err(MoveError::InvariantViolation(format!(
                "Slide changed {} cells, expected a single swap",
                changed
            )));
        }

        if after_session.move_count() != before_session.move_count().saturating_add(1) {
            return Err(MoveError::InvariantViolation(format!(
                "Move count went from {} to {}",
                before_session.move_count(),
                after_session.move_count()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(board: Board) -> (Board, GameSession) {
        (board, GameSession::new())
    }

    #[test]
    fn test_precondition_adjacent_click() {
        let state = playing(Board::solved(3));
        assert_eq!(
            SlideContract::pre(&state, &7),
            Ok(Slide { from: 7, to: 8 })
        );
    }

    #[test]
    fn test_precondition_far_click() {
        let state = playing(Board::solved(3));
        assert!(matches!(
            SlideContract::pre(&state, &0),
            Err(MoveError::NotAdjacent { index: 0, empty: 8 })
        ));
    }

    #[test]
    fn test_precondition_off_board() {
        let state = playing(Board::solved(3));
        assert!(matches!(
            SlideContract::pre(&state, &9),
            Err(MoveError::OutOfRange { index: 9, len: 9 })
        ));
    }

    #[test]
    fn test_precondition_not_playing() {
        let mut session = GameSession::new();
        session.set_status(Status::GameOver);
        let state = (Board::solved(3), session);
        assert_eq!(
            SlideContract::pre(&state, &7),
            Err(MoveError::NotPlaying(Status::GameOver))
        );
    }

    #[test]
    fn test_postcondition_detects_double_swap() {
        let before = playing(Board::solved(3));
        let mut board = Board::solved(3);
        board.swap_with_empty(7);
        board.swap_with_empty(6);
        let mut session = GameSession::new();
        session.record_move();
        assert!(SlideContract::post(&before, &(board, session)).is_err());
    }

    #[test]
    fn test_postcondition_detects_missing_count() {
        let before = playing(Board::solved(3));
        let mut board = Board::solved(3);
        board.swap_with_empty(7);
        assert!(SlideContract::post(&before, &(board, GameSession::new())).is_err());
    }
}
