//! Blank position invariant: `tiles[empty_index]` is the blank.

use super::Invariant;
use crate::board::Board;

/// Invariant: the recorded empty index points at the blank value.
pub struct BlankPositionInvariant;

impl Invariant<Board> for BlankPositionInvariant {
    fn holds(board: &Board) -> bool {
        board.tiles().get(board.empty_index()) == Some(&board.blank())
    }

    fn description() -> &'static str {
        "Empty index holds the blank tile"
    }
}
