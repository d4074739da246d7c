//! Permutation invariant: each value `0..n²` appears exactly once.

use super::Invariant;
use crate::board::Board;

/// Invariant: the tiles are a permutation of `0..grid_size²`.
///
/// Slides only swap two cells, so no value can be lost or duplicated.
pub struct PermutationInvariant;

impl Invariant<Board> for PermutationInvariant {
    fn holds(board: &Board) -> bool {
        let cells = board.grid_size() * board.grid_size();
        if board.tiles().len() != cells {
            return false;
        }

        let mut seen = vec![false; cells];
        for &tile in board.tiles() {
            match seen.get_mut(tile) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    fn description() -> &'static str {
        "Tiles form a permutation of 0..grid_size²"
    }
}
