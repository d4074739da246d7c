//! First-class move types for the sliding puzzle.
//!
//! A click names a board position. It becomes a [`Slide`] once it has been
//! checked against the blank, or a [`MoveError`] saying why it was ignored.

use crate::session::Status;
use serde::{Deserialize, Serialize};

/// A validated slide: the tile at `from` moves into the blank at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slide {
    /// Position of the tile that moves.
    pub from: usize,
    /// Position of the blank before the move.
    pub to: usize,
}

impl std::fmt::Display for Slide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Why a click did not move anything.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The session is not accepting moves.
    #[display("Session is {}, not accepting moves", _0)]
    NotPlaying(Status),

    /// The click is off the board.
    #[display("Index {} is outside a board of {} cells", index, len)]
    OutOfRange {
        /// Clicked index.
        index: usize,
        /// Number of cells.
        len: usize,
    },

    /// The clicked tile does not touch the blank.
    #[display("Index {} is not adjacent to the blank at {}", index, empty)]
    NotAdjacent {
        /// Clicked index.
        index: usize,
        /// Blank position.
        empty: usize,
    },

    /// A postcondition failed after the slide.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
