//! Scramble generation by random walk from the solved board.
//!
//! Every step is a legal slide, so the result is always solvable: undoing
//! the recorded trail in reverse returns to the identity permutation.

use crate::board::{Board, neighbors_of};
use rand::Rng;
use tracing::{debug, instrument};

/// A scrambled board together with the walk that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    board: Board,
    /// Blank position before each step, in step order.
    trail: Vec<usize>,
}

impl Scramble {
    /// The scrambled board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the scramble, keeping only the board.
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Blank positions visited by the walk, before each step.
    pub fn trail(&self) -> &[usize] {
        &self.trail
    }

    /// Number of shuffle steps applied.
    pub fn steps(&self) -> usize {
        self.trail.len()
    }

    /// Clicks that undo the walk, in the order they must be played.
    ///
    /// Step `i` moved the blank away from `trail[i]`; clicking `trail[i]`
    /// moves it back. Replaying the trail in reverse therefore solves the
    /// board in exactly [`steps`](Self::steps) moves.
    pub fn solution(&self) -> Vec<usize> {
        self.trail.iter().rev().copied().collect()
    }
}

impl Scramble {
    /// Walks `steps` more random legal slides.
    ///
    /// Returns false if the blank had nowhere to go.
    fn walk<R: Rng>(&mut self, steps: usize, rng: &mut R) -> bool {
        let grid_size = self.board.grid_size();
        for _ in 0..steps {
            let empty = self.board.empty_index();
            let previous = self.trail.last().copied();
            let candidates: Vec<usize> = neighbors_of(empty, grid_size)
                .into_iter()
                .filter(|&index| Some(index) != previous)
                .collect();
            // Every cell of a 2x2 or larger grid has at least two neighbors.
            if candidates.is_empty() {
                return false;
            }
            let chosen = candidates[rng.random_range(0..candidates.len())];

            self.board.swap_with_empty(chosen);
            self.trail.push(empty);
        }
        true
    }
}

/// Produces a solvable board by applying `steps` random legal slides.
///
/// A step never undoes the one right before it. Zero steps yields the
/// solved board.
#[instrument(skip(rng))]
pub fn shuffle<R: Rng>(grid_size: usize, steps: usize, rng: &mut R) -> Scramble {
    let mut scramble = Scramble {
        board: Board::solved(grid_size),
        trail: Vec::with_capacity(steps),
    };
    scramble.walk(steps, rng);

    debug!(
        steps = scramble.steps(),
        solved = scramble.board.is_solved(),
        "Scramble generated"
    );
    scramble
}

/// Like [`shuffle`], but never hands back a solved board when `steps > 0`.
///
/// A walk that lands on the identity is extended one slide at a time until
/// it leaves it. On a 2x2 grid the blank can only circle, returning home
/// every 12 steps, so a single extra slide is enough there.
#[instrument(skip(rng))]
pub fn shuffle_unsolved<R: Rng>(grid_size: usize, steps: usize, rng: &mut R) -> Scramble {
    let mut scramble = shuffle(grid_size, steps, rng);
    while steps > 0 && scramble.board.is_solved() {
        if !scramble.walk(1, rng) {
            break;
        }
    }
    if scramble.steps() > steps {
        debug!(requested = steps, taken = scramble.steps(), "Scramble extended past solved");
    }
    scramble
}
