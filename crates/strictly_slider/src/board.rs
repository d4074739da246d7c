//! Board model for the sliding-tile puzzle.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Grid positions adjacent to `index` on a `grid_size` x `grid_size` board.
///
/// Order is up, down, left, right; positions off the edge are left out.
/// An `index` outside the board has no neighbors.
#[instrument]
pub fn neighbors_of(index: usize, grid_size: usize) -> Vec<usize> {
    let cells = grid_size.saturating_mul(grid_size);
    if index >= cells {
        return Vec::new();
    }

    let (row, col) = (index / grid_size, index % grid_size);
    let mut neighbors = Vec::with_capacity(4);
    if row > 0 {
        neighbors.push(index - grid_size);
    }
    if row + 1 < grid_size {
        neighbors.push(index + grid_size);
    }
    if col > 0 {
        neighbors.push(index - 1);
    }
    if col + 1 < grid_size {
        neighbors.push(index + 1);
    }
    neighbors
}

/// True iff every tile sits on its own index.
#[instrument(skip(tiles), fields(len = tiles.len()))]
pub fn is_solved(tiles: &[usize]) -> bool {
    tiles.iter().enumerate().all(|(i, &tile)| tile == i)
}

/// One level's tile permutation.
///
/// `tiles` is row-major. The highest value, `grid_size² - 1`, is the blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid_size: usize,
    tiles: Vec<usize>,
    empty_index: usize,
}

impl Board {
    /// Creates a solved board (identity permutation, blank in the last cell).
    ///
    /// A `grid_size` of 0 gives an empty board with no blank.
    #[instrument]
    pub fn solved(grid_size: usize) -> Self {
        let cells = grid_size.saturating_mul(grid_size);
        Self {
            grid_size,
            tiles: (0..cells).collect(),
            empty_index: cells.saturating_sub(1),
        }
    }

    /// Builds a board from an explicit tile layout.
    ///
    /// Returns `None` unless `tiles` is a permutation of `0..grid_size²`.
    #[instrument(skip(tiles))]
    pub fn from_tiles(grid_size: usize, tiles: Vec<usize>) -> Option<Self> {
        let cells = grid_size.checked_mul(grid_size)?;
        if cells == 0 || tiles.len() != cells {
            return None;
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            if tile >= cells || seen[tile] {
                return None;
            }
            seen[tile] = true;
        }

        let blank = cells - 1;
        let empty_index = tiles.iter().position(|&tile| tile == blank)?;
        Some(Self {
            grid_size,
            tiles,
            empty_index,
        })
    }

    /// Side length.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Only a board built with `Board::solved(0)` is empty.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile values in row-major order.
    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    /// Position of the blank.
    pub fn empty_index(&self) -> usize {
        self.empty_index
    }

    /// Value that marks the blank.
    pub fn blank(&self) -> usize {
        self.tiles.len().saturating_sub(1)
    }

    /// Positions that may slide into the blank.
    #[instrument(skip(self), fields(empty = self.empty_index))]
    pub fn movable(&self) -> Vec<usize> {
        neighbors_of(self.empty_index, self.grid_size)
    }

    /// True iff `index` is adjacent to the blank.
    pub fn is_movable(&self, index: usize) -> bool {
        self.movable().contains(&index)
    }

    /// True iff the tiles form the identity permutation.
    pub fn is_solved(&self) -> bool {
        is_solved(&self.tiles)
    }

    /// Swaps the blank with `index` without any adjacency check.
    ///
    /// Callers go through the move engine or the shuffle generator.
    pub(crate) fn swap_with_empty(&mut self, index: usize) {
        self.tiles.swap(index, self.empty_index);
        self.empty_index = index;
    }

    #[cfg(test)]
    pub(crate) fn tiles_mut(&mut self) -> &mut Vec<usize> {
        &mut self.tiles
    }

    /// Formats the board as a text grid, tiles numbered from 1.
    pub fn render(&self) -> String {
        let width = self.tiles.len().to_string().len();
        let blank = self.blank();
        let mut out = String::new();
        if self.tiles.is_empty() {
            return out;
        }
        for (row, chunk) in self.tiles.chunks(self.grid_size).enumerate() {
            if row > 0 {
                out.push('\n');
            }
            let cells: Vec<String> = chunk
                .iter()
                .map(|&tile| {
                    if tile == blank {
                        " ".repeat(width)
                    } else {
                        format!("{:>width$}", tile + 1)
                    }
                })
                .collect();
            out.push_str(&cells.join(" | "));
        }
        out
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
