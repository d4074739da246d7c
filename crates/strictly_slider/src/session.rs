//! Per-widget game session state.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Where the session stands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum Status {
    /// Accepting moves.
    #[default]
    Playing,
    /// Current level solved; more levels remain.
    LevelComplete,
    /// Move budget exceeded on the current level.
    GameOver,
    /// Final level solved. Terminal for this play-through.
    AllComplete,
    /// The current level could not be loaded.
    ConfigError,
}

impl Status {
    /// True for statuses that ignore player moves.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Playing)
    }
}

/// Progress through the level list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSession {
    current_level_index: usize,
    move_count: u32,
    status: Status,
}

impl GameSession {
    /// Creates a session on level 0 with no moves made.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the active level.
    pub fn current_level_index(&self) -> usize {
        self.current_level_index
    }

    /// Moves made on the active level.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Moves left before the budget is exceeded, if there is a budget.
    ///
    /// The move that reaches `max_moves` is still allowed, so a fresh level
    /// with a budget of 5 reports 5.
    pub fn remaining_moves(&self, max_moves: Option<u32>) -> Option<u32> {
        max_moves.map(|max| max.saturating_sub(self.move_count))
    }

    pub(crate) fn begin_level(&mut self, index: usize) {
        self.current_level_index = index;
        self.move_count = 0;
        self.status = Status::Playing;
    }

    pub(crate) fn record_move(&mut self) {
        self.move_count = self.move_count.saturating_add(1);
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    #[cfg(test)]
    pub(crate) fn with_move_count(mut self, move_count: u32) -> Self {
        self.move_count = move_count;
        self
    }
}

/// Snapshot handed to hosts for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Current status.
    pub status: Status,
    /// Moves made on the active level.
    pub move_count: u32,
    /// Zero-based index of the active level.
    pub current_level_index: usize,
    /// Label of the active level.
    pub level_label: String,
    /// Moves left under the budget, if any.
    pub remaining_moves: Option<u32>,
}
