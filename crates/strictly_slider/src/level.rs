//! Level configuration supplied by the host.
//!
//! A level list is validated once, when the controller is built. After that
//! every [`LevelConfig`] is treated as immutable.

use derive_getters::Getters;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Difficulty tier of a level.
///
/// The tier picks the default grid size and the number of shuffle steps
/// when a level does not override them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// 3x3 board, light scramble.
    #[default]
    Easy,
    /// 4x4 board.
    Medium,
    /// 5x5 board, heavy scramble.
    Hard,
}

impl Difficulty {
    /// Side length used when a level leaves `grid_size` unset.
    pub fn grid_size(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium => 4,
            Self::Hard => 5,
        }
    }

    /// Shuffle steps used when a level leaves `shuffle_steps` unset.
    ///
    /// Larger boards need more steps before the scramble stops looking
    /// like a handful of slides away from solved.
    pub fn shuffle_steps(self) -> usize {
        match self {
            Self::Easy => 30,
            Self::Medium => 80,
            Self::Hard => 150,
        }
    }
}

/// Opaque handle to the picture a level is cut from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Creates an image handle.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One entry of the ordered level list.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Human-readable level name.
    label: String,

    /// Difficulty tier.
    #[serde(default)]
    difficulty: Difficulty,

    /// Picture handle, resolved when the level starts.
    #[serde(rename = "image")]
    image_ref: ImageRef,

    /// Side length override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grid_size: Option<usize>,

    /// Move budget; `None` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_moves: Option<u32>,

    /// Shuffle step override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shuffle_steps: Option<usize>,
}

impl LevelConfig {
    /// Creates a level with the difficulty's defaults and no move budget.
    #[instrument(skip(label, image_ref))]
    pub fn new(
        label: impl Into<String>,
        difficulty: Difficulty,
        image_ref: impl Into<ImageRef>,
    ) -> Self {
        Self {
            label: label.into(),
            difficulty,
            image_ref: image_ref.into(),
            grid_size: None,
            max_moves: None,
            shuffle_steps: None,
        }
    }

    /// Overrides the side length.
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = Some(grid_size);
        self
    }

    /// Sets a move budget.
    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = Some(max_moves);
        self
    }

    /// Overrides the shuffle step count.
    pub fn with_shuffle_steps(mut self, steps: usize) -> Self {
        self.shuffle_steps = Some(steps);
        self
    }

    /// Side length actually used for the board.
    pub fn effective_grid_size(&self) -> usize {
        self.grid_size.unwrap_or_else(|| self.difficulty.grid_size())
    }

    /// Shuffle steps actually used for the scramble.
    pub fn effective_shuffle_steps(&self) -> usize {
        self.shuffle_steps
            .unwrap_or_else(|| self.difficulty.shuffle_steps())
    }
}

/// A level list that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LevelError {
    /// The list is empty.
    #[display("No levels configured")]
    NoLevels,

    /// A board must be at least 2x2.
    #[display("Level '{}' has grid size {}, must be at least 2", label, grid_size)]
    GridTooSmall {
        /// Level label.
        label: String,
        /// Offending size.
        grid_size: usize,
    },

    /// Side length above [`MAX_GRID_SIZE`].
    #[display("Level '{}' has grid size {}, above the limit of {}", label, grid_size, MAX_GRID_SIZE)]
    GridTooLarge {
        /// Level label.
        label: String,
        /// Offending size.
        grid_size: usize,
    },

    /// Shuffle walk longer than [`MAX_SHUFFLE_STEPS`].
    #[display("Level '{}' asks for {} shuffle steps, above the limit of {}", label, steps, MAX_SHUFFLE_STEPS)]
    TooManyShuffleSteps {
        /// Level label.
        label: String,
        /// Offending step count.
        steps: usize,
    },

    /// Labels are shown to the player and must not be blank.
    #[display("Level {} has an empty label", index)]
    EmptyLabel {
        /// Position in the list.
        index: usize,
    },

    /// A zero budget would fail the level on its first move.
    #[display("Level '{}' has a move budget of zero", label)]
    ZeroMoveBudget {
        /// Level label.
        label: String,
    },
}

/// Largest accepted side length.
pub const MAX_GRID_SIZE: usize = 32;

/// Longest accepted shuffle walk.
pub const MAX_SHUFFLE_STEPS: usize = 100_000;

/// Checks every level of the list against the inbound contract.
///
/// # Errors
///
/// Returns the first [`LevelError`] found, in list order.
#[instrument(skip(levels), fields(count = levels.len()))]
pub fn validate_levels(levels: &[LevelConfig]) -> Result<(), LevelError> {
    if levels.is_empty() {
        return Err(LevelError::NoLevels);
    }

    for (index, level) in levels.iter().enumerate() {
        if level.label.trim().is_empty() {
            return Err(LevelError::EmptyLabel { index });
        }
        let grid_size = level.effective_grid_size();
        if grid_size < 2 {
            return Err(LevelError::GridTooSmall {
                label: level.label.clone(),
                grid_size,
            });
        }
        if grid_size > MAX_GRID_SIZE {
            return Err(LevelError::GridTooLarge {
                label: level.label.clone(),
                grid_size,
            });
        }
        let steps = level.effective_shuffle_steps();
        if steps > MAX_SHUFFLE_STEPS {
            return Err(LevelError::TooManyShuffleSteps {
                label: level.label.clone(),
                steps,
            });
        }
        if level.max_moves == Some(0) {
            return Err(LevelError::ZeroMoveBudget {
                label: level.label.clone(),
            });
        }
    }

    debug!("Level list valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_difficulty_defaults_grow() {
        let sizes: Vec<_> = Difficulty::iter().map(Difficulty::grid_size).collect();
        let steps: Vec<_> = Difficulty::iter().map(Difficulty::shuffle_steps).collect();
        assert_eq!(sizes, vec![3, 4, 5]);
        assert_eq!(steps, vec![30, 80, 150]);
    }

    #[test]
    fn test_overrides_win_over_difficulty() {
        let level = LevelConfig::new("Tiny", Difficulty::Hard, "cat.png")
            .with_grid_size(2)
            .with_shuffle_steps(7);
        assert_eq!(level.effective_grid_size(), 2);
        assert_eq!(level.effective_shuffle_steps(), 7);
    }

    #[test]
    fn test_empty_list_rejected() {
        assert_eq!(validate_levels(&[]), Err(LevelError::NoLevels));
    }

    #[test]
    fn test_grid_of_one_rejected() {
        let levels = [LevelConfig::new("One", Difficulty::Easy, "a.png").with_grid_size(1)];
        assert!(matches!(
            validate_levels(&levels),
            Err(LevelError::GridTooSmall { grid_size: 1, .. })
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let levels = [LevelConfig::new("Huge", Difficulty::Easy, "a.png").with_grid_size(usize::MAX)];
        assert!(matches!(
            validate_levels(&levels),
            Err(LevelError::GridTooLarge { .. })
        ));

        let at_limit =
            [LevelConfig::new("Big", Difficulty::Easy, "a.png").with_grid_size(MAX_GRID_SIZE)];
        assert_eq!(validate_levels(&at_limit), Ok(()));
    }

    #[test]
    fn test_excessive_shuffle_steps_rejected() {
        let levels = [LevelConfig::new("Long", Difficulty::Easy, "a.png")
            .with_shuffle_steps(MAX_SHUFFLE_STEPS + 1)];
        assert!(matches!(
            validate_levels(&levels),
            Err(LevelError::TooManyShuffleSteps { steps, .. }) if steps == MAX_SHUFFLE_STEPS + 1
        ));
    }

    #[test]
    fn test_blank_label_rejected() {
        let levels = [
            LevelConfig::new("Fine", Difficulty::Easy, "a.png"),
            LevelConfig::new("  ", Difficulty::Easy, "b.png"),
        ];
        assert_eq!(
            validate_levels(&levels),
            Err(LevelError::EmptyLabel { index: 1 })
        );
    }

    #[test]
    fn test_zero_budget_rejected() {
        let levels = [LevelConfig::new("Strict", Difficulty::Easy, "a.png").with_max_moves(0)];
        assert!(matches!(
            validate_levels(&levels),
            Err(LevelError::ZeroMoveBudget { .. })
        ));
    }

    #[test]
    fn test_difficulty_display_is_lowercase() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }
}
