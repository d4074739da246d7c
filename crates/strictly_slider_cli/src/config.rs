//! Puzzle configuration loaded from TOML.

use crate::assets::DirectoryAssets;
use crate::store::JsonFileStore;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use strictly_slider::{
    AcceptAllAssets, AssetResolver, DEFAULT_REWARD_MESSAGE, ImageRef, LevelConfig, PuzzleGame,
    RewardGate, RewardPayload, validate_levels,
};
use tracing::{debug, info, instrument};

/// Everything the host needs to run the puzzle.
#[derive(Debug, Clone, Getters, Deserialize)]
pub struct PuzzleConfig {
    /// Ordered level list.
    levels: Vec<LevelConfig>,

    /// Text shown when every level is solved.
    #[serde(default)]
    completion_message: Option<String>,

    /// Picture shown with the completion text; defaults to the last level's.
    #[serde(default)]
    reward_image: Option<ImageRef>,

    /// Seed for reproducible shuffles.
    #[serde(default)]
    seed: Option<u64>,

    /// JSON file holding the reward flag.
    #[serde(default = "default_store_path")]
    store_path: PathBuf,

    /// Directory level images are resolved against.
    #[serde(default)]
    assets_dir: Option<PathBuf>,
}

#[instrument]
fn default_store_path() -> PathBuf {
    PathBuf::from("strictly_slider_reward.json")
}

impl PuzzleConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Relative `store_path` and `assets_dir` entries are taken relative to
    /// the file's directory.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_toml(&content)?;
        if let Some(base) = path.as_ref().parent() {
            config.rebase(base);
        }

        info!(levels = config.levels.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        validate_levels(&config.levels)
            .map_err(|e| ConfigError::new(format!("Invalid levels: {}", e)))?;
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        if self.store_path.is_relative() {
            self.store_path = base.join(&self.store_path);
        }
        if let Some(dir) = self.assets_dir.as_mut().filter(|dir| dir.is_relative()) {
            *dir = base.join(&*dir);
        }
    }

    /// Completion reward: configured text and picture, or the defaults.
    #[instrument(skip(self))]
    pub fn reward_payload(&self) -> RewardPayload {
        let image_ref = self
            .reward_image
            .clone()
            .or_else(|| self.levels.last().map(|level| level.image_ref().clone()))
            .unwrap_or_else(|| ImageRef::new(""));
        RewardPayload {
            message: self
                .completion_message
                .clone()
                .unwrap_or_else(|| DEFAULT_REWARD_MESSAGE.to_string()),
            image_ref,
        }
    }

    /// Asset resolver: files under `assets_dir`, or accept everything.
    pub fn asset_resolver(&self) -> Box<dyn AssetResolver> {
        match &self.assets_dir {
            Some(dir) => Box::new(DirectoryAssets::new(dir.clone())),
            None => Box::new(AcceptAllAssets),
        }
    }

    /// Builds a ready-to-play game.
    ///
    /// `seed_override` wins over the configured seed; with neither, the
    /// shuffle is seeded from the thread RNG.
    #[instrument(skip(self))]
    pub fn build_game(&self, seed_override: Option<u64>) -> Result<PuzzleGame, ConfigError> {
        let seed = seed_override
            .or(self.seed)
            .unwrap_or_else(rand::random::<u64>);
        debug!(seed, "Seeding shuffles");

        let reward = RewardGate::new(
            JsonFileStore::new(self.store_path.clone()),
            self.reward_payload(),
        );
        PuzzleGame::from_seed(self.levels.clone(), seed, self.asset_resolver(), reward)
            .map_err(|e| ConfigError::new(format!("Invalid levels: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
