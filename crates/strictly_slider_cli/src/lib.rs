//! Strictly Slider host - runs the puzzle engine from a terminal
//!
//! Wires [`strictly_slider`] to the outside world:
//!
//! - **Config**: TOML level files ([`PuzzleConfig`])
//! - **Store**: the reward flag in a JSON file ([`JsonFileStore`])
//! - **Assets**: level images checked against a directory ([`DirectoryAssets`])
//! - **Play**: a line-oriented play loop over any reader and writer

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assets;
mod cli;
mod config;
mod play;
mod store;

pub use assets::DirectoryAssets;
pub use cli::{Cli, Command};
pub use config::{ConfigError, PuzzleConfig};
pub use play::{HELP, PlayCommand, UnknownCommand, parse_command, run, status_line};
pub use store::JsonFileStore;
