//! Command-line interface for strictly_slider.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Slider - progressive sliding-tile puzzle
#[derive(Parser, Debug)]
#[command(name = "strictly_slider")]
#[command(about = "Sliding-tile puzzle with levels and an unlockable reward", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the puzzle in the terminal
    Play {
        /// Path to the puzzle configuration
        #[arg(short, long, default_value = "puzzle.toml")]
        config: PathBuf,

        /// Shuffle seed, overriding the configured one
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a configuration and list its levels
    Check {
        /// Path to the puzzle configuration
        #[arg(short, long, default_value = "puzzle.toml")]
        config: PathBuf,
    },

    /// Print whether the reward has been claimed
    Reward {
        /// Path to the reward store file
        #[arg(long, default_value = "strictly_slider_reward.json")]
        store: PathBuf,
    },
}
