//! Strictly Slider - terminal host
//!
//! Plays the puzzle over stdin/stdout. Logs go to stderr.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use strictly_slider::{AssetResolver, KeyValueStore, REWARD_CLAIMED_KEY};
use strictly_slider_cli::{Cli, Command, JsonFileStore, PuzzleConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, seed } => run_play(config, seed),
        Command::Check { config } => run_check(config),
        Command::Reward { store } => run_reward(store),
    }
}

/// Play the configured levels interactively
#[instrument]
fn run_play(config: PathBuf, seed: Option<u64>) -> Result<()> {
    let config = PuzzleConfig::from_file(&config)?;
    let mut game = config.build_game(seed)?;
    info!(levels = game.levels().len(), "Starting puzzle");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    strictly_slider_cli::run(&mut game, stdin.lock(), &mut stdout)?;

    info!(
        status = %game.status(),
        reward_claimed = game.reward_claimed(),
        "Puzzle closed"
    );
    Ok(())
}

/// Validate a configuration and print its levels
#[instrument]
fn run_check(config: PathBuf) -> Result<()> {
    let config = PuzzleConfig::from_file(&config)?;
    for (index, level) in config.levels().iter().enumerate() {
        let budget = (*level.max_moves())
            .map(|max| max.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        println!(
            "{}. {} [{}] {}x{} shuffle {} moves {} image {}",
            index + 1,
            level.label(),
            level.difficulty(),
            level.effective_grid_size(),
            level.effective_grid_size(),
            level.effective_shuffle_steps(),
            budget,
            level.image_ref()
        );
    }

    let resolver = config.asset_resolver();
    let mut missing = 0;
    for level in config.levels() {
        if let Err(e) = resolver.resolve(level.image_ref()) {
            println!("warning: {}", e);
            missing += 1;
        }
    }
    println!(
        "{} level(s), {} missing image(s), reward store {}",
        config.levels().len(),
        missing,
        config.store_path().display()
    );
    Ok(())
}

/// Print the reward flag
#[instrument]
fn run_reward(store: PathBuf) -> Result<()> {
    let store = JsonFileStore::new(store);
    let claimed = store.read(REWARD_CLAIMED_KEY)?.as_deref() == Some("true");
    println!("{}={}", REWARD_CLAIMED_KEY, claimed);
    Ok(())
}
