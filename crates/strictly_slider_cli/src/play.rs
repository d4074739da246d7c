//! Line-oriented play loop.
//!
//! The board is printed with tiles numbered from 1; the player types the
//! number of the tile to slide, or a command word.

use rand::Rng;
use std::io::{BufRead, Write};
use strictly_slider::{Board, PuzzleGame, Status};
use tracing::{debug, instrument};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Click the cell at this board index.
    Click(usize),
    /// Go to the next level.
    Next,
    /// Replay the current level.
    Restart,
    /// Start over from the first level.
    Reset,
    /// Print the help text.
    Help,
    /// Leave the loop.
    Quit,
}

/// Input that is neither a tile number nor a command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Unrecognized input '{}', type 'help' for commands", _0)]
pub struct UnknownCommand(pub String);

impl std::error::Error for UnknownCommand {}

/// Help text.
pub const HELP: &str = "Type a tile number to slide it into the gap.\n\
Commands: next (n), restart (r), reset, help (h), quit (q)";

/// Parses a line against the current board.
///
/// Tile numbers are translated to board indices. A number with no tile on
/// the board becomes an off-board click, which the engine ignores.
#[instrument(skip(board))]
pub fn parse_command(input: &str, board: Option<&Board>) -> Result<PlayCommand, UnknownCommand> {
    let trimmed = input.trim().to_lowercase();
    match trimmed.as_str() {
        "n" | "next" => return Ok(PlayCommand::Next),
        "r" | "restart" => return Ok(PlayCommand::Restart),
        "reset" => return Ok(PlayCommand::Reset),
        "h" | "help" | "?" => return Ok(PlayCommand::Help),
        "q" | "quit" | "exit" => return Ok(PlayCommand::Quit),
        _ => {}
    }

    let number: usize = trimmed
        .parse()
        .map_err(|_| UnknownCommand(input.trim().to_string()))?;
    let index = board
        .and_then(|board| {
            let value = number.checked_sub(1)?;
            if value == board.blank() {
                return None;
            }
            board.tiles().iter().position(|&tile| tile == value)
        })
        .unwrap_or(usize::MAX);
    Ok(PlayCommand::Click(index))
}

/// Status line for the current session.
pub fn status_line<R: Rng>(game: &PuzzleGame<R>) -> String {
    let view = game.view();
    let mut line = format!(
        "Level {}/{} '{}' | moves {}",
        view.current_level_index + 1,
        game.levels().len(),
        view.level_label,
        view.move_count
    );
    if let Some(remaining) = view.remaining_moves {
        line.push_str(&format!(" | {} left", remaining));
    }
    let note = match view.status {
        Status::Playing => None,
        Status::LevelComplete => Some("Solved! Type 'next' for the next level."),
        Status::GameOver => Some("Out of moves. Type 'restart' to try again."),
        Status::AllComplete => Some("Every level solved!"),
        Status::ConfigError => Some("Cannot load this level."),
    };
    if let Some(note) = note {
        line.push_str(" | ");
        line.push_str(note);
    }
    line
}

fn print_state<R: Rng, W: Write>(game: &PuzzleGame<R>, out: &mut W) -> std::io::Result<()> {
    if let Some(board) = game.board() {
        writeln!(out, "{}", board)?;
    }
    if let Some(err) = game.load_error() {
        writeln!(out, "{}", err)?;
    }
    writeln!(out, "{}", status_line(game))?;
    if game.status() == Status::AllComplete {
        let payload = game.reward().payload();
        writeln!(out, "{} [{}]", payload.message, payload.image_ref)?;
    }
    Ok(())
}

/// Runs the loop until `quit` or end of input.
#[instrument(skip_all)]
pub fn run<R: Rng, I: BufRead, W: Write>(
    game: &mut PuzzleGame<R>,
    input: I,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{}", HELP)?;
    print_state(game, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line, game.board()) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        debug!(?command, "Command received");

        match command {
            PlayCommand::Click(index) => {
                game.click(index);
            }
            PlayCommand::Next => {
                game.advance();
            }
            PlayCommand::Restart => {
                game.restart();
            }
            PlayCommand::Reset => {
                game.reset();
            }
            PlayCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            PlayCommand::Quit => break,
        }
        print_state(game, out)?;
    }
    Ok(())
}
