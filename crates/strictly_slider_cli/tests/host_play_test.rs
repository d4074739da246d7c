//! Tests for the terminal host: config files, the JSON reward store and the
//! play loop.

use std::io::Cursor;
use std::path::Path;
use strictly_slider::{GameSession, KeyValueStore, REWARD_CLAIMED_KEY, Status, apply_move};
use strictly_slider_cli::{JsonFileStore, PuzzleConfig, run};
use tempfile::TempDir;

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("puzzle.toml");
    std::fs::write(&path, body).expect("write config");
    path
}

const ONE_LEVEL: &str = r#"
completion_message = "Discount unlocked"
seed = 5

[[levels]]
label = "Only"
difficulty = "easy"
image = "cat.png"
"#;

#[test]
fn test_store_path_is_relative_to_config() {
    let dir = TempDir::new().expect("temp dir");
    let config = PuzzleConfig::from_file(write_config(dir.path(), ONE_LEVEL)).expect("config");
    assert_eq!(
        config.store_path(),
        &dir.path().join("strictly_slider_reward.json")
    );
}

#[test]
fn test_reward_persists_across_games() {
    let dir = TempDir::new().expect("temp dir");
    let config = PuzzleConfig::from_file(write_config(dir.path(), ONE_LEVEL)).expect("config");

    let mut game = config.build_game(None).expect("game");
    assert!(!game.reward_claimed());
    for clicked in game.current_solution().to_vec() {
        game.click(clicked);
    }
    assert_eq!(game.status(), Status::AllComplete);

    let store = JsonFileStore::new(config.store_path().clone());
    assert_eq!(
        store.read(REWARD_CLAIMED_KEY).expect("read"),
        Some("true".to_string())
    );

    // A brand-new game over the same file sees the claim.
    let again = config.build_game(Some(99)).expect("game");
    assert!(again.reward_claimed());
    assert_eq!(again.status(), Status::Playing);
}

#[test]
fn test_missing_image_directory_gives_config_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir(dir.path().join("images")).expect("mkdir");
    let body = format!("assets_dir = \"images\"\n{}", ONE_LEVEL);
    let config = PuzzleConfig::from_file(write_config(dir.path(), &body)).expect("config");

    let game = config.build_game(None).expect("game");
    assert_eq!(game.status(), Status::ConfigError);

    std::fs::write(dir.path().join("images").join("cat.png"), b"png").expect("image");
    let game = config.build_game(None).expect("game");
    assert_eq!(game.status(), Status::Playing);
}

#[test]
fn test_play_loop_solves_by_tile_numbers() {
    let dir = TempDir::new().expect("temp dir");
    let config = PuzzleConfig::from_file(write_config(dir.path(), ONE_LEVEL)).expect("config");
    let mut game = config.build_game(None).expect("game");

    // Translate the solution's board indices into the tile numbers a
    // player would type.
    let mut board = game.board().expect("board").clone();
    let mut session = GameSession::new();
    let mut script = String::new();
    for clicked in game.current_solution().to_vec() {
        script.push_str(&format!("{}\n", board.tiles()[clicked] + 1));
        (board, session) = apply_move(&board, &session, clicked);
    }
    script.push_str("quit\n");

    let mut out = Vec::new();
    run(&mut game, Cursor::new(script), &mut out).expect("loop");
    let text = String::from_utf8(out).expect("utf8");

    assert_eq!(game.status(), Status::AllComplete);
    assert!(text.contains("Every level solved!"));
    assert!(text.contains("Discount unlocked [cat.png]"));
}

#[test]
fn test_play_loop_reports_bad_input_and_quits() {
    let dir = TempDir::new().expect("temp dir");
    let config = PuzzleConfig::from_file(write_config(dir.path(), ONE_LEVEL)).expect("config");
    let mut game = config.build_game(None).expect("game");

    let mut out = Vec::new();
    run(&mut game, Cursor::new("jump\nnext\nquit\n1\n"), &mut out).expect("loop");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.contains("Unrecognized input 'jump'"));
    assert!(text.contains("Level 1/1 'Only' | moves 0"));
    assert_eq!(game.session().move_count(), 0);
}
