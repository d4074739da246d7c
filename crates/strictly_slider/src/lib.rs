//! Strictly Slider - progressive sliding-tile puzzle engine
//!
//! Pure game logic with no rendering, transport or storage technology
//! attached. Hosts feed it a level list and click events and read back a
//! [`SessionView`] and the durable reward flag.
//!
//! # Architecture
//!
//! - **Board**: tile permutation, blank position, adjacency
//! - **Shuffle**: random walk from solved, so every scramble is solvable
//! - **Engine**: applies one click, ignoring illegal ones
//! - **Detector**: win / budget-exceeded classification after each move
//! - **Progression**: level list, start / advance / restart / reset
//! - **Reward**: writes `rewardClaimed` once the last level is solved
//!
//! # Example
//!
//! ```
//! use strictly_slider::{
//!     AcceptAllAssets, Difficulty, ImageRef, LevelConfig, MemoryStore, PuzzleGame,
//!     RewardGate, RewardPayload, Status,
//! };
//!
//! let levels = vec![LevelConfig::new("Warm-up", Difficulty::Easy, "cat.png")];
//! let reward = RewardGate::new(
//!     MemoryStore::new(),
//!     RewardPayload {
//!         message: "Enjoy 10% off".to_string(),
//!         image_ref: ImageRef::new("cat.png"),
//!     },
//! );
//! let mut game = PuzzleGame::from_seed(levels, 42, AcceptAllAssets, reward)?;
//!
//! for clicked in game.current_solution().to_vec() {
//!     game.click(clicked);
//! }
//! assert_eq!(game.status(), Status::AllComplete);
//! assert!(game.reward_claimed());
//! # Ok::<(), strictly_slider::LevelError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod detector;
mod engine;
mod invariants;
mod level;
mod progression;
mod reward;
mod session;
mod shuffle;

// Crate-level exports - Board model
pub use board::{Board, is_solved, neighbors_of};

// Crate-level exports - Shuffle generator
pub use shuffle::{Scramble, shuffle, shuffle_unsolved};

// Crate-level exports - Moves
pub use action::{MoveError, Slide};
pub use contracts::{AdjacentToBlank, Contract, IndexOnBoard, SessionIsPlaying, SlideContract};
pub use engine::{apply_move, try_move};

// Crate-level exports - Win/fail detection
pub use detector::evaluate;

// Crate-level exports - Invariants
pub use invariants::{
    BlankPositionInvariant, BoardInvariants, Invariant, InvariantSet, InvariantViolation,
    PermutationInvariant,
};

// Crate-level exports - Levels and progression
pub use level::{
    Difficulty, ImageRef, LevelConfig, LevelError, MAX_GRID_SIZE, MAX_SHUFFLE_STEPS, validate_levels,
};
pub use progression::{AcceptAllAssets, AssetCatalog, AssetError, AssetResolver, PuzzleGame};
pub use session::{GameSession, SessionView, Status};

// Crate-level exports - Reward gate
pub use reward::{
    DEFAULT_REWARD_MESSAGE, KeyValueStore, MemoryStore, REWARD_CLAIMED_KEY, RewardGate,
    RewardPayload, StoreError,
};
