//! Level progression controller.
//!
//! [`PuzzleGame`] owns the level list, the active [`Board`], the
//! [`GameSession`] and the [`RewardGate`]. Each public operation runs one
//! discrete input event to completion: a click goes through the move
//! engine, then the detector, then (on the final win) the reward gate.

use crate::board::Board;
use crate::detector;
use crate::engine;
use crate::level::{ImageRef, LevelConfig, LevelError, validate_levels};
use crate::reward::RewardGate;
use crate::session::{GameSession, SessionView, Status};
use crate::shuffle::shuffle_unsolved;
use derive_more::Display;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashSet;
use tracing::{debug, error, info, instrument};

/// A level's picture could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AssetError {
    /// No asset exists for the handle.
    #[display("Cannot load level image '{}'", _0)]
    Missing(ImageRef),
}

impl std::error::Error for AssetError {}

/// Resolves level image handles before a level starts.
pub trait AssetResolver {
    /// Succeeds if `image` can be shown.
    fn resolve(&self, image: &ImageRef) -> Result<(), AssetError>;
}

impl<T: AssetResolver + ?Sized> AssetResolver for Box<T> {
    fn resolve(&self, image: &ImageRef) -> Result<(), AssetError> {
        (**self).resolve(image)
    }
}

/// Accepts every handle. For hosts that resolve pictures elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllAssets;

impl AssetResolver for AcceptAllAssets {
    fn resolve(&self, _image: &ImageRef) -> Result<(), AssetError> {
        Ok(())
    }
}

/// Accepts only the handles it was built with.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    known: HashSet<ImageRef>,
}

impl AssetCatalog {
    /// Creates a catalog of known handles.
    pub fn new(known: impl IntoIterator<Item = ImageRef>) -> Self {
        Self {
            known: known.into_iter().collect(),
        }
    }
}

impl AssetResolver for AssetCatalog {
    fn resolve(&self, image: &ImageRef) -> Result<(), AssetError> {
        if self.known.contains(image) {
            Ok(())
        } else {
            Err(AssetError::Missing(image.clone()))
        }
    }
}

/// The puzzle widget: levels, board, session and reward.
pub struct PuzzleGame<R: Rng = SmallRng> {
    levels: Vec<LevelConfig>,
    session: GameSession,
    board: Option<Board>,
    solution: Vec<usize>,
    load_error: Option<AssetError>,
    rng: R,
    assets: Box<dyn AssetResolver>,
    reward: RewardGate,
}

impl<R: Rng> std::fmt::Debug for PuzzleGame<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleGame")
            .field("levels", &self.levels.len())
            .field("session", &self.session)
            .field("board", &self.board)
            .field("load_error", &self.load_error)
            .field("reward", &self.reward)
            .finish_non_exhaustive()
    }
}

impl PuzzleGame<SmallRng> {
    /// Builds a game whose shuffles are reproducible from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] if the level list fails validation.
    #[instrument(skip(levels, assets, reward), fields(count = levels.len()))]
    pub fn from_seed(
        levels: Vec<LevelConfig>,
        seed: u64,
        assets: impl AssetResolver + 'static,
        reward: RewardGate,
    ) -> Result<Self, LevelError> {
        Self::new(levels, SmallRng::seed_from_u64(seed), assets, reward)
    }
}

impl<R: Rng> PuzzleGame<R> {
    /// Validates the level list and starts level 0.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] if the level list fails validation. A missing
    /// image is not an error here; it puts the session in
    /// [`Status::ConfigError`].
    #[instrument(skip(levels, rng, assets, reward), fields(count = levels.len()))]
    pub fn new(
        levels: Vec<LevelConfig>,
        rng: R,
        assets: impl AssetResolver + 'static,
        reward: RewardGate,
    ) -> Result<Self, LevelError> {
        validate_levels(&levels)?;

        let mut game = Self {
            levels,
            session: GameSession::new(),
            board: None,
            solution: Vec::new(),
            load_error: None,
            rng,
            assets: Box::new(assets),
            reward,
        };
        game.start(0);
        Ok(game)
    }

    /// Starts (or restarts) the level at `index` with a fresh shuffle.
    ///
    /// If the level's image cannot be resolved the session moves to
    /// [`Status::ConfigError`] and no board is shown. An `index` past the
    /// last level is ignored. The shuffled board is never already solved.
    #[instrument(skip(self))]
    pub fn start(&mut self, index: usize) {
        let Some(level) = self.levels.get(index) else {
            debug!(count = self.levels.len(), "No such level, start ignored");
            return;
        };
        self.session.begin_level(index);

        if let Err(e) = self.assets.resolve(level.image_ref()) {
            error!(level = %level.label(), error = %e, "Level cannot load");
            self.session.set_status(Status::ConfigError);
            self.board = None;
            self.solution.clear();
            self.load_error = Some(e);
            return;
        }

        let grid_size = level.effective_grid_size();
        let steps = level.effective_shuffle_steps();
        let scramble = shuffle_unsolved(grid_size, steps, &mut self.rng);
        self.solution = scramble.solution();
        self.board = Some(scramble.into_board());
        self.load_error = None;

        info!(level = %level.label(), grid_size, steps, "Level started");
    }

    /// Handles a click on board position `clicked`.
    ///
    /// Illegal or ignored clicks change nothing. Returns the status after
    /// the click.
    #[instrument(skip(self), fields(level = self.session.current_level_index()))]
    pub fn click(&mut self, clicked: usize) -> Status {
        let Some(board) = self.board.as_ref() else {
            debug!("No board loaded, click ignored");
            return self.session.status();
        };

        let (board, mut session) = match engine::try_move(board, &self.session, clicked) {
            Ok(next) => next,
            Err(e) => {
                debug!(error = %e, "Click ignored");
                return self.session.status();
            }
        };

        let level = &self.levels[session.current_level_index()];
        let status = detector::evaluate(&board, &session, *level.max_moves(), self.is_last_level());
        session.set_status(status);
        self.board = Some(board);
        self.session = session;

        match status {
            Status::LevelComplete => {
                info!(moves = self.session.move_count(), "Level complete");
            }
            Status::GameOver => {
                info!(moves = self.session.move_count(), "Move budget exceeded");
            }
            Status::AllComplete => {
                info!(moves = self.session.move_count(), "All levels complete");
                self.reward.claim();
            }
            Status::Playing | Status::ConfigError => {}
        }
        status
    }

    /// Moves on to the next level after a win.
    ///
    /// Does nothing unless the status is [`Status::LevelComplete`]. A win on
    /// the last level already produced [`Status::AllComplete`].
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> Status {
        if self.session.status() != Status::LevelComplete || self.is_last_level() {
            debug!(status = %self.session.status(), "Advance ignored");
            return self.session.status();
        }

        let next = self.session.current_level_index() + 1;
        info!(next, "Advancing level");
        self.start(next);
        self.session.status()
    }

    /// Replays the current level with a fresh shuffle.
    ///
    /// After [`Status::AllComplete`] this is a full [`reset`](Self::reset),
    /// since a finished play-through only re-enters play from level 0.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Status {
        if self.session.status() == Status::AllComplete {
            return self.reset();
        }
        info!(level = self.session.current_level_index(), "Restarting level");
        self.start(self.session.current_level_index());
        self.session.status()
    }

    /// Starts a new play-through from level 0.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Status {
        info!("Resetting to first level");
        self.reward.rearm();
        self.start(0);
        self.session.status()
    }

    /// Current session state.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.session.status()
    }

    /// Active board, `None` while in [`Status::ConfigError`].
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Level list.
    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    /// Active level.
    pub fn current_level(&self) -> &LevelConfig {
        &self.levels[self.session.current_level_index()]
    }

    /// Why the active level failed to load, if it did.
    pub fn load_error(&self) -> Option<&AssetError> {
        self.load_error.as_ref()
    }

    /// Clicks that undo the active level's shuffle from its starting board.
    pub fn current_solution(&self) -> &[usize] {
        &self.solution
    }

    /// Reward gate.
    pub fn reward(&self) -> &RewardGate {
        &self.reward
    }

    /// True iff the durable reward flag is set.
    pub fn reward_claimed(&self) -> bool {
        self.reward.is_claimed()
    }

    /// Display snapshot for the host.
    pub fn view(&self) -> SessionView {
        let level = self.current_level();
        SessionView {
            status: self.session.status(),
            move_count: self.session.move_count(),
            current_level_index: self.session.current_level_index(),
            level_label: level.label().clone(),
            remaining_moves: self.session.remaining_moves(*level.max_moves()),
        }
    }

    fn is_last_level(&self) -> bool {
        self.session.current_level_index() + 1 == self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Difficulty;
    use crate::reward::{MemoryStore, RewardPayload};

    fn gate() -> RewardGate {
        RewardGate::new(
            MemoryStore::new(),
            RewardPayload {
                message: "Done".to_string(),
                image_ref: ImageRef::new("prize.png"),
            },
        )
    }

    fn two_levels() -> Vec<LevelConfig> {
        vec![
            LevelConfig::new("One", Difficulty::Easy, "one.png").with_shuffle_steps(4),
            LevelConfig::new("Two", Difficulty::Easy, "two.png").with_shuffle_steps(6),
        ]
    }

    fn solve(game: &mut PuzzleGame) -> Status {
        let solution = game.current_solution().to_vec();
        let mut status = game.status();
        for clicked in solution {
            status = game.click(clicked);
        }
        status
    }

    #[test]
    fn test_new_starts_level_zero() {
        let game = PuzzleGame::from_seed(two_levels(), 1, AcceptAllAssets, gate()).expect("valid");
        assert_eq!(game.status(), Status::Playing);
        assert_eq!(game.session().current_level_index(), 0);
        assert_eq!(game.current_solution().len(), 4);
    }

    #[test]
    fn test_invalid_levels_rejected() {
        let result = PuzzleGame::from_seed(Vec::new(), 1, AcceptAllAssets, gate());
        assert!(matches!(result, Err(LevelError::NoLevels)));
    }

    #[test]
    fn test_advance_only_after_level_complete() {
        let mut game = PuzzleGame::from_seed(two_levels(), 2, AcceptAllAssets, gate()).expect("valid");
        assert_eq!(game.advance(), Status::Playing);
        assert_eq!(game.session().current_level_index(), 0);

        assert_eq!(solve(&mut game), Status::LevelComplete);
        assert_eq!(game.advance(), Status::Playing);
        assert_eq!(game.session().current_level_index(), 1);
        assert_eq!(game.session().move_count(), 0);
    }

    #[test]
    fn test_advance_is_noop_when_all_complete() {
        let mut game = PuzzleGame::from_seed(two_levels(), 3, AcceptAllAssets, gate()).expect("valid");
        solve(&mut game);
        game.advance();
        assert_eq!(solve(&mut game), Status::AllComplete);
        assert_eq!(game.advance(), Status::AllComplete);
        assert_eq!(game.session().current_level_index(), 1);
    }

    #[test]
    fn test_restart_keeps_level_and_resets_moves() {
        let mut game = PuzzleGame::from_seed(two_levels(), 4, AcceptAllAssets, gate()).expect("valid");
        solve(&mut game);
        game.advance();
        let first = game.current_solution()[0];
        game.click(first);
        assert_eq!(game.session().move_count(), 1);

        assert_eq!(game.restart(), Status::Playing);
        assert_eq!(game.session().current_level_index(), 1);
        assert_eq!(game.session().move_count(), 0);
    }

    #[test]
    fn test_restart_after_all_complete_resets_to_first_level() {
        let mut game = PuzzleGame::from_seed(two_levels(), 5, AcceptAllAssets, gate()).expect("valid");
        solve(&mut game);
        game.advance();
        solve(&mut game);
        assert_eq!(game.restart(), Status::Playing);
        assert_eq!(game.session().current_level_index(), 0);
    }

    #[test]
    fn test_missing_image_is_config_error() {
        let assets = AssetCatalog::new([ImageRef::new("one.png")]);
        let mut game = PuzzleGame::from_seed(two_levels(), 6, assets, gate()).expect("valid");
        assert_eq!(game.status(), Status::Playing);

        solve(&mut game);
        assert_eq!(game.advance(), Status::ConfigError);
        assert!(game.board().is_none());
        assert_eq!(
            game.load_error(),
            Some(&AssetError::Missing(ImageRef::new("two.png")))
        );
        assert_eq!(game.click(0), Status::ConfigError);
        assert_eq!(game.session().current_level_index(), 1);
    }

    #[test]
    fn test_two_by_two_level_never_starts_solved() {
        let levels = vec![
            LevelConfig::new("Tiny", Difficulty::Easy, "a.png")
                .with_grid_size(2)
                .with_shuffle_steps(12),
        ];
        for seed in 0..20 {
            let mut game =
                PuzzleGame::from_seed(levels.clone(), seed, AcceptAllAssets, gate()).expect("valid");
            assert!(!game.board().expect("board").is_solved());
            assert_eq!(game.status(), Status::Playing);
            assert_eq!(solve(&mut game), Status::AllComplete);
        }
    }

    #[test]
    fn test_start_past_last_level_is_ignored() {
        let mut game = PuzzleGame::from_seed(two_levels(), 8, AcceptAllAssets, gate()).expect("valid");
        let board = game.board().cloned();
        let first = game.current_solution()[0];
        game.click(first);

        game.start(2);
        assert_eq!(game.session().current_level_index(), 0);
        assert_eq!(game.session().move_count(), 1);
        assert_ne!(game.board().cloned(), board);
    }

    #[test]
    fn test_click_at_saturated_move_count_still_slides() {
        let mut game = PuzzleGame::from_seed(two_levels(), 9, AcceptAllAssets, gate()).expect("valid");
        game.session = game.session.clone().with_move_count(u32::MAX);
        let before = game.board().cloned();
        let first = game.current_solution()[0];

        game.click(first);
        assert_ne!(game.board().cloned(), before);
        assert_eq!(game.session().move_count(), u32::MAX);
    }

    #[test]
    fn test_view_reports_budget() {
        let levels = vec![LevelConfig::new("Budget", Difficulty::Easy, "a.png").with_max_moves(40)];
        let game = PuzzleGame::from_seed(levels, 7, AcceptAllAssets, gate()).expect("valid");
        let view = game.view();
        assert_eq!(view.level_label, "Budget");
        assert_eq!(view.remaining_moves, Some(40));
        assert_eq!(view.status, Status::Playing);
    }
}
