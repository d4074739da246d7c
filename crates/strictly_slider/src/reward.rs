//! Reward unlock gate and the durable key-value store it writes to.
//!
//! The only state the rest of an application may read is the
//! [`REWARD_CLAIMED_KEY`] flag. It is written `true` on the first transition
//! into [`Status::AllComplete`](crate::Status::AllComplete) of each
//! play-through and is never written `false`.

use crate::level::ImageRef;
use derive_more::{Display, Error};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Key under which the claim flag is stored.
pub const REWARD_CLAIMED_KEY: &str = "rewardClaimed";

/// Default completion text when the host supplies none.
pub const DEFAULT_REWARD_MESSAGE: &str = "All levels complete! Your reward is unlocked.";

/// Durable store failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Narrow durable key-value store.
pub trait KeyValueStore: Send {
    /// Reads a value, `None` if the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store.
///
/// Clones share the same map, so a test can keep one handle while the
/// gate owns another. Writes can be made to fail to exercise the
/// non-fatal path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<Vec<(String, String)>>>,
    fail_writes: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Every successful write, in order.
    pub fn write_log(&self) -> Vec<(String, String)> {
        self.writes
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StoreError::new(format!("Store lock poisoned: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::new(format!("Write of '{}' refused", key)));
        }
        self.values
            .lock()
            .map_err(|e| StoreError::new(format!("Store lock poisoned: {}", e)))?
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .map_err(|e| StoreError::new(format!("Store lock poisoned: {}", e)))?
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// What the host shows once every level is solved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardPayload {
    /// Completion text.
    pub message: String,
    /// Picture shown with the message.
    pub image_ref: ImageRef,
}

/// Bridges the final win into the durable claim flag.
pub struct RewardGate {
    store: Box<dyn KeyValueStore>,
    payload: RewardPayload,
    claimed_this_run: bool,
}

impl std::fmt::Debug for RewardGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardGate")
            .field("payload", &self.payload)
            .field("claimed_this_run", &self.claimed_this_run)
            .finish_non_exhaustive()
    }
}

impl RewardGate {
    /// Creates a gate over `store` that hands out `payload`.
    #[instrument(skip(store))]
    pub fn new(store: impl KeyValueStore + 'static, payload: RewardPayload) -> Self {
        Self {
            store: Box::new(store),
            payload,
            claimed_this_run: false,
        }
    }

    /// Reward shown to the player. No side effects.
    pub fn payload(&self) -> &RewardPayload {
        &self.payload
    }

    /// Reads the durable flag.
    ///
    /// A missing key or a failed read counts as unclaimed.
    #[instrument(skip(self))]
    pub fn is_claimed(&self) -> bool {
        match self.store.read(REWARD_CLAIMED_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!(error = %e, "Reward flag unreadable");
                false
            }
        }
    }

    /// Writes the claim flag once for the current play-through.
    ///
    /// Returns `true` if the store accepted the write during this call.
    /// A failed write is logged and otherwise ignored; the puzzle keeps
    /// running without the reward.
    #[instrument(skip(self), fields(already = self.claimed_this_run))]
    pub fn claim(&mut self) -> bool {
        if self.claimed_this_run {
            debug!("Reward already claimed this play-through");
            return false;
        }
        self.claimed_this_run = true;

        match self.store.write(REWARD_CLAIMED_KEY, "true") {
            Ok(()) => {
                info!("Reward claimed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Reward flag write failed");
                false
            }
        }
    }

    /// Arms the gate for a new play-through.
    ///
    /// The stored flag is left as is; a claim is never revoked.
    #[instrument(skip(self))]
    pub fn rearm(&mut self) {
        self.claimed_this_run = false;
    }
}
