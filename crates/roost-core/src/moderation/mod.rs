//! Abuse moderation: escalating warnings ending in a terminal block.
//!
//! The state machine is deliberately small: `Clean` (no warnings) →
//! `Warned` → `Blocked` once the warning count reaches the threshold.
//! `Blocked` is terminal here; only an administrative action elsewhere can
//! clear it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Number of recorded warnings at which an account is blocked.
pub const BLOCK_THRESHOLD: u32 = 2;

/// Per-user moderation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationState {
    pub user_id: String,
    pub warnings: u32,
    pub blocked: bool,
}

/// What recording one abusive turn did to the user's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationOutcome {
    /// Still below the threshold; `remaining` more violations will block.
    Warned { remaining: u32 },
    /// The threshold was reached (or had already been reached).
    Blocked,
}

impl ModerationState {
    /// Creates a clean record for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            warnings: 0,
            blocked: false,
        }
    }

    /// Registers one abusive turn and advances the state machine.
    ///
    /// Must be called under the store's per-user serialization so the
    /// increment is atomic with respect to concurrent retries.
    pub fn record_abuse(&mut self) -> ModerationOutcome {
        self.warnings += 1;
        if self.warnings >= BLOCK_THRESHOLD {
            self.blocked = true;
            ModerationOutcome::Blocked
        } else {
            ModerationOutcome::Warned {
                remaining: BLOCK_THRESHOLD - self.warnings,
            }
        }
    }
}

/// An abstract store for moderation records.
#[async_trait]
pub trait ModerationRepository: Send + Sync {
    /// Returns the user's moderation record, if one exists. Users with no
    /// record are clean.
    async fn get(&self, user_id: &str) -> Result<Option<ModerationState>>;

    /// Records one abusive turn for the user (creating the record on first
    /// offense) and returns the post-increment state. Implementations must
    /// serialize this per user.
    async fn record_abuse(&self, user_id: &str) -> Result<ModerationState>;
}

/// Invalidates a user's refresh credential so clients are forced to log out.
///
/// The credential system itself belongs to the marketplace's auth layer;
/// this is the one call the moderation flow needs from it.
#[async_trait]
pub trait CredentialRevoker: Send + Sync {
    async fn revoke_refresh(&self, user_id: &str) -> Result<()>;
}
