//! Session store trait.
//!
//! Defines the interface for accumulating per-user search state across
//! conversational turns.

use async_trait::async_trait;

use crate::error::Result;
use crate::filters::CanonicalFilters;

/// An abstract store for per-user search sessions.
///
/// `merge` is the sole mutation path for filter state. Implementations must
/// serialize concurrent merges for the same user (duplicate retries must
/// not lose updates) while keeping different users fully independent; no
/// global lock.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the accumulated filters for a user, if a session exists.
    async fn get(&self, user_id: &str) -> Result<Option<CanonicalFilters>>;

    /// Overlays `incoming` onto the user's session (creating it if absent)
    /// and returns the new accumulated state.
    ///
    /// Merge semantics are those of
    /// [`CanonicalFilters::overlay`](crate::filters::CanonicalFilters::overlay):
    /// set fields win wholesale, unset fields keep the stored value.
    async fn merge(&self, user_id: &str, incoming: &CanonicalFilters) -> Result<CanonicalFilters>;

    /// Deletes the user's session. Deleting a missing session is not an
    /// error.
    async fn delete(&self, user_id: &str) -> Result<()>;
}
