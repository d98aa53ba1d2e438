//! In-memory moderation record store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use roost_core::error::Result;
use roost_core::moderation::{ModerationRepository, ModerationState};

/// Keyed in-memory store of per-user moderation records.
///
/// Same locking shape as the session store: a brief outer map lock, one
/// mutex per user so increments are atomic under concurrent retries.
pub struct InMemoryModerationStore {
    records: Arc<RwLock<HashMap<String, Arc<Mutex<ModerationState>>>>>,
}

impl InMemoryModerationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryModerationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModerationRepository for InMemoryModerationStore {
    async fn get(&self, user_id: &str) -> Result<Option<ModerationState>> {
        let entry = {
            let records = self.records.read().await;
            records.get(user_id).cloned()
        };
        match entry {
            Some(entry) => Ok(Some(entry.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn record_abuse(&self, user_id: &str) -> Result<ModerationState> {
        let entry = {
            let mut records = self.records.write().await;
            records
                .entry(user_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(ModerationState::new(user_id))))
                .clone()
        };

        let mut state = entry.lock().await;
        state.record_abuse();
        tracing::warn!(
            target: "moderation",
            user_id,
            warnings = state.warnings,
            blocked = state.blocked,
            "abusive turn recorded"
        );
        Ok(state.clone())
    }
}
