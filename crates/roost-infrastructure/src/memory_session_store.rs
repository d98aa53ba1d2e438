//! In-memory session store with per-user serialization and idle expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use roost_core::error::Result;
use roost_core::filters::CanonicalFilters;
use roost_core::session::{SearchSession, SessionStore};

/// Keyed in-memory store of active search sessions.
///
/// The outer map lock is held only to look up or remove an entry; each
/// session has its own mutex, so merges for one user serialize while other
/// users proceed untouched, and no cross-user lock is ever held across an
/// await.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<SearchSession>>>>>,
    sweeper_running: AtomicBool,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            sweeper_running: AtomicBool::new(false),
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Removes sessions idle for `ttl` or longer. Returns how many were
    /// removed. Entries currently being merged are skipped; they are by
    /// definition not idle.
    pub async fn sweep_expired(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let ttl = match chrono::Duration::from_std(ttl) {
            Ok(ttl) => ttl,
            Err(_) => return 0,
        };
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| match entry.try_lock() {
            Ok(session) => now - session.updated_at < ttl,
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(target: "session_expiry", removed, "swept idle search sessions");
        }
        removed
    }

    /// Starts the background expiry sweeper.
    ///
    /// A TTL of zero disables expiry entirely. Only one sweeper runs per
    /// store; later calls are ignored. The returned token stops the task.
    pub fn start_expiry_sweeper(
        self: &Arc<Self>,
        ttl: Duration,
        interval: Duration,
    ) -> Option<CancellationToken> {
        if ttl.is_zero() {
            tracing::info!(target: "session_expiry", "session expiry disabled (ttl = 0)");
            return None;
        }
        if self.sweeper_running.swap(true, Ordering::SeqCst) {
            tracing::warn!(target: "session_expiry", "sweeper already running, skipping");
            return None;
        }

        let store = Arc::clone(self);
        let token = CancellationToken::new();
        let task_token = token.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            tracing::info!(
                target: "session_expiry",
                ttl_secs = ttl.as_secs(),
                interval_secs = interval.as_secs(),
                "sweeper started"
            );
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        store.sweep_expired(Utc::now(), ttl).await;
                    }
                }
            }
            tracing::info!(target: "session_expiry", "sweeper stopped");
        });

        Some(token)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &str) -> Result<Option<CanonicalFilters>> {
        let entry = {
            let sessions = self.sessions.read().await;
            sessions.get(user_id).cloned()
        };
        match entry {
            Some(entry) => Ok(Some(entry.lock().await.current_filters.clone())),
            None => Ok(None),
        }
    }

    async fn merge(&self, user_id: &str, incoming: &CanonicalFilters) -> Result<CanonicalFilters> {
        let entry = {
            let mut sessions = self.sessions.write().await;
            sessions
                .entry(user_id.to_string())
                .or_insert_with(|| {
                    Arc::new(Mutex::new(SearchSession::new(
                        user_id,
                        CanonicalFilters::default(),
                    )))
                })
                .clone()
        };

        let mut session = entry.lock().await;
        session.current_filters.overlay(incoming);
        session.updated_at = Utc::now();
        Ok(session.current_filters.clone())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(user_id);
        Ok(())
    }
}
