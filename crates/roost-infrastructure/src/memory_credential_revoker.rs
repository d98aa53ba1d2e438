//! In-memory credential revocation.
//!
//! The marketplace's auth layer owns real refresh tokens; this records the
//! revocation signal so the rest of the pipeline (and tests) can observe it.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roost_core::error::Result;
use roost_core::moderation::CredentialRevoker;

pub struct InMemoryCredentialRevoker {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryCredentialRevoker {
    pub fn new() -> Self {
        Self {
            revoked: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Whether the user's refresh credential has been revoked.
    pub async fn is_revoked(&self, user_id: &str) -> bool {
        self.revoked.read().await.contains(user_id)
    }
}

impl Default for InMemoryCredentialRevoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialRevoker for InMemoryCredentialRevoker {
    async fn revoke_refresh(&self, user_id: &str) -> Result<()> {
        let mut revoked = self.revoked.write().await;
        revoked.insert(user_id.to_string());
        tracing::info!(target: "moderation", user_id, "refresh credential revoked");
        Ok(())
    }
}
