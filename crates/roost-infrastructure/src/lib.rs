pub mod config_service;
pub mod memory_credential_revoker;
pub mod memory_listing_index;
pub mod memory_moderation_store;
pub mod memory_session_store;

pub use crate::config_service::ConfigService;
pub use crate::memory_credential_revoker::InMemoryCredentialRevoker;
pub use crate::memory_listing_index::InMemoryListingIndex;
pub use crate::memory_moderation_store::InMemoryModerationStore;
pub use crate::memory_session_store::InMemorySessionStore;
