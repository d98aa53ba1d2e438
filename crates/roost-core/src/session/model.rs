//! Search session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filters::CanonicalFilters;

/// The filter state one user has accumulated across conversational turns.
///
/// Created on a user's first turn, revised by every following turn, and
/// deleted the moment a turn finds results (the conversation succeeded) or
/// the user cancels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSession {
    pub user_id: String,
    pub current_filters: CanonicalFilters,
    pub updated_at: DateTime<Utc>,
}

impl SearchSession {
    /// Creates a fresh session for a user.
    pub fn new(user_id: impl Into<String>, filters: CanonicalFilters) -> Self {
        Self {
            user_id: user_id.into(),
            current_filters: filters,
            updated_at: Utc::now(),
        }
    }
}
