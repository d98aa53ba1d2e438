//! Per-turn orchestration of the conversational search pipeline.
//!
//! One turn runs: moderation gate → transcription → intent extraction →
//! normalization → session merge → relaxed search → response assembly.
//! The two inference stages degrade to defined fallbacks when the service
//! misbehaves; the listing oracle does not (results are the whole point).

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_core::error::Result;
use roost_core::filters::{self, CanonicalFilters};
use roost_core::inference::{IntentExtraction, IntentExtractionService, TranscriptionService};
use roost_core::listing::ListingPage;
use roost_core::moderation::{BLOCK_THRESHOLD, CredentialRevoker, ModerationRepository};
use roost_core::query;
use roost_core::search::{self, ListingOracle};
use roost_core::session::SessionStore;

use crate::audio::AudioArtifact;

const MSG_BLOCKED: &str =
    "Your account has been permanently blocked for repeated abusive messages. Contact support to appeal.";
const MSG_NOT_UNDERSTOOD: &str =
    "Sorry, we couldn't make out what you said. Please try again.";

fn warning_message(remaining: u32) -> String {
    format!(
        "Your message was flagged as abusive. {remaining} more violation(s) and your account will be permanently blocked."
    )
}

/// What one conversational turn returns to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub transcription: String,
    /// The filters the returned results were actually found with.
    pub filters: CanonicalFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ListingPage>,
    pub message: String,
    /// Set only when the moderation gate blocks the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_logout: Option<bool>,
}

impl TurnResponse {
    fn forced_logout() -> Self {
        Self {
            transcription: String::new(),
            filters: CanonicalFilters::default(),
            result: None,
            message: MSG_BLOCKED.to_string(),
            force_logout: Some(true),
        }
    }

    fn without_results(transcription: String, message: impl Into<String>) -> Self {
        Self {
            transcription,
            filters: CanonicalFilters::default(),
            result: None,
            message: message.into(),
            force_logout: None,
        }
    }
}

/// Use case driving one conversational search turn per call.
///
/// Owns the lifecycle of a user's session and moderation records for the
/// duration of the turn; everything stateful is behind the injected
/// stores, so the use case itself is cheap to share.
pub struct SearchTurnUseCase {
    transcription: Arc<dyn TranscriptionService>,
    extraction: Arc<dyn IntentExtractionService>,
    sessions: Arc<dyn SessionStore>,
    moderation: Arc<dyn ModerationRepository>,
    credentials: Arc<dyn CredentialRevoker>,
    listings: Arc<dyn ListingOracle>,
    page_size: u32,
}

impl SearchTurnUseCase {
    /// Creates a use case over the injected collaborators.
    ///
    /// # Arguments
    ///
    /// * `transcription` / `extraction` - clients for the inference service
    /// * `sessions` - per-user accumulated filter state
    /// * `moderation` / `credentials` - abuse records and the logout signal
    /// * `listings` - count/page access to the listing store
    /// * `page_size` - listings returned per page on a successful search
    pub fn new(
        transcription: Arc<dyn TranscriptionService>,
        extraction: Arc<dyn IntentExtractionService>,
        sessions: Arc<dyn SessionStore>,
        moderation: Arc<dyn ModerationRepository>,
        credentials: Arc<dyn CredentialRevoker>,
        listings: Arc<dyn ListingOracle>,
        page_size: u32,
    ) -> Self {
        Self {
            transcription,
            extraction,
            sessions,
            moderation,
            credentials,
            listings,
            page_size,
        }
    }

    /// Processes one uploaded utterance for a user.
    ///
    /// The audio file at `audio_path` is consumed: it is deleted before
    /// this method returns, whatever the outcome. Callers must submit one
    /// user's turns in order (the merge is order-sensitive); turns for
    /// different users can run concurrently.
    pub async fn handle_turn(
        &self,
        user_id: &str,
        audio_path: impl Into<PathBuf>,
    ) -> Result<TurnResponse> {
        let artifact = AudioArtifact::claim(audio_path);
        let turn_id = Uuid::new_v4();
        tracing::info!(target: "turn", %turn_id, user_id, "search turn started");

        // Blocked accounts are turned away before any external work or
        // even reading the upload.
        if let Some(state) = self.moderation.get(user_id).await?
            && state.blocked
        {
            tracing::info!(target: "turn", %turn_id, user_id, "blocked account short-circuited");
            return Ok(TurnResponse::forced_logout());
        }

        let audio = artifact.read().await?;

        let transcription = match self.transcription.transcribe(&audio).await {
            Ok(text) => text,
            Err(e) if e.is_inference() => {
                tracing::warn!(target: "turn", %turn_id, error = %e, "transcription degraded");
                String::new()
            }
            Err(e) => return Err(e),
        };
        if transcription.trim().is_empty() {
            return Ok(TurnResponse::without_results(
                String::new(),
                MSG_NOT_UNDERSTOOD,
            ));
        }

        let extraction = match self.extraction.extract(&transcription).await {
            Ok(extraction) => extraction,
            Err(e) if e.is_inference() => {
                tracing::warn!(target: "turn", %turn_id, error = %e, "extraction degraded");
                IntentExtraction::default()
            }
            Err(e) => return Err(e),
        };

        if extraction.is_abusive {
            let state = self.moderation.record_abuse(user_id).await?;
            if state.blocked {
                self.credentials.revoke_refresh(user_id).await?;
                tracing::info!(target: "turn", %turn_id, user_id, "account blocked");
                return Ok(TurnResponse::forced_logout());
            }
            let remaining = BLOCK_THRESHOLD.saturating_sub(state.warnings);
            return Ok(TurnResponse::without_results(
                transcription,
                warning_message(remaining),
            ));
        }

        let incoming = filters::normalize(&extraction.criteria);
        let accumulated = self.sessions.merge(user_id, &incoming).await?;
        tracing::debug!(target: "turn", %turn_id, ?accumulated, "session merged");

        let relaxation = search::plan(&accumulated, self.listings.as_ref()).await?;

        let result = if relaxation.result_count > 0 {
            let predicate = query::build(&relaxation.filters_used);
            let page = self
                .listings
                .fetch_page(&predicate, 1, self.page_size)
                .await?;
            // The conversation found what it was looking for; the next
            // turn starts from a clean slate.
            self.sessions.delete(user_id).await?;
            Some(page)
        } else {
            None
        };

        tracing::info!(
            target: "turn",
            %turn_id,
            user_id,
            matches = relaxation.result_count,
            dropped = relaxation.dropped_keys.len(),
            "search turn finished"
        );
        Ok(TurnResponse {
            transcription,
            filters: relaxation.filters_used,
            result,
            message: relaxation.message,
            force_logout: None,
        })
    }

    /// Abandons the user's accumulated search, if any.
    pub async fn cancel(&self, user_id: &str) -> Result<()> {
        self.sessions.delete(user_id).await
    }
}
