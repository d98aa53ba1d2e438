//! Inference service boundary: transcription and intent/abuse extraction.
//!
//! Both services run outside this system. The traits here define the
//! contract the turn pipeline consumes; HTTP implementations live in the
//! interaction crate, and tests substitute mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filters::RawCriteria;

/// What the extraction service understood from one utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentExtraction {
    /// The utterance was flagged as abusive.
    pub is_abusive: bool,
    /// Loosely-typed search criteria pulled from the utterance. May be
    /// empty, may contain garbage; only the normalizer decides what counts.
    #[serde(default, rename = "filters")]
    pub criteria: RawCriteria,
}

/// Speech-to-text for an uploaded audio artifact.
///
/// An empty transcript is a valid answer ("nothing understood"), not an
/// error. Errors are transport/availability failures; the caller decides
/// how to degrade.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Intent and abuse extraction over a transcript.
#[async_trait]
pub trait IntentExtractionService: Send + Sync {
    async fn extract(&self, text: &str) -> Result<IntentExtraction>;
}
