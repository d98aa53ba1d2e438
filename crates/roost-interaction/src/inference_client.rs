//! HTTP client for the inference service.
//!
//! The inference service performs speech-to-text and intent/abuse
//! extraction behind two JSON endpoints. Audio travels base64-encoded in
//! the request body. Every call carries its own bounded timeout; any
//! transport, status or decode failure surfaces as
//! [`RoostError::Inference`] and the turn pipeline decides how to degrade.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use roost_core::config::InferenceConfig;
use roost_core::error::{Result, RoostError};
use roost_core::inference::{IntentExtraction, IntentExtractionService, TranscriptionService};

const TRANSCRIBE_PATH: &str = "/v1/transcribe";
const EXTRACT_PATH: &str = "/v1/extract-intent";

/// Client for the transcription and intent-extraction endpoints.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    transcription_timeout: Duration,
    extraction_timeout: Duration,
}

#[derive(Serialize)]
struct TranscribeRequest {
    audio: String,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    text: String,
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    text: &'a str,
}

impl InferenceClient {
    /// Creates a client with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(&InferenceConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    /// Creates a client from the inference section of the search config.
    pub fn from_config(config: &InferenceConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transcription_timeout: Duration::from_millis(config.transcription_timeout_ms),
            extraction_timeout: Duration::from_millis(config.extraction_timeout_ms),
        }
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<R> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| RoostError::inference(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RoostError::inference(format!(
                "{url} returned {status}: {detail}"
            )));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| RoostError::inference(format!("{url} returned malformed body: {e}")))
    }
}

#[async_trait]
impl TranscriptionService for InferenceClient {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        let request = TranscribeRequest {
            audio: BASE64_STANDARD.encode(audio),
        };
        let response: TranscribeResponse = self
            .post_json(TRANSCRIBE_PATH, &request, self.transcription_timeout)
            .await?;
        tracing::debug!(
            target: "inference",
            chars = response.text.len(),
            "transcription received"
        );
        Ok(response.text)
    }
}

#[async_trait]
impl IntentExtractionService for InferenceClient {
    async fn extract(&self, text: &str) -> Result<IntentExtraction> {
        let extraction: IntentExtraction = self
            .post_json(EXTRACT_PATH, &ExtractRequest { text }, self.extraction_timeout)
            .await?;
        tracing::debug!(
            target: "inference",
            is_abusive = extraction.is_abusive,
            criteria = extraction.criteria.0.len(),
            "intent extraction received"
        );
        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = InferenceClient::new("http://inference.internal/");
        assert_eq!(client.base_url, "http://inference.internal");
    }

    #[test]
    fn test_extraction_wire_format() {
        let extraction: IntentExtraction = serde_json::from_value(json!({
            "isAbusive": false,
            "filters": { "city": "Lahore", "minRent": "50000" },
        }))
        .unwrap();

        assert!(!extraction.is_abusive);
        assert_eq!(
            extraction.criteria.get("city"),
            Some(&json!("Lahore"))
        );
    }

    #[test]
    fn test_extraction_tolerates_missing_filters_key() {
        let extraction: IntentExtraction =
            serde_json::from_value(json!({ "isAbusive": true })).unwrap();

        assert!(extraction.is_abusive);
        assert!(extraction.criteria.is_empty());
    }

    #[test]
    fn test_transcribe_request_carries_base64_audio() {
        let request = TranscribeRequest {
            audio: BASE64_STANDARD.encode(b"RIFF...."),
        };
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["audio"], BASE64_STANDARD.encode(b"RIFF...."));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_inference_error() {
        let client = InferenceClient::from_config(&InferenceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            transcription_timeout_ms: 200,
            extraction_timeout_ms: 200,
        });

        let err = client.transcribe(b"audio").await.unwrap_err();
        assert!(err.is_inference());
    }
}
