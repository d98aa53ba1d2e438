//! Search engine configuration model.
//!
//! Loaded from TOML by the infrastructure layer; every section and field
//! has a default so a missing or partial file still yields a working
//! configuration.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub inference: InferenceConfig,
    pub results: ResultsConfig,
    pub session: SessionConfig,
}

/// Endpoint and timeouts for the external inference service.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InferenceConfig {
    pub base_url: String,
    pub transcription_timeout_ms: u64,
    pub extraction_timeout_ms: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8089".to_string(),
            transcription_timeout_ms: 15_000,
            extraction_timeout_ms: 10_000,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ResultsConfig {
    /// Listings returned per page once a search finds matches.
    pub page_size: u32,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self { page_size: 20 }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds of inactivity after which an abandoned session is removed.
    /// `0` disables expiry.
    pub idle_ttl_secs: u64,
    /// How often the expiry sweeper runs.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: 1800,
            sweep_interval_secs: 60,
        }
    }
}
