//! Search configuration loading.

use std::path::Path;

use roost_core::config::SearchConfig;
use roost_core::error::{Result, RoostError};

/// Loads `SearchConfig` from a TOML file.
pub struct ConfigService;

impl ConfigService {
    /// Reads and parses the config file at `path`.
    pub fn load(path: &Path) -> Result<SearchConfig> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RoostError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<SearchConfig> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(SearchConfig::default());
        }
        Self::load(path)
    }
}
