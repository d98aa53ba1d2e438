//! Turn-scoped audio artifact handling.

use std::path::{Path, PathBuf};

use roost_core::error::{Result, RoostError};

/// Owns the uploaded audio file for the duration of one turn.
///
/// The artifact is removed when the guard drops, which covers every exit
/// path out of the turn: success, degraded turns, moderation
/// short-circuits and errors alike. A failed removal is logged and
/// swallowed; it must never surface to the user.
pub struct AudioArtifact {
    path: PathBuf,
}

impl AudioArtifact {
    /// Takes ownership of the uploaded file at `path`.
    pub fn claim(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the audio bytes. A missing or unreadable artifact is a client
    /// input error.
    pub async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            RoostError::invalid_input(format!(
                "audio artifact {} is unreadable: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Drop for AudioArtifact {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(
                target: "turn",
                path = %self.path.display(),
                error = %e,
                "failed to remove audio artifact"
            );
        }
    }
}
