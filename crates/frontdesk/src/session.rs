//! File-backed staff session.
//!
//! The token itself is opaque; its presence is what marks a staff session.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use frontdesk_core::{Error, SessionSource};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Staff session persisted as `session.json`.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    token: Option<String>,
}

impl FileSession {
    /// `<data dir>/frontdesk/session.json`.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("frontdesk")
            .join("session.json")
    }

    /// Load the session at `path`. A missing or unreadable file means no session.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<StoredSession>(&contents) {
                Ok(stored) => Some(stored.token),
                Err(e) => {
                    warn!("Ignoring malformed session file {:?}: {}", path, e);
                    None
                }
            },
            Err(_) => None,
        };
        Self { path, token }
    }

    /// Store a staff token.
    pub async fn sign_in(&mut self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(&StoredSession {
            token: token.trim().to_string(),
        })?;
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        info!("Staff session saved to {:?}", self.path);
        self.token = Some(token.trim().to_string());
        Ok(())
    }

    /// Session file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionSource for FileSession {
    fn has_valid_session(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Delete the session file.
    ///
    /// `SessionSource` is synchronous, so this is a blocking remove; callers
    /// on the runtime should treat it like any other short file operation.
    fn sign_out(&mut self) -> frontdesk_core::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::Session(e.to_string())),
        }
        self.token = None;
        info!("Staff session ended");
        Ok(())
    }
}
