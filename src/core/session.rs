//! Signed-in session, persisted between runs.
//!
//! Stored as JSON at `$XDG_DATA_HOME/aarunya/session.json`
//! (default `~/.local/share/aarunya/session.json`), using the same keys the
//! web client keeps in local storage.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::auth::LoginResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    #[serde(rename = "aarunyaId")]
    pub aarunya_id: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            auth_token: resp.token,
            aarunya_id: resp.aarunya_id,
            user_email: resp.email,
            full_name: resp.full_name,
        }
    }
}

/// File-backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_DATA_HOME/aarunya/session.json`.
    pub fn default_path() -> PathBuf {
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
                PathBuf::from(home).join(".local").join("share")
            });
        data_dir.join("aarunya").join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, if any.
    pub fn load(&self) -> anyhow::Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    /// Forget the stored session.  Missing files are fine.
    pub fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
