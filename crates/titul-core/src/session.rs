//! Persisted session record.
//!
//! One JSON file under a fixed path, restored at startup, rewritten when
//! the server returns a new coin balance, deleted on logout. A corrupt or
//! missing file simply means an unauthenticated start — never fatal.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;
use crate::types::User;

/// The locally cached session mirror of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub id: i64,
    pub username: String,
    pub coins: i64,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<&User> for StoredSession {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            coins: user.coins,
            is_admin: user.is_admin,
        }
    }
}

/// Restores the stored session, if any.
pub fn load() -> Option<StoredSession> {
    load_from(&paths::session_path())
}

fn load_from(path: &Path) -> Option<StoredSession> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "discarding corrupt session file");
            None
        }
    }
}

/// Writes the session record, creating the parent directory if needed.
pub fn save(session: &StoredSession) -> Result<()> {
    save_to(&paths::session_path(), session)
}

fn save_to(path: &Path, session: &StoredSession) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write session: {}", path.display()))?;
    Ok(())
}

/// Deletes the session record (logout). Missing file is fine.
pub fn clear() -> Result<()> {
    let path = paths::session_path();
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}
