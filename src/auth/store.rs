//! Persistent session storage.
//!
//! Two records under a per-installation directory: the bearer token (plain
//! text) and the cached user profile (JSON with an epoch-millisecond
//! timestamp). Corrupt or unreadable records read as absent - a broken
//! local cache must never block a fresh login.
//!
//! No network access; everything here is local file IO.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::User;

/// Token record file name in the storage directory.
const TOKEN_FILE: &str = "auth_token";

/// Cached profile record file name.
const PROFILE_FILE: &str = "cached_user.json";

/// A cached profile counts as fresh for this long.
const CACHE_MAX_AGE_HOURS: i64 = 24;

/// Directory name under the platform data directory.
const APP_DIR: &str = "pixstop";

/// Profile snapshot persisted together with its fetch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedUser {
    pub user: User,
    #[serde(rename = "lastUpdated", with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
}

impl CachedUser {
    pub fn new(user: User) -> Self {
        Self {
            user,
            last_updated: Utc::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Utc::now() - self.last_updated
    }

    /// True while the snapshot is younger than 24 hours. Advisory only:
    /// the offline fallback serves stale snapshots too.
    pub fn is_fresh(&self) -> bool {
        self.age() < Duration::hours(CACHE_MAX_AGE_HOURS)
    }
}

/// Key-value persistence for the session, surviving restarts. Stateless
/// over its files: every read hits disk, so concurrent writers degrade to
/// last-write-wins without corruption of in-memory state.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Store under the platform data directory (`~/.local/share/pixstop`
    /// on Linux).
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Self::new(base.join(APP_DIR))
    }

    // =========================================================================
    // Token
    // =========================================================================

    pub fn save_token(&self, token: &str) -> Result<()> {
        std::fs::write(self.token_path(), token).context("Failed to write token")
    }

    /// The stored token, or `None` when missing, empty, or unreadable.
    pub fn token(&self) -> Option<String> {
        let path = self.token_path();
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    pub fn clear_token(&self) -> Result<()> {
        Self::remove(self.token_path())
    }

    // =========================================================================
    // Cached profile
    // =========================================================================

    /// Overwrite the cached profile, stamped with the current time.
    pub fn save_profile(&self, user: &User) -> Result<()> {
        let cached = CachedUser::new(user.clone());
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(self.profile_path(), contents).context("Failed to write cached profile")
    }

    /// The cached profile, or `None` when missing or unparseable.
    pub fn profile(&self) -> Option<CachedUser> {
        let path = self.profile_path();
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to read cached profile");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(cached) => Some(cached),
            Err(e) => {
                warn!(error = %e, "Cached profile is corrupt, treating as absent");
                None
            }
        }
    }

    pub fn clear_profile(&self) -> Result<()> {
        Self::remove(self.profile_path())
    }

    /// True iff a cached profile exists and is younger than 24 hours.
    pub fn is_fresh(&self) -> bool {
        self.profile().map(|cached| cached.is_fresh()).unwrap_or(false)
    }

    /// Remove both records (logout and session invalidation path).
    pub fn clear_all(&self) -> Result<()> {
        self.clear_token()?;
        self.clear_profile()
    }

    fn remove(path: PathBuf) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }
}

// ============================================================================
// Tests
// ============================================================================
