use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config;
use crate::error::MoodtaskError;

/// Sessions last as long as the web client's cookie did.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Single source of the bearer token.
pub trait SessionProvider {
    /// The current token, or `None` when absent or expired.
    fn get(&self) -> Option<Token>;
    fn set(&self, token: Token) -> Result<(), MoodtaskError>;
    fn clear(&self) -> Result<(), MoodtaskError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Token persisted as `session.json` under the moodtask home.
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn open_default() -> Result<Self, MoodtaskError> {
        Ok(Self::new(config::home_dir()?.join("session.json")))
    }

    fn read(&self) -> Option<StoredSession> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "ignoring unreadable session file");
                None
            }
        }
    }
}

impl SessionProvider for FileSession {
    fn get(&self) -> Option<Token> {
        let stored = self.read()?;
        if stored.expires_at <= Utc::now() {
            debug!("stored session has expired");
            return None;
        }
        if stored.token.is_empty() {
            return None;
        }
        Some(Token(stored.token))
    }

    fn set(&self, token: Token) -> Result<(), MoodtaskError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            token: token.0,
            expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), MoodtaskError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
