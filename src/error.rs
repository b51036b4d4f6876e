use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotSignedIn,
    SessionExpired,
    NotFound,
    TaskNotFound,
    ValidationError,
    RemoteError,
    ConfigError,
    IoError,
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSignedIn => "NOT_SIGNED_IN",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::NotFound => "NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::RemoteError => "REMOTE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct MoodtaskError {
    pub code: ErrorCode,
    pub message: String,
}

impl MoodtaskError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_signed_in() -> Self {
        Self::new(
            ErrorCode::NotSignedIn,
            "Not signed in. Run `moodtask login` or `moodtask token set <token>` first.",
        )
    }

    pub fn session_expired() -> Self {
        Self::new(
            ErrorCode::SessionExpired,
            "Session expired or rejected by the server. Sign in again with `moodtask login`.",
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RemoteError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Authentication failures abandon the operation instead of degrading.
    pub fn is_auth(&self) -> bool {
        matches!(self.code, ErrorCode::NotSignedIn | ErrorCode::SessionExpired)
    }
}

impl From<rusqlite::Error> for MoodtaskError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}

impl From<reqwest::Error> for MoodtaskError {
    fn from(e: reqwest::Error) -> Self {
        Self::remote(e.to_string())
    }
}

impl From<std::io::Error> for MoodtaskError {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

impl From<serde_json::Error> for MoodtaskError {
    fn from(e: serde_json::Error) -> Self {
        Self::validation(format!("Invalid JSON: {e}"))
    }
}
