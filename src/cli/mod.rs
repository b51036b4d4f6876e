pub mod arrange;
pub mod auth;
pub mod commands;
pub mod history;
pub mod mood;
pub mod profile;
pub mod report;
pub mod settings;
pub mod task;

pub use commands::*;

use tracing::warn;

use crate::api::{FileSession, HttpApi, SessionProvider};
use crate::config::Config;
use crate::db::{connection, mood_log_repo};
use crate::error::{ErrorCode, MoodtaskError};
use crate::models::{Mood, MoodLogEntry, MoodSource};
use crate::output;

/// Exit code for a degraded result (a fallback produced it).
pub const EXIT_DEGRADED: i32 = 2;

/// Print the error the way the command was asked to and return exit code 1.
/// A rejected session is forgotten so the next command asks to sign in.
pub fn finish(result: Result<i32, MoodtaskError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if e.code == ErrorCode::SessionExpired {
                forget_session();
            }
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

/// Client carrying the stored token. Fails fast when there is none.
pub(crate) fn signed_in(config: &Config) -> Result<HttpApi, MoodtaskError> {
    let session = FileSession::open_default()?;
    let token = session.get().ok_or_else(MoodtaskError::not_signed_in)?;
    HttpApi::new(config, Some(token))
}

fn forget_session() {
    match FileSession::open_default() {
        Ok(session) => {
            if let Err(e) = session.clear() {
                warn!(error = %e, "could not clear rejected session");
            }
        }
        Err(e) => warn!(error = %e, "could not locate session"),
    }
}

/// Append to the mood journal. Failures are logged, never fatal.
pub(crate) fn journal(
    mood: Mood,
    confidence: f64,
    source: MoodSource,
    text: Option<&str>,
) -> Option<MoodLogEntry> {
    let result = connection::open_journal()
        .and_then(|conn| mood_log_repo::record(&conn, mood, confidence, source, text));
    match result {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!(error = %e, "failed to journal mood");
            None
        }
    }
}

pub(crate) fn parse_mood(s: &str) -> Result<Mood, MoodtaskError> {
    Mood::from_str(s).ok_or_else(|| {
        MoodtaskError::validation(format!(
            "Unknown mood '{s}'. Expected one of: Happy, Tired, Stressed, Focused, Energetic"
        ))
    })
}
