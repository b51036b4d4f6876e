use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::Reassembly;
use crate::error::MoodtaskError;
use crate::models::Mood;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `$MOODTASK_HOME`, else `$HOME/.moodtask`.
pub fn home_dir() -> Result<PathBuf, MoodtaskError> {
    if let Some(dir) = env::var_os("MOODTASK_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var_os("HOME")
        .ok_or_else(|| MoodtaskError::config("Neither MOODTASK_HOME nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".moodtask"))
}

pub fn ensure_home_dir() -> Result<PathBuf, MoodtaskError> {
    let dir = home_dir()?;
    fs::create_dir_all(&dir)
        .map_err(|e| MoodtaskError::io(format!("create {}: {e}", dir.display())))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf, MoodtaskError> {
    Ok(home_dir()?.join("config.json"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub reassembly: Reassembly,
    pub default_mood: Mood,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            reassembly: Reassembly::ById,
            default_mood: Mood::Focused,
        }
    }
}

impl Config {
    /// File values, then environment overrides.
    pub fn load() -> Result<Self, MoodtaskError> {
        let mut config = Self::load_file()?;
        config.apply_env()?;
        Ok(config)
    }

    /// File values only. Used when the result is written back.
    pub fn load_file() -> Result<Self, MoodtaskError> {
        let path = config_path()?;
        let config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| MoodtaskError::io(format!("read {}: {e}", path.display())))?;
            serde_json::from_str(&raw).map_err(|e| {
                MoodtaskError::config(format!("Invalid config {}: {e}", path.display()))
            })?
        } else {
            Config::default()
        };
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, MoodtaskError> {
        let path = ensure_home_dir()?.join("config.json");
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .map_err(|e| MoodtaskError::io(format!("write {}: {e}", path.display())))?;
        Ok(path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Update one key by name, as used by `moodtask config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), MoodtaskError> {
        match key {
            "api_url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(MoodtaskError::validation(
                        "api_url must start with http:// or https://",
                    ));
                }
                self.api_url = value.trim_end_matches('/').to_string();
            }
            "timeout_secs" => {
                self.timeout_secs = parse_timeout(value)?;
            }
            "reassembly" => {
                self.reassembly = Reassembly::from_str(value).ok_or_else(|| {
                    MoodtaskError::validation("reassembly must be `by_id` or `mood_first`")
                })?;
            }
            "default_mood" => {
                self.default_mood = Mood::from_str(value)
                    .ok_or_else(|| MoodtaskError::validation(format!("Unknown mood: {value}")))?;
            }
            _ => {
                return Err(MoodtaskError::validation(format!(
                    "Unknown config key '{key}'. Keys: api_url, timeout_secs, reassembly, default_mood"
                )))
            }
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<(), MoodtaskError> {
        if let Ok(url) = env::var("MOODTASK_API_URL") {
            if !url.is_empty() {
                self.api_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Ok(secs) = env::var("MOODTASK_TIMEOUT_SECS") {
            self.timeout_secs = parse_timeout(&secs)?;
        }
        Ok(())
    }
}

fn parse_timeout(value: &str) -> Result<u64, MoodtaskError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(MoodtaskError::validation(format!(
            "timeout_secs must be a positive integer (got '{value}')"
        ))),
    }
}
