//! Mood in, ordered tasks out. Remote collaborators are tried first; any
//! failure other than authentication degrades to the local classifier or
//! reorganizer instead of surfacing.

use serde::Serialize;
use tracing::{info, warn};

use crate::api::{MoodAnalyzer, TaskStore};
use crate::engine::{analyze_offline, reorganize_with, Reassembly};
use crate::error::MoodtaskError;
use crate::models::{Mood, MoodAnalysis, MoodSource, Task};

#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub analysis: MoodAnalysis,
    pub source: MoodSource,
    /// Set when the remote analyzer failed and keywords were used instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrangedBy {
    Server,
    Local,
}

#[derive(Debug, Clone, Serialize)]
pub struct Arrangement {
    pub mood: Mood,
    pub arranged_by: ArrangedBy,
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl Detection {
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

impl Arrangement {
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Remote analysis, or keyword classification when it is unavailable or fails.
/// Authentication errors are returned so the caller can abandon.
pub fn detect_mood(
    analyzer: Option<&dyn MoodAnalyzer>,
    text: &str,
) -> Result<Detection, MoodtaskError> {
    let fallback_reason = match analyzer {
        None => None,
        Some(analyzer) => match analyzer.analyze(text) {
            Ok(analysis) => {
                info!(mood = analysis.mood.as_str(), "remote mood analysis");
                return Ok(Detection {
                    analysis,
                    source: MoodSource::Remote,
                    fallback_reason: None,
                });
            }
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                warn!(error = %e, "mood analysis failed; using keyword classifier");
                Some(e.message)
            }
        },
    };
    Ok(Detection {
        analysis: analyze_offline(text),
        source: MoodSource::Keywords,
        fallback_reason,
    })
}

/// Server-side reorganize, falling back to the local reorganizer over
/// `snapshot` (or a fresh `list()` when no snapshot is given).
pub fn apply_mood(
    store: Option<&dyn TaskStore>,
    snapshot: Option<Vec<Task>>,
    mood: Mood,
    reassembly: Reassembly,
) -> Result<Arrangement, MoodtaskError> {
    let fallback_reason = match store {
        None => None,
        Some(store) => match store.reorganize(mood) {
            Ok(tasks) => {
                return Ok(Arrangement {
                    mood,
                    arranged_by: ArrangedBy::Server,
                    tasks,
                    fallback_reason: None,
                })
            }
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                warn!(error = %e, mood = mood.as_str(), "remote reorganize failed; reorganizing locally");
                Some(e.message)
            }
        },
    };

    let current = match (snapshot, store) {
        (Some(tasks), _) => tasks,
        (None, Some(store)) => match store.list() {
            Ok(tasks) => tasks,
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                warn!(error = %e, "could not load tasks for local reorganize");
                Vec::new()
            }
        },
        (None, None) => Vec::new(),
    };

    Ok(Arrangement {
        mood,
        arranged_by: ArrangedBy::Local,
        tasks: reorganize_with(&current, mood, reassembly),
        fallback_reason,
    })
}
