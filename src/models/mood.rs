use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Tired,
    Stressed,
    Focused,
    Energetic,
}

impl Mood {
    /// Declaration order. The keyword classifier's tie-break follows it.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Tired,
        Mood::Stressed,
        Mood::Focused,
        Mood::Energetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Tired => "Tired",
            Self::Stressed => "Stressed",
            Self::Focused => "Focused",
            Self::Energetic => "Energetic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Where a mood came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodSource {
    Remote,
    Keywords,
    Manual,
}

impl MoodSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Keywords => "keywords",
            Self::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "remote" => Some(Self::Remote),
            "keywords" => Some(Self::Keywords),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// Response body of the mood analysis collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub mood: Mood,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodLogEntry {
    pub id: String,
    pub mood: Mood,
    pub confidence: f64,
    pub source: MoodSource,
    pub text_input: Option<String>,
    pub created_at: String,
}
