use crate::models::{Mood, MoodAnalysis};

/// Ordered rule table. The first mood with a matching keyword wins, so the
/// row order is the tie-break when text matches several moods.
pub const MOOD_KEYWORDS: [(Mood, &[&str]); 5] = [
    (
        Mood::Happy,
        &[
            "happy", "great", "awesome", "excited", "good", "wonderful", "fantastic", "cheerful",
            "joyful",
        ],
    ),
    (
        Mood::Tired,
        &[
            "tired", "exhausted", "sleepy", "drained", "weary", "fatigue", "worn out", "beat",
        ],
    ),
    (
        Mood::Stressed,
        &[
            "stressed", "overwhelmed", "anxious", "pressure", "worried", "tense", "frantic",
            "panic",
        ],
    ),
    (
        Mood::Focused,
        &[
            "focused", "concentrated", "determined", "productive", "clear", "sharp", "alert",
        ],
    ),
    (
        Mood::Energetic,
        &[
            "energetic", "motivated", "pumped", "active", "dynamic", "vigorous", "enthusiastic",
        ],
    ),
];

pub const DEFAULT_MOOD: Mood = Mood::Focused;

/// Keyword classification. Substring containment, case-insensitive.
pub fn classify(text: &str) -> Mood {
    first_match(&text.to_lowercase())
        .map(|(mood, _)| mood)
        .unwrap_or(DEFAULT_MOOD)
}

/// Offline stand-in for the remote analyzer: same mood as `classify`, with a
/// keyword-density confidence and a canned explanation.
pub fn analyze_offline(text: &str) -> MoodAnalysis {
    let lower = text.to_lowercase();
    let (mood, hits) = first_match(&lower).unwrap_or((DEFAULT_MOOD, 1));
    let words = text.split_whitespace().count().max(1);
    let confidence = (hits as f64 / words as f64).clamp(0.1, 1.0);
    MoodAnalysis {
        mood,
        confidence,
        explanation: explanation(mood).to_string(),
    }
}

pub fn explanation(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "I detected positive and upbeat language in your message.",
        Mood::Tired => "Your message suggests you're feeling fatigued or low on energy.",
        Mood::Stressed => "I sense tension and pressure in your words.",
        Mood::Focused => "Your message indicates a clear and determined mindset.",
        Mood::Energetic => "I can feel high energy and motivation in your message.",
    }
}

fn first_match(lower: &str) -> Option<(Mood, usize)> {
    MOOD_KEYWORDS.iter().find_map(|(mood, keywords)| {
        let hits = keywords.iter().filter(|k| lower.contains(*k)).count();
        (hits > 0).then_some((*mood, hits))
    })
}
