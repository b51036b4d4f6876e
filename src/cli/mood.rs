use serde_json::json;

use crate::api::MoodAnalyzer;
use crate::cli::commands::MoodCommands;
use crate::cli::{finish, journal, parse_mood, signed_in, EXIT_DEGRADED};
use crate::config::Config;
use crate::db::{connection, mood_log_repo};
use crate::engine::classifier;
use crate::error::MoodtaskError;
use crate::models::MoodSource;
use crate::output;
use crate::workflow::{self, Detection};

pub fn run(cmd: MoodCommands, json_output: bool) -> i32 {
    let result = match cmd {
        MoodCommands::Detect { text, offline } => run_detect(&text.join(" "), offline, json_output),
        MoodCommands::Set { mood } => run_set(&mood, json_output),
        MoodCommands::Current => run_current(json_output),
    };
    finish(result, json_output)
}

pub fn run_classify(text: &[String], json_output: bool) -> i32 {
    let text = text.join(" ");
    let analysis = classifier::analyze_offline(&text);
    if json_output {
        output::json::print(&output::json::success(json!({
            "mood": analysis.mood.as_str(),
            "confidence": (analysis.confidence * 100.0).round() / 100.0,
            "explanation": analysis.explanation
        })));
    } else {
        println!("{}", analysis.mood.as_str());
    }
    0
}

/// Shared by `mood detect` and `checkin`: analyze, then journal.
pub(crate) fn detect_and_journal(
    config: &Config,
    text: &str,
    offline: bool,
) -> Result<Detection, MoodtaskError> {
    let api = if offline { None } else { Some(signed_in(config)?) };
    let detection = workflow::detect_mood(api.as_ref().map(|a| a as &dyn MoodAnalyzer), text)?;
    journal(
        detection.analysis.mood,
        detection.analysis.confidence,
        detection.source,
        Some(text),
    );
    Ok(detection)
}

fn run_detect(text: &str, offline: bool, json_output: bool) -> Result<i32, MoodtaskError> {
    let config = Config::load()?;
    let detection = detect_and_journal(&config, text, offline)?;

    if json_output {
        output::json::print(&output::json::success_with_fallback(
            output::json::detection_json(&detection),
            detection.is_fallback(),
        ));
    } else {
        output::text::print_detection(&detection);
    }
    Ok(if detection.is_fallback() { EXIT_DEGRADED } else { 0 })
}

fn run_set(mood: &str, json_output: bool) -> Result<i32, MoodtaskError> {
    let mood = parse_mood(mood)?;
    let entry = journal(mood, 1.0, MoodSource::Manual, None);
    if json_output {
        output::json::print(&output::json::success(json!({
            "mood": mood.as_str(),
            "journaled": entry.is_some()
        })));
    } else {
        println!("Mood set to {}", mood.as_str());
    }
    Ok(0)
}

fn run_current(json_output: bool) -> Result<i32, MoodtaskError> {
    let config = Config::load()?;
    let conn = connection::open_journal()?;
    let latest = mood_log_repo::latest(&conn)?;
    let (mood, source) = match latest {
        Some(ref e) => (e.mood, e.source.as_str()),
        None => (config.default_mood, "default"),
    };

    if json_output {
        output::json::print(&output::json::success(json!({
            "mood": mood.as_str(),
            "source": source,
            "since": latest.as_ref().map(|e| e.created_at.as_str())
        })));
    } else {
        match latest {
            Some(ref e) => println!("{} (since {}, via {source})", mood.as_str(), e.created_at),
            None => println!("{} (default)", mood.as_str()),
        }
    }
    Ok(0)
}
