use tracing::{debug, warn};

use crate::api::TaskStore;
use crate::cli::commands::ArrangeOpts;
use crate::cli::mood::detect_and_journal;
use crate::cli::{finish, parse_mood, signed_in, EXIT_DEGRADED};
use crate::config::Config;
use crate::db::{connection, mood_log_repo};
use crate::engine::{snapshot, Reassembly};
use crate::error::MoodtaskError;
use crate::models::Mood;
use crate::output;
use crate::workflow::{self, Arrangement, Detection};

pub fn run_reorganize(mood: Option<String>, opts: &ArrangeOpts, json_output: bool) -> i32 {
    let result = (|| -> Result<i32, MoodtaskError> {
        let config = Config::load()?;
        let mood = match mood {
            Some(m) => parse_mood(&m)?,
            None => remembered_mood(&config),
        };
        let arrangement = arrange(&config, mood, opts)?;
        emit(None, &arrangement, json_output);
        Ok(exit_code(arrangement.is_fallback()))
    })();
    finish(result, json_output)
}

pub fn run_checkin(text: &[String], opts: &ArrangeOpts, json_output: bool) -> i32 {
    let result = (|| -> Result<i32, MoodtaskError> {
        let config = Config::load()?;
        let detection = detect_and_journal(&config, &text.join(" "), opts.offline)?;
        let arrangement = arrange(&config, detection.analysis.mood, opts)?;
        emit(Some(&detection), &arrangement, json_output);
        Ok(exit_code(detection.is_fallback() || arrangement.is_fallback()))
    })();
    finish(result, json_output)
}

fn arrange(config: &Config, mood: Mood, opts: &ArrangeOpts) -> Result<Arrangement, MoodtaskError> {
    let reassembly = if opts.mood_first {
        Reassembly::MoodFirst
    } else {
        config.reassembly
    };
    let snapshot = opts.input.as_deref().map(snapshot::load).transpose()?;
    let api = if opts.offline {
        None
    } else {
        Some(signed_in(config)?)
    };
    debug!(
        mood = mood.as_str(),
        reassembly = reassembly.as_str(),
        offline = opts.offline,
        "arranging tasks"
    );
    workflow::apply_mood(api.as_ref().map(|a| a as &dyn TaskStore), snapshot, mood, reassembly)
}

/// Latest journaled mood, else the configured default.
fn remembered_mood(config: &Config) -> Mood {
    let latest = connection::open_journal().and_then(|conn| mood_log_repo::latest(&conn));
    match latest {
        Ok(Some(entry)) => entry.mood,
        Ok(None) => config.default_mood,
        Err(e) => {
            warn!(error = %e, "could not read mood journal; using default mood");
            config.default_mood
        }
    }
}

fn emit(detection: Option<&Detection>, arrangement: &Arrangement, json_output: bool) {
    let fallback = detection.is_some_and(Detection::is_fallback) || arrangement.is_fallback();
    if json_output {
        let mut data = output::json::arrangement_json(arrangement);
        if let Some(d) = detection {
            data["detection"] = output::json::detection_json(d);
        }
        output::json::print(&output::json::success_with_fallback(data, fallback));
    } else {
        if let Some(d) = detection {
            output::text::print_detection(d);
            println!();
        }
        output::text::print_arrangement(arrangement);
    }
}

fn exit_code(degraded: bool) -> i32 {
    if degraded {
        EXIT_DEGRADED
    } else {
        0
    }
}
