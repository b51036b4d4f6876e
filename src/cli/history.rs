use serde_json::json;

use crate::cli::finish;
use crate::db::{connection, mood_log_repo};
use crate::error::MoodtaskError;
use crate::output;

pub fn run(limit: usize, json_output: bool) -> i32 {
    let result = (|| -> Result<i32, MoodtaskError> {
        if limit == 0 {
            return Err(MoodtaskError::validation("--limit must be at least 1"));
        }
        let conn = connection::open_journal()?;
        let entries = mood_log_repo::recent(&conn, limit)?;
        if json_output {
            let items: Vec<_> = entries.iter().map(output::json::mood_log_json).collect();
            output::json::print(&output::json::success(json!({
                "entries": items,
                "count": entries.len()
            })));
        } else {
            output::text::print_history(&entries);
        }
        Ok(0)
    })();
    finish(result, json_output)
}
