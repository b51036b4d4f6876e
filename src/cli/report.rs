use std::path::Path;

use chrono::Utc;

use crate::cli::finish;
use crate::cli::task::load_tasks;
use crate::engine::report;
use crate::output;

pub fn run(input: Option<&Path>, json_output: bool) -> i32 {
    let result = load_tasks(input).map(|tasks| {
        let summary = report::build(&tasks, Utc::now());
        if json_output {
            output::json::print(&output::json::success(output::json::report_json(&summary)));
        } else {
            output::text::print_report(&summary);
        }
        0
    });
    finish(result, json_output)
}
