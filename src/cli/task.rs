use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::api::TaskStore;
use crate::cli::commands::TaskCommands;
use crate::cli::{finish, signed_in};
use crate::config::Config;
use crate::engine::listing::{ListFilter, SortKey};
use crate::engine::snapshot;
use crate::error::MoodtaskError;
use crate::models::{NewTask, Priority, Task, TaskPatch, TaskStatus};
use crate::output;

pub fn run(cmd: TaskCommands, json_output: bool) -> i32 {
    let result = match cmd {
        TaskCommands::List {
            status,
            priority,
            search,
            sort,
            input,
        } => build_filter(status.as_deref(), priority.as_deref(), search, sort.as_deref())
            .and_then(|filter| run_list(&filter, input.as_deref(), json_output)),
        TaskCommands::Show { id } => run_show(id, json_output),
        TaskCommands::Add {
            title,
            category,
            due,
            description,
            priority,
            status,
            importance,
            progress,
            fixed,
            strict,
            notes,
        } => (|| -> Result<i32, MoodtaskError> {
            let task = NewTask {
                title,
                description,
                category,
                priority: parse_priority(&priority)?,
                status: parse_status(&status)?,
                due_date: parse_due(&due)?,
                importance,
                progress,
                reorganizable: !fixed,
                strict,
                notes,
            };
            run_add(&task, json_output)
        })(),
        TaskCommands::Update {
            id,
            title,
            description,
            category,
            priority,
            status,
            due,
            importance,
            progress,
            reorganizable,
            strict,
            notes,
        } => (|| -> Result<i32, MoodtaskError> {
            let patch = TaskPatch {
                title,
                description,
                category,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                due_date: due.as_deref().map(parse_due).transpose()?,
                importance,
                progress,
                reorganizable,
                strict,
                notes,
            };
            run_update(id, &patch, json_output)
        })(),
        TaskCommands::Delete { id } => run_delete(id, json_output),
    };
    finish(result, json_output)
}

/// Tasks from a snapshot file when given, otherwise from the server.
pub(crate) fn load_tasks(input: Option<&Path>) -> Result<Vec<Task>, MoodtaskError> {
    match input {
        Some(path) => snapshot::load(path),
        None => {
            let config = Config::load()?;
            signed_in(&config)?.list()
        }
    }
}

fn build_filter(
    status: Option<&str>,
    priority: Option<&str>,
    search: Option<String>,
    sort: Option<&str>,
) -> Result<ListFilter, MoodtaskError> {
    Ok(ListFilter {
        status: status.map(parse_status).transpose()?,
        priority: priority.map(parse_priority).transpose()?,
        search,
        sort: sort
            .map(|s| {
                SortKey::from_str(s).ok_or_else(|| {
                    MoodtaskError::validation(format!(
                        "Unknown sort key '{s}'. Expected due, priority, importance or title"
                    ))
                })
            })
            .transpose()?,
    })
}

fn run_list(filter: &ListFilter, input: Option<&Path>, json_output: bool) -> Result<i32, MoodtaskError> {
    let all = load_tasks(input)?;
    let tasks = filter.apply(&all);

    if json_output {
        output::json::print(&output::json::success(json!({
            "tasks": output::json::tasks_json(&tasks),
            "total": all.len(),
            "shown": tasks.len()
        })));
    } else {
        output::text::print_task_list(&tasks);
        if tasks.len() != all.len() {
            println!("({} of {} tasks shown)", tasks.len(), all.len());
        }
    }
    Ok(0)
}

fn run_show(id: i64, json_output: bool) -> Result<i32, MoodtaskError> {
    let config = Config::load()?;
    let task = signed_in(&config)?.get(id)?;
    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_detail(&task)
        })));
    } else {
        output::text::print_task(&task);
    }
    Ok(0)
}

fn run_add(task: &NewTask, json_output: bool) -> Result<i32, MoodtaskError> {
    task.validate()?;
    let config = Config::load()?;
    let created = signed_in(&config)?.create(task)?;
    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_detail(&created)
        })));
    } else {
        println!("Added task: {} ({})", created.title, created.id);
    }
    Ok(0)
}

fn run_update(id: i64, patch: &TaskPatch, json_output: bool) -> Result<i32, MoodtaskError> {
    patch.validate()?;
    let config = Config::load()?;
    let updated = signed_in(&config)?.update(id, patch)?;
    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_detail(&updated)
        })));
    } else {
        println!("Updated task: {} ({})", updated.title, updated.id);
    }
    Ok(0)
}

fn run_delete(id: i64, json_output: bool) -> Result<i32, MoodtaskError> {
    let config = Config::load()?;
    signed_in(&config)?.delete(id)?;
    if json_output {
        output::json::print(&output::json::success(json!({ "deleted": id })));
    } else {
        println!("Deleted task {id}");
    }
    Ok(0)
}

fn parse_priority(s: &str) -> Result<Priority, MoodtaskError> {
    Priority::from_str(s).ok_or_else(|| {
        MoodtaskError::validation(format!("Unknown priority '{s}'. Expected Low, Medium or High"))
    })
}

fn parse_status(s: &str) -> Result<TaskStatus, MoodtaskError> {
    TaskStatus::from_str(s).ok_or_else(|| {
        MoodtaskError::validation(format!(
            "Unknown status '{s}'. Expected Todo, in_progress or Completed"
        ))
    })
}

/// RFC 3339, or a bare date taken as midnight UTC.
fn parse_due(s: &str) -> Result<DateTime<Utc>, MoodtaskError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            MoodtaskError::validation(format!(
                "Invalid due date '{s}'. Use YYYY-MM-DD or RFC 3339"
            ))
        })
}
