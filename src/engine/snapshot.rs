use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::error::MoodtaskError;
use crate::models::Task;

/// Turn whatever the collaborator handed back into a task list. Absent
/// values, non-arrays and arrays that fail to decode all become empty.
pub fn normalize(value: Option<Value>) -> Vec<Task> {
    match value {
        Some(Value::Array(items)) => {
            match serde_json::from_value::<Vec<Task>>(Value::Array(items)) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!(error = %e, "discarding undecodable task snapshot");
                    Vec::new()
                }
            }
        }
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(kind = value_kind(&other), "task snapshot is not an array");
            Vec::new()
        }
    }
}

/// Read a snapshot from a file, or from stdin when `path` is `-`.
/// Unreadable input is an error; unparseable JSON normalizes to empty.
pub fn load(path: &Path) -> Result<Vec<Task>, MoodtaskError> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| MoodtaskError::io(format!("{}: {e}", path.display())))?
    };
    Ok(parse(&raw))
}

pub fn parse(raw: &str) -> Vec<Task> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(v) => normalize(Some(v)),
        Err(e) => {
            warn!(error = %e, "task snapshot is not valid JSON");
            Vec::new()
        }
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::engine::reorganizer::reorganize;
    use crate::models::Mood;

    fn one_task() -> Value {
        json!([{
            "id": 1, "title": "a", "category": "c", "priority": "Low",
            "status": "Todo", "dueDate": "2025-01-01T00:00:00Z",
            "importance": 3, "reorganizable": true
        }])
    }

    #[test]
    fn test_absent_and_non_array_become_empty() {
        assert!(normalize(None).is_empty());
        assert!(normalize(Some(Value::Null)).is_empty());
        assert!(normalize(Some(json!({"tasks": []}))).is_empty());
        assert!(normalize(Some(json!("oops"))).is_empty());
        for mood in Mood::ALL {
            assert!(reorganize(&normalize(None), mood).is_empty());
        }
    }

    #[test]
    fn test_array_decodes() {
        let tasks = normalize(Some(one_task()));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].progress, 0);
    }

    #[test]
    fn test_parse_raw() {
        assert!(parse("").is_empty());
        assert!(parse("not json").is_empty());
        assert_eq!(parse(&one_task().to_string()).len(), 1);
    }
}
