use serde_json::{json, Value};

use crate::engine::report::TaskReport;
use crate::error::MoodtaskError;
use crate::models::{MoodLogEntry, Task, UserProfile};
use crate::workflow::{Arrangement, Detection};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

/// Success envelope that also says whether a local fallback was used.
pub fn success_with_fallback(data: Value, fallback: bool) -> Value {
    json!({
        "success": true,
        "fallback": fallback,
        "data": data
    })
}

pub fn error(err: &MoodtaskError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn print(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: could not render JSON: {e}"),
    }
}

pub fn task_detail(t: &Task) -> Value {
    serde_json::to_value(t).unwrap_or(Value::Null)
}

pub fn tasks_json(tasks: &[Task]) -> Value {
    Value::Array(tasks.iter().map(task_detail).collect())
}

pub fn detection_json(d: &Detection) -> Value {
    let mut v = json!({
        "mood": d.analysis.mood.as_str(),
        "confidence": (d.analysis.confidence * 100.0).round() / 100.0,
        "explanation": d.analysis.explanation,
        "source": d.source.as_str()
    });
    if let Some(ref reason) = d.fallback_reason {
        v["fallback_reason"] = json!(reason);
    }
    v
}

pub fn arrangement_json(a: &Arrangement) -> Value {
    let mut v = json!({
        "mood": a.mood.as_str(),
        "arranged_by": a.arranged_by,
        "tasks": tasks_json(&a.tasks)
    });
    if let Some(ref reason) = a.fallback_reason {
        v["fallback_reason"] = json!(reason);
    }
    v
}

pub fn mood_log_json(e: &MoodLogEntry) -> Value {
    json!({
        "id": e.id,
        "mood": e.mood.as_str(),
        "confidence": e.confidence,
        "source": e.source.as_str(),
        "text": e.text_input,
        "created_at": e.created_at
    })
}

pub fn report_json(r: &TaskReport) -> Value {
    let mut v = serde_json::to_value(r).unwrap_or_else(|_| json!({}));
    v["percentage"] = json!((r.percentage * 10.0).round() / 10.0);
    v
}

pub fn profile_json(p: &UserProfile) -> Value {
    serde_json::to_value(p).unwrap_or_else(|_| json!({}))
}
