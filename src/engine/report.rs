use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Priority, Task, TaskStatus};

#[derive(Debug, Default, Clone, Serialize)]
pub struct CategoryStats {
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct TaskReport {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub percentage: f64,
    pub overdue: usize,
    pub due_this_week: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub reorganizable: usize,
    pub strict: usize,
    pub categories: BTreeMap<String, CategoryStats>,
}

/// Summary counts over a snapshot, relative to `now`.
pub fn build(tasks: &[Task], now: DateTime<Utc>) -> TaskReport {
    let week_end = now + Duration::days(7);
    let mut r = TaskReport {
        total: tasks.len(),
        ..Default::default()
    };

    for t in tasks {
        match t.status {
            TaskStatus::Todo => r.todo += 1,
            TaskStatus::InProgress => r.in_progress += 1,
            TaskStatus::Completed => r.completed += 1,
        }
        match t.priority {
            Priority::High => r.high += 1,
            Priority::Medium => r.medium += 1,
            Priority::Low => r.low += 1,
        }
        if !t.is_completed() {
            if t.due_date < now {
                r.overdue += 1;
            } else if t.due_date < week_end {
                r.due_this_week += 1;
            }
        }
        if t.reorganizable {
            r.reorganizable += 1;
        }
        if t.strict {
            r.strict += 1;
        }
        let cat = r.categories.entry(t.category.clone()).or_default();
        cat.total += 1;
        if t.is_completed() {
            cat.completed += 1;
        }
    }

    r.percentage = if r.total > 0 {
        (r.completed as f64 / r.total as f64) * 100.0
    } else {
        0.0
    };
    r
}
