use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Mood, Task};

/// How the sorted and fixed partitions are put back together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reassembly {
    /// Concatenate, then stable-sort everything by ascending id. Matches the
    /// server-compatible behavior; array order no longer reflects the mood.
    #[default]
    ById,
    /// Concatenate only: mood-sorted tasks first, fixed tasks after.
    MoodFirst,
}

impl Reassembly {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ById => "by_id",
            Self::MoodFirst => "mood_first",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "by_id" => Some(Self::ById),
            "mood_first" => Some(Self::MoodFirst),
            _ => None,
        }
    }
}

/// Eligible for mood-based sorting. Completed tasks are always fixed.
pub fn is_reorganizable(task: &Task) -> bool {
    task.reorganizable && !task.is_completed()
}

pub fn reorganize(tasks: &[Task], mood: Mood) -> Vec<Task> {
    reorganize_with(tasks, mood, Reassembly::ById)
}

/// Returns a new ordering of `tasks`; the input is left untouched.
pub fn reorganize_with(tasks: &[Task], mood: Mood, reassembly: Reassembly) -> Vec<Task> {
    let (mut movable, fixed): (Vec<Task>, Vec<Task>) =
        tasks.iter().cloned().partition(is_reorganizable);

    // slice::sort_by is stable; ties keep input order.
    movable.sort_by(|a, b| compare(mood, a, b));

    let mut out = movable;
    out.extend(fixed);
    if reassembly == Reassembly::ById {
        out.sort_by_key(|t| t.id);
    }
    out
}

fn compare(mood: Mood, a: &Task, b: &Task) -> Ordering {
    match mood {
        Mood::Tired => a.priority.rank().cmp(&b.priority.rank()),
        Mood::Energetic => b.priority.rank().cmp(&a.priority.rank()),
        Mood::Focused => b.importance.cmp(&a.importance),
        Mood::Stressed => a.due_date.cmp(&b.due_date),
        Mood::Happy => happy_score(b).cmp(&happy_score(a)),
    }
}

fn happy_score(task: &Task) -> i32 {
    task.importance + task.priority.rank()
}
