use crate::models::{Priority, Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Due,
    Priority,
    Importance,
    Title,
}

impl SortKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "due" | "due_date" => Some(Self::Due),
            "priority" => Some(Self::Priority),
            "importance" => Some(Self::Importance),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
}

impl ListFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        match self.search.as_deref() {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                task.title.to_lowercase().contains(&q)
                    || task.description.to_lowercase().contains(&q)
            }
            _ => true,
        }
    }

    /// Filtered, then stable-sorted when a key is set; otherwise input order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        let mut out: Vec<Task> = tasks.iter().filter(|t| self.matches(t)).cloned().collect();
        match self.sort {
            Some(SortKey::Due) => out.sort_by_key(|t| t.due_date),
            Some(SortKey::Priority) => out.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
            Some(SortKey::Importance) => out.sort_by(|a, b| b.importance.cmp(&a.importance)),
            Some(SortKey::Title) => out.sort_by(|a, b| a.title.cmp(&b.title)),
            None => {}
        }
        out
    }
}
