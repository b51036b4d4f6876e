use crate::config::Config;
use crate::engine::report::TaskReport;
use crate::models::{MoodLogEntry, Task, UserProfile};
use crate::workflow::{ArrangedBy, Arrangement, Detection};

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    if !t.description.is_empty() {
        println!("  Description: {}", t.description);
    }
    println!("  Category: {}", t.category);
    println!("  Status: {}", t.status.as_str());
    println!("  Priority: {}", t.priority.as_str());
    println!("  Importance: {}/10", t.importance);
    println!("  Progress: {}%", t.progress);
    println!("  Due: {}", t.due_date.format("%Y-%m-%d %H:%M UTC"));
    println!(
        "  Flags: {}{}",
        if t.reorganizable { "reorganizable" } else { "fixed" },
        if t.strict { ", strict deadline" } else { "" }
    );
    if !t.notes.is_empty() {
        println!("  Notes: {}", t.notes);
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        println!(
            "  #{:<4} [{}] {} p={} i={} due {}{}",
            t.id,
            t.status.as_str(),
            t.title,
            t.priority.as_str(),
            t.importance,
            t.due_date.format("%Y-%m-%d"),
            if t.reorganizable { "" } else { " (fixed)" }
        );
    }
}

pub fn print_detection(d: &Detection) {
    println!(
        "Mood: {} ({:.0}% confidence, via {})",
        d.analysis.mood.as_str(),
        d.analysis.confidence * 100.0,
        d.source.as_str()
    );
    if !d.analysis.explanation.is_empty() {
        println!("  {}", d.analysis.explanation);
    }
    if let Some(ref reason) = d.fallback_reason {
        println!("  (mood service unavailable: {reason})");
    }
}

pub fn print_arrangement(a: &Arrangement) {
    let by = match a.arranged_by {
        ArrangedBy::Server => "server",
        ArrangedBy::Local => "locally",
    };
    println!("Tasks for a {} mood (arranged {by}):", a.mood.as_str().to_lowercase());
    if let Some(ref reason) = a.fallback_reason {
        println!("  (reorganize service unavailable: {reason})");
    }
    print_task_list(&a.tasks);
}

pub fn print_history(entries: &[MoodLogEntry]) {
    if entries.is_empty() {
        println!("No moods recorded yet.");
        return;
    }
    for e in entries {
        println!(
            "  {} {:<9} {:>4.0}% {}{}",
            e.created_at,
            e.mood.as_str(),
            e.confidence * 100.0,
            e.source.as_str(),
            e.text_input
                .as_deref()
                .map(|t| format!(" \"{t}\""))
                .unwrap_or_default()
        );
    }
}

pub fn print_report(r: &TaskReport) {
    println!("Progress: {:.1}% ({}/{})", r.percentage, r.completed, r.total);
    println!(
        "  todo={} in_progress={} completed={}",
        r.todo, r.in_progress, r.completed
    );
    println!("  overdue={} due_this_week={}", r.overdue, r.due_this_week);
    println!("  priority: high={} medium={} low={}", r.high, r.medium, r.low);
    println!("  reorganizable={} strict={}", r.reorganizable, r.strict);
    if !r.categories.is_empty() {
        println!("Categories:");
        for (name, c) in &r.categories {
            println!("  {name}: {}/{} completed", c.completed, c.total);
        }
    }
}

pub fn print_profile(p: &UserProfile) {
    let field = |label: &str, v: &Option<String>| {
        if let Some(v) = v {
            println!("  {label}: {v}");
        }
    };
    match p.id {
        Some(id) => println!("Profile ({id})"),
        None => println!("Profile"),
    }
    field("Username", &p.username);
    field("Email", &p.email);
    field("Member since", &p.created_at);
    field("Last updated", &p.updated_at);
}

pub fn print_config(c: &Config) {
    println!("api_url = {}", c.api_url);
    println!("timeout_secs = {}", c.timeout_secs);
    println!("reassembly = {}", c.reassembly.as_str());
    println!("default_mood = {}", c.default_mood.as_str());
}
