use rusqlite::{params, Connection};

use crate::error::MoodtaskError;
use crate::models::{Mood, MoodLogEntry, MoodSource};

pub fn record(
    conn: &Connection,
    mood: Mood,
    confidence: f64,
    source: MoodSource,
    text_input: Option<&str>,
) -> Result<MoodLogEntry, MoodtaskError> {
    let id = ulid::Ulid::new().to_string();
    conn.execute(
        "INSERT INTO mood_logs (id, mood, confidence, source, text_input) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, mood.as_str(), confidence, source.as_str(), text_input],
    )?;
    get_by_id(conn, &id)
}

pub fn get_by_id(conn: &Connection, id: &str) -> Result<MoodLogEntry, MoodtaskError> {
    conn.query_row(
        "SELECT id, mood, confidence, source, text_input, created_at FROM mood_logs WHERE id = ?1",
        params![id],
        row_to_entry,
    )
    .map_err(MoodtaskError::from)
}

/// Most recent first. Insertion order breaks timestamp ties.
pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<MoodLogEntry>, MoodtaskError> {
    let mut stmt = conn.prepare(
        "SELECT id, mood, confidence, source, text_input, created_at
         FROM mood_logs ORDER BY rowid DESC LIMIT ?1",
    )?;
    let entries = stmt
        .query_map(params![limit as i64], row_to_entry)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

pub fn latest(conn: &Connection) -> Result<Option<MoodLogEntry>, MoodtaskError> {
    Ok(recent(conn, 1)?.into_iter().next())
}

fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<MoodLogEntry> {
    Ok(MoodLogEntry {
        id: row.get(0)?,
        mood: Mood::from_str(&row.get::<_, String>(1)?).unwrap_or(Mood::Focused),
        confidence: row.get(2)?,
        source: MoodSource::from_str(&row.get::<_, String>(3)?).unwrap_or(MoodSource::Manual),
        text_input: row.get(4)?,
        created_at: row.get(5)?,
    })
}
