use rusqlite::Connection;

use crate::error::MoodtaskError;

pub fn run_migrations(conn: &Connection) -> Result<(), MoodtaskError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS mood_logs (
            id TEXT PRIMARY KEY,
            mood TEXT NOT NULL
                CHECK (mood IN ('Happy', 'Tired', 'Stressed', 'Focused', 'Energetic')),
            confidence REAL NOT NULL DEFAULT 0,
            source TEXT NOT NULL
                CHECK (source IN ('remote', 'keywords', 'manual')),
            text_input TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_mood_logs_created ON mood_logs(created_at);
        ",
    )?;
    Ok(())
}
