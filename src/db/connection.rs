use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::config;
use crate::error::MoodtaskError;

use super::migrations;

/// Path of the local mood journal.
pub fn journal_path() -> Result<PathBuf, MoodtaskError> {
    Ok(config::home_dir()?.join("journal.db"))
}

/// Open the journal, creating it and running migrations on first use.
pub fn open_journal() -> Result<Connection, MoodtaskError> {
    config::ensure_home_dir()?;
    open_at(&journal_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection, MoodtaskError> {
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, MoodtaskError> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), MoodtaskError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
