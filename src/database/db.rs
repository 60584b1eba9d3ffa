//! Database operations for the vocabulary trainer
//!
//! All persisted state lives in one SQLite key-value table. Each value is a full JSON
//! document written in one statement, so a value is always either the old or the new blob.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, params};
use std::path::Path;

/// Opens (or creates) the database file and makes sure the tables exist
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    Ok(conn)
}

/// Same schema as `init_database`, kept in memory
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads the value stored under `key`, `None` if it was never written
pub fn read_value(key: &str, conn: &Connection) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM app_state WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

/// Overwrites the value stored under `key` and stamps it with the current time
pub fn write_value(key: &str, value: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO app_state (key, value, updated_at) VALUES (?1, ?2, ?3)",
        params![key, value, Utc::now().timestamp()],
    )?;
    Ok(())
}

/// Removes every stored value
pub fn clear_all(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM app_state", ())?;
    Ok(())
}

/// When `key` was last written
pub fn updated_at(key: &str, conn: &Connection) -> Result<Option<DateTime<Utc>>> {
    let timestamp: Option<i64> = conn
        .query_row(
            "SELECT updated_at FROM app_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(timestamp.and_then(|secs| DateTime::from_timestamp(secs, 0)))
}
