use crate::models::Clipping;
use rusqlite::{params, Connection};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        DbError::QueryFailed(e.to_string())
    }
}

pub fn init_db(path: &Path) -> Result<Connection, DbError> {
    let conn = Connection::open(path)
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS clippings (
            id INTEGER PRIMARY KEY,
            title_author TEXT,
            page INTEGER,
            start_location INTEGER,
            end_location INTEGER,
            date TEXT,
            text TEXT,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        );
        -- NULLs never collide in a plain UNIQUE constraint
        CREATE UNIQUE INDEX IF NOT EXISTS clippings_identity ON clippings (
            IFNULL(title_author, ''),
            IFNULL(page, -1),
            IFNULL(start_location, -1),
            IFNULL(end_location, -1),
            IFNULL(text, '')
        );",
    )?;

    Ok(conn)
}

pub fn insert_clipping(conn: &Connection, clipping: &Clipping) -> Result<bool, DbError> {
    let rows = conn.execute(
        "INSERT OR IGNORE INTO clippings
         (title_author, page, start_location, end_location, date, text)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            clipping.title_author,
            clipping.page,
            clipping.start_location,
            clipping.end_location,
            clipping.date,
            clipping.text,
        ],
    )?;

    Ok(rows > 0)
}
