//! SQLite schema for the document store
//!
//! `Documents` holds the rows; `Documents_fts` is an external-content FTS5
//! index over both columns, kept in sync by triggers.

use rusqlite::{Connection, Result};

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_info (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- Documents table (names are unique)
        CREATE TABLE IF NOT EXISTS Documents (
            DocumentName TEXT PRIMARY KEY NOT NULL,
            Content TEXT NOT NULL
        );

        -- Full-text index over name and content
        CREATE VIRTUAL TABLE IF NOT EXISTS Documents_fts USING fts5(
            DocumentName,
            Content,
            content='Documents',
            content_rowid='rowid'
        );

        -- Triggers to keep FTS in sync with the Documents table
        CREATE TRIGGER IF NOT EXISTS documents_ai AFTER INSERT ON Documents BEGIN
            INSERT INTO Documents_fts(rowid, DocumentName, Content)
            VALUES (NEW.rowid, NEW.DocumentName, NEW.Content);
        END;

        CREATE TRIGGER IF NOT EXISTS documents_ad AFTER DELETE ON Documents BEGIN
            INSERT INTO Documents_fts(Documents_fts, rowid, DocumentName, Content)
            VALUES ('delete', OLD.rowid, OLD.DocumentName, OLD.Content);
        END;

        CREATE TRIGGER IF NOT EXISTS documents_au AFTER UPDATE ON Documents BEGIN
            INSERT INTO Documents_fts(Documents_fts, rowid, DocumentName, Content)
            VALUES ('delete', OLD.rowid, OLD.DocumentName, OLD.Content);
            INSERT INTO Documents_fts(rowid, DocumentName, Content)
            VALUES (NEW.rowid, NEW.DocumentName, NEW.Content);
        END;
        "#,
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<Option<i32>> {
    let mut stmt = conn.prepare("SELECT value FROM schema_info WHERE key = 'version'")?;
    let result: Result<String> = stmt.query_row([], |row| row.get(0));

    match result {
        Ok(version_str) => Ok(version_str.parse().ok()),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Check if schema needs initialization or migration
pub fn needs_init(conn: &Connection) -> bool {
    let table_exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_info'")
        .and_then(|mut stmt| stmt.exists([]))
        .unwrap_or(false);

    if !table_exists {
        return true;
    }

    match get_schema_version(conn) {
        Ok(Some(v)) => v < SCHEMA_VERSION,
        _ => true,
    }
}
