//! Key/value storage for clinician notes.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};

impl Database {
    /// Read a stored value.
    pub fn get_value(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM notes WHERE key = ?", [key], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Insert or replace a stored value.
    pub fn set_value(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO notes (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}
