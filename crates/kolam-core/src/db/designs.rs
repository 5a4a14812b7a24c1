//! Kolam design operations.

use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{DesignPrinciples, KolamDesign};

pub(super) fn insert(
    conn: &Connection,
    design: &KolamDesign,
    ignore_existing: bool,
) -> DbResult<()> {
    let verb = if ignore_existing { "INSERT OR IGNORE" } else { "INSERT" };
    let principles_json = serde_json::to_string(&design.principles)?;
    conn.execute(
        &format!(
            "{} INTO kolam_designs (id, svg_path, preview_url, principles) VALUES (?1, ?2, ?3, ?4)",
            verb
        ),
        params![design.id, design.svg_path, design.preview_url, principles_json],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct DesignRow {
    id: String,
    svg_path: String,
    preview_url: Option<String>,
    principles: String,
}

impl TryFrom<DesignRow> for KolamDesign {
    type Error = DbError;

    fn try_from(row: DesignRow) -> Result<Self, Self::Error> {
        let principles: DesignPrinciples = serde_json::from_str(&row.principles)?;
        Ok(KolamDesign {
            id: row.id,
            svg_path: row.svg_path,
            preview_url: row.preview_url,
            principles,
        })
    }
}

impl Database {
    /// Insert a new design.
    pub fn insert_design(&self, design: &KolamDesign) -> DbResult<()> {
        insert(&self.conn, design, false)
    }

    /// Get a design by ID.
    pub fn get_design(&self, id: &str) -> DbResult<Option<KolamDesign>> {
        self.conn
            .query_row(
                "SELECT id, svg_path, preview_url, principles FROM kolam_designs WHERE id = ?",
                [id],
                |row| {
                    Ok(DesignRow {
                        id: row.get(0)?,
                        svg_path: row.get(1)?,
                        preview_url: row.get(2)?,
                        principles: row.get(3)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }
}
