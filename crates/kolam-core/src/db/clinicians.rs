//! Clinician roster operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::Clinician;

const COLUMNS: &str = "id, name, email, specialty, avatar_url";

pub(super) fn insert(
    conn: &Connection,
    clinician: &Clinician,
    ignore_existing: bool,
) -> DbResult<()> {
    let verb = if ignore_existing { "INSERT OR IGNORE" } else { "INSERT" };
    conn.execute(
        &format!("{} INTO clinicians ({}) VALUES (?1, ?2, ?3, ?4, ?5)", verb, COLUMNS),
        params![
            clinician.id,
            clinician.name,
            clinician.email,
            clinician.specialty,
            clinician.avatar_url,
        ],
    )?;
    Ok(())
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Clinician> {
    Ok(Clinician {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        specialty: row.get(3)?,
        avatar_url: row.get(4)?,
    })
}

impl Database {
    /// Insert a new clinician.
    pub fn insert_clinician(&self, clinician: &Clinician) -> DbResult<()> {
        insert(&self.conn, clinician, false)
    }

    /// Get a clinician by ID.
    pub fn get_clinician(&self, id: &str) -> DbResult<Option<Clinician>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM clinicians WHERE id = ?", COLUMNS),
                [id],
                from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a clinician by login email.
    pub fn get_clinician_by_email(&self, email: &str) -> DbResult<Option<Clinician>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM clinicians WHERE email = ?", COLUMNS),
                [email],
                from_row,
            )
            .optional()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let clinician =
            Clinician::new("C100", "Dr. Meera Raman", "dr_meera@rec.health", "Neurology");
        db.insert_clinician(&clinician).unwrap();

        assert_eq!(db.get_clinician("C100").unwrap(), Some(clinician.clone()));
        assert_eq!(
            db.get_clinician_by_email("dr_meera@rec.health").unwrap(),
            Some(clinician)
        );
        assert!(db.get_clinician("C404").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.insert_clinician(&Clinician::new("C1", "A", "same@rec.health", "Neurology"))
            .unwrap();
        let result =
            db.insert_clinician(&Clinician::new("C2", "B", "same@rec.health", "Neurology"));
        assert!(result.is_err());
    }
}
