//! Patient database operations.

use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Condition, Patient};

const COLUMNS: &str = "id, name, age, condition, assigned_clinician_id";

pub(super) fn insert(conn: &Connection, patient: &Patient, ignore_existing: bool) -> DbResult<()> {
    let verb = if ignore_existing { "INSERT OR IGNORE" } else { "INSERT" };
    conn.execute(
        &format!("{} INTO patients ({}) VALUES (?1, ?2, ?3, ?4, ?5)", verb, COLUMNS),
        params![
            patient.id,
            patient.name,
            patient.age,
            patient.condition.as_str(),
            patient.assigned_clinician_id,
        ],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    name: String,
    age: u32,
    condition: String,
    assigned_clinician_id: String,
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let condition = Condition::parse(&row.condition)
            .ok_or_else(|| DbError::Constraint(format!("Unknown condition: {}", row.condition)))?;

        Ok(Patient {
            id: row.id,
            name: row.name,
            age: row.age,
            condition,
            assigned_clinician_id: row.assigned_clinician_id,
        })
    }
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        condition: row.get(3)?,
        assigned_clinician_id: row.get(4)?,
    })
}

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        insert(&self.conn, patient, false)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?", COLUMNS),
                [id],
                map_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List a clinician's patients in roster order.
    pub fn list_patients_for_clinician(&self, clinician_id: &str) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM patients WHERE assigned_clinician_id = ? ORDER BY rowid",
            COLUMNS
        ))?;

        let rows = stmt.query_map([clinician_id], map_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }
}
