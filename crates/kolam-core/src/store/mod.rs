//! Storage seam for the mock service.
//!
//! Callers reach records only through [`Repository`] and [`NoteStore`], so
//! the seeded in-memory store and the SQLite database are interchangeable.

mod memory;
mod seed;

pub use memory::*;
pub use seed::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Clinician, KolamDesign, Patient, Task};

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),

    #[error("Duplicate record: {0}")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Record access needed by the service facade.
///
/// Lookups return `None` or an empty `Vec` when nothing matches; errors are
/// reserved for backend failures.
pub trait Repository {
    fn clinician(&self, id: &str) -> StoreResult<Option<Clinician>>;

    fn clinician_by_email(&self, email: &str) -> StoreResult<Option<Clinician>>;

    fn patient(&self, id: &str) -> StoreResult<Option<Patient>>;

    /// Patients assigned to a clinician, in roster order.
    fn patients_for_clinician(&self, clinician_id: &str) -> StoreResult<Vec<Patient>>;

    fn task(&self, id: &str) -> StoreResult<Option<Task>>;

    /// Tasks scheduled for a patient on one day.
    fn tasks_for_patient_on(&self, patient_id: &str, date: NaiveDate) -> StoreResult<Vec<Task>>;

    fn design(&self, id: &str) -> StoreResult<Option<KolamDesign>>;

    fn insert_design(&mut self, design: &KolamDesign) -> StoreResult<()>;

    fn insert_task(&mut self, task: &Task) -> StoreResult<()>;

    /// Insert a generated batch. Either every record is stored or none is.
    fn insert_schedule(&mut self, designs: &[KolamDesign], tasks: &[Task]) -> StoreResult<()>;

    /// Overwrite a task's status and result. Returns false if the ID is unknown.
    fn update_task(&mut self, task: &Task) -> StoreResult<bool>;
}

/// Free-text clinician notes, one entry per patient.
pub trait NoteStore {
    fn load_note(&self, patient_id: &str) -> StoreResult<Option<String>>;

    fn save_note(&mut self, patient_id: &str, text: &str) -> StoreResult<()>;
}

/// Storage key for a patient's notes.
pub fn note_key(patient_id: &str) -> String {
    format!("patient_notes_{}", patient_id)
}
