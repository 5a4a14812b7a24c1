//! Vector-backed store used by the mock service.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::{note_key, NoteStore, Repository, SeedData, StoreError, StoreResult};
use crate::models::{Clinician, KolamDesign, Patient, Task};

/// In-memory records. State lives only as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    clinicians: Vec<Clinician>,
    patients: Vec<Patient>,
    designs: Vec<KolamDesign>,
    tasks: Vec<Task>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given records.
    pub fn seeded(seed: SeedData) -> Self {
        Self {
            clinicians: seed.clinicians,
            patients: seed.patients,
            designs: seed.designs,
            tasks: seed.tasks,
        }
    }

    /// Create a store holding the demo data set.
    pub fn demo(today: NaiveDate) -> Self {
        Self::seeded(SeedData::demo(today))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn designs(&self) -> &[KolamDesign] {
        &self.designs
    }
}

impl Repository for MemoryStore {
    fn clinician(&self, id: &str) -> StoreResult<Option<Clinician>> {
        Ok(self.clinicians.iter().find(|c| c.id == id).cloned())
    }

    fn clinician_by_email(&self, email: &str) -> StoreResult<Option<Clinician>> {
        Ok(self.clinicians.iter().find(|c| c.email == email).cloned())
    }

    fn patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        Ok(self.patients.iter().find(|p| p.id == id).cloned())
    }

    fn patients_for_clinician(&self, clinician_id: &str) -> StoreResult<Vec<Patient>> {
        Ok(self
            .patients
            .iter()
            .filter(|p| p.assigned_clinician_id == clinician_id)
            .cloned()
            .collect())
    }

    fn task(&self, id: &str) -> StoreResult<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.id == id).cloned())
    }

    fn tasks_for_patient_on(&self, patient_id: &str, date: NaiveDate) -> StoreResult<Vec<Task>> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.patient_id == patient_id && t.date == date)
            .cloned()
            .collect())
    }

    fn design(&self, id: &str) -> StoreResult<Option<KolamDesign>> {
        Ok(self.designs.iter().find(|d| d.id == id).cloned())
    }

    fn insert_design(&mut self, design: &KolamDesign) -> StoreResult<()> {
        if self.designs.iter().any(|d| d.id == design.id) {
            return Err(StoreError::Duplicate(design.id.clone()));
        }
        self.designs.push(design.clone());
        Ok(())
    }

    fn insert_task(&mut self, task: &Task) -> StoreResult<()> {
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Err(StoreError::Duplicate(task.id.clone()));
        }
        self.tasks.push(task.clone());
        Ok(())
    }

    fn insert_schedule(&mut self, designs: &[KolamDesign], tasks: &[Task]) -> StoreResult<()> {
        let mut design_ids: HashSet<&str> = self.designs.iter().map(|d| d.id.as_str()).collect();
        for design in designs {
            if !design_ids.insert(&design.id) {
                return Err(StoreError::Duplicate(design.id.clone()));
            }
        }
        let mut task_ids: HashSet<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
        for task in tasks {
            if !task_ids.insert(&task.id) {
                return Err(StoreError::Duplicate(task.id.clone()));
            }
        }

        self.designs.extend_from_slice(designs);
        self.tasks.extend_from_slice(tasks);
        Ok(())
    }

    fn update_task(&mut self, task: &Task) -> StoreResult<bool> {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => {
                existing.status = task.status;
                existing.result = task.result.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Notes kept in a map for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryNoteStore {
    entries: HashMap<String, String>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStore for MemoryNoteStore {
    fn load_note(&self, patient_id: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(&note_key(patient_id)).cloned())
    }

    fn save_note(&mut self, patient_id: &str, text: &str) -> StoreResult<()> {
        self.entries.insert(note_key(patient_id), text.to_string());
        Ok(())
    }
}
