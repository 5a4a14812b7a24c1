//! [`Repository`] and [`NoteStore`] over SQLite.

use chrono::NaiveDate;

use super::Database;
use crate::models::{Clinician, KolamDesign, Patient, Task};
use crate::store::{note_key, NoteStore, Repository, StoreResult};

impl Repository for Database {
    fn clinician(&self, id: &str) -> StoreResult<Option<Clinician>> {
        Ok(self.get_clinician(id)?)
    }

    fn clinician_by_email(&self, email: &str) -> StoreResult<Option<Clinician>> {
        Ok(self.get_clinician_by_email(email)?)
    }

    fn patient(&self, id: &str) -> StoreResult<Option<Patient>> {
        Ok(self.get_patient(id)?)
    }

    fn patients_for_clinician(&self, clinician_id: &str) -> StoreResult<Vec<Patient>> {
        Ok(self.list_patients_for_clinician(clinician_id)?)
    }

    fn task(&self, id: &str) -> StoreResult<Option<Task>> {
        Ok(self.get_task(id)?)
    }

    fn tasks_for_patient_on(&self, patient_id: &str, date: NaiveDate) -> StoreResult<Vec<Task>> {
        Ok(self.list_tasks_for_patient_on(patient_id, date)?)
    }

    fn design(&self, id: &str) -> StoreResult<Option<KolamDesign>> {
        Ok(self.get_design(id)?)
    }

    fn insert_design(&mut self, design: &KolamDesign) -> StoreResult<()> {
        Ok(Database::insert_design(self, design)?)
    }

    fn insert_task(&mut self, task: &Task) -> StoreResult<()> {
        Ok(Database::insert_task(self, task)?)
    }

    fn insert_schedule(&mut self, designs: &[KolamDesign], tasks: &[Task]) -> StoreResult<()> {
        Ok(Database::insert_schedule(self, designs, tasks)?)
    }

    fn update_task(&mut self, task: &Task) -> StoreResult<bool> {
        Ok(Database::update_task(self, task)?)
    }
}

impl NoteStore for Database {
    fn load_note(&self, patient_id: &str) -> StoreResult<Option<String>> {
        Ok(self.get_value(&note_key(patient_id))?)
    }

    fn save_note(&mut self, patient_id: &str, text: &str) -> StoreResult<()> {
        Ok(self.set_value(&note_key(patient_id), text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskMode;
    use crate::store::{MemoryStore, SeedData};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    /// Both backends must answer the same way for the same seed.
    #[test]
    fn test_matches_memory_store() {
        let seed = SeedData::demo(today());
        let memory = MemoryStore::seeded(seed.clone());
        let mut db = Database::open_in_memory().unwrap();
        db.seed(&seed).unwrap();

        let backends: [&dyn Repository; 2] = [&memory, &db];
        let answers: Vec<_> = backends
            .iter()
            .map(|repo| {
                (
                    repo.clinician_by_email("dr_meera@rec.health").unwrap(),
                    repo.patients_for_clinician("C100").unwrap(),
                    repo.tasks_for_patient_on("A001", today()).unwrap(),
                    repo.design("K002").unwrap(),
                    repo.task("T404").unwrap(),
                )
            })
            .collect();

        assert_eq!(answers[0], answers[1]);
    }

    #[test]
    fn test_write_through_trait() {
        let mut db = Database::open_in_memory().unwrap();
        db.seed(&SeedData::demo(today())).unwrap();
        let repo: &mut dyn Repository = &mut db;

        let task = Task::new("A001".into(), today(), "K001".into(), TaskMode::GuidedTraining);
        repo.insert_task(&task).unwrap();
        assert_eq!(repo.task(&task.id).unwrap(), Some(task));
    }

    #[test]
    fn test_failed_schedule_stores_nothing() {
        let seed = SeedData::demo(today());
        let mut memory = MemoryStore::seeded(seed.clone());
        let mut db = Database::open_in_memory().unwrap();
        db.seed(&seed).unwrap();

        let backends: [&mut dyn Repository; 2] = [&mut memory, &mut db];
        for repo in backends {
            let design = KolamDesign::generated("M0,0 L1,1".into(), Default::default());
            let fresh =
                Task::new("A001".into(), today(), design.id.clone(), TaskMode::GuidedTraining);
            let mut clash = fresh.clone();
            clash.id = "T001".into();

            let err = repo.insert_schedule(&[design.clone()], &[fresh.clone(), clash]);
            assert!(err.is_err());
            assert!(repo.design(&design.id).unwrap().is_none());
            assert!(repo.task(&fresh.id).unwrap().is_none());

            repo.insert_schedule(&[design.clone()], &[fresh.clone()]).unwrap();
            assert_eq!(repo.design(&design.id).unwrap(), Some(design));
            assert_eq!(repo.task(&fresh.id).unwrap(), Some(fresh));
        }
    }

    #[test]
    fn test_notes_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kolam.db");

        {
            let mut db = Database::open(&path).unwrap();
            db.save_note("Z014", "Recognised the 4x4 pattern unprompted").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(
            db.load_note("Z014").unwrap().as_deref(),
            Some("Recognised the 4x4 pattern unprompted")
        );
    }
}
