//! Kolam Therapy Core Library
//!
//! Service layer for a kolam-based therapy and education product: patients
//! trace or recall kolam patterns, clinicians generate new designs and follow
//! progress.
//!
//! # Architecture
//!
//! ```text
//!   Page controllers (login, homes, generator, task player, analyzer)
//!          │                      │
//!       Session              Route table
//!          │
//!          ▼
//!   MockApi ── latency ── AttemptScorer / MetricsSource / PatternAnalyzer
//!          │
//!   [Arc<Mutex<dyn Repository>>]
//!          │
//!    ┌─────┴──────┐
//!    ▼            ▼
//! MemoryStore   Database (SQLite)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Task, KolamDesign, Metrics, etc.)
//! - [`store`]: Repository and note store traits, in-memory store, demo seed
//! - [`db`]: SQLite backend for the same traits
//! - [`scoring`]: Attempt scoring and metrics generation seams
//! - [`api`]: Async mock service facade
//! - [`session`]: Signed-in user
//! - [`navigation`]: Routes and role gating
//! - [`pages`]: Screen controllers
//! - [`config`]: Runtime configuration

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod navigation;
pub mod pages;
pub mod scoring;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use api::{ApiError, Clock, FixedClock, MockApi, SystemClock};
pub use config::{load_config, KolamConfig};
pub use db::Database;
pub use models::{
    AttemptData, AuthUser, Clinician, Condition, DesignPrinciples, KolamDesign, Metrics, Patient,
    Task, TaskMode, TaskResult, TaskStatus, UserRole,
};
pub use navigation::Route;
pub use session::Session;
pub use store::{MemoryNoteStore, MemoryStore, NoteStore, Repository, SeedData};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use kolam_analysis::{AnalysisReport, KolamKind};
use tokio::runtime::Runtime;

use crate::models::{GridSize, GridType, StrokeConstraint, Symmetry};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum KolamError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Analysis error: {0}")]
    AnalysisError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl From<ApiError> for KolamError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::InvalidCredentials => KolamError::InvalidCredentials,
            ApiError::TaskNotFound(_) | ApiError::PatientNotFound(_) => {
                KolamError::NotFound(e.to_string())
            }
            ApiError::InvalidRange(_) => KolamError::InvalidInput(e.to_string()),
            ApiError::Store(_) => KolamError::DatabaseError(e.to_string()),
            ApiError::Analysis(_) => KolamError::AnalysisError(e.to_string()),
        }
    }
}

impl From<db::DbError> for KolamError {
    fn from(e: db::DbError) -> Self {
        KolamError::DatabaseError(e.to_string())
    }
}

impl From<store::StoreError> for KolamError {
    fn from(e: store::StoreError) -> Self {
        KolamError::DatabaseError(e.to_string())
    }
}

impl From<session::SessionError> for KolamError {
    fn from(e: session::SessionError) -> Self {
        KolamError::Unauthorized(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for KolamError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        KolamError::RuntimeError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Demo service over the in-memory store. State resets when dropped.
#[uniffi::export]
pub fn open_demo_core() -> Result<Arc<KolamCore>, KolamError> {
    let config = load_config(None).map_err(|e| KolamError::ConfigError(e.to_string()))?;
    let api = MockApi::demo(config.api.clone(), Arc::new(SystemClock));
    KolamCore::build(api, Box::new(MemoryNoteStore::new()), config)
}

/// Service over a SQLite database at `path`, seeded with the demo data set.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<KolamCore>, KolamError> {
    let config = load_config(None).map_err(|e| KolamError::ConfigError(e.to_string()))?;
    let clock = Arc::new(SystemClock);

    let mut db = Database::open(&path)?;
    db.seed(&SeedData::demo(clock.today()))?;
    let notes = Database::open(&path)?;

    let api = MockApi::new(db, config.api.clone()).with_clock(clock);
    KolamCore::build(api, Box::new(notes), config)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Blocking facade for native front ends.
#[derive(uniffi::Object)]
pub struct KolamCore {
    runtime: Runtime,
    api: MockApi,
    session: Mutex<Session>,
    notes: Mutex<Box<dyn NoteStore + Send>>,
    config: KolamConfig,
}

impl KolamCore {
    fn build(
        api: MockApi,
        notes: Box<dyn NoteStore + Send>,
        config: KolamConfig,
    ) -> Result<Arc<Self>, KolamError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| KolamError::RuntimeError(e.to_string()))?;

        Ok(Arc::new(Self {
            runtime,
            api,
            session: Mutex::new(Session::new()),
            notes: Mutex::new(notes),
            config,
        }))
    }
}

#[uniffi::export]
impl KolamCore {
    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in and remember the user for later calls.
    pub fn login(&self, identifier: String, password: String) -> Result<FfiAuthUser, KolamError> {
        let user = self.runtime.block_on(self.api.login(&identifier, &password))?;
        self.session.lock()?.login(user.clone());
        Ok(user.into())
    }

    pub fn logout(&self) -> Result<(), KolamError> {
        self.session.lock()?.logout();
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<FfiAuthUser>, KolamError> {
        let session = self.session.lock()?;
        Ok(session.user().cloned().map(|u| u.into()))
    }

    /// Check the signed-in user may open `path`.
    pub fn authorize_route(&self, path: String) -> Result<(), KolamError> {
        let session = self.session.lock()?;
        Route::parse(&path).authorize(&session)?;
        Ok(())
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn get_clinician_profile(&self, id: String) -> Result<Option<FfiClinician>, KolamError> {
        let clinician = self.runtime.block_on(self.api.get_clinician_profile(&id))?;
        Ok(clinician.map(|c| c.into()))
    }

    pub fn get_clinician_patients(
        &self,
        clinician_id: String,
    ) -> Result<Vec<FfiPatient>, KolamError> {
        let patients = self.runtime.block_on(self.api.get_clinician_patients(&clinician_id))?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, KolamError> {
        let patient = self.runtime.block_on(self.api.get_patient(&id))?;
        Ok(patient.map(|p| p.into()))
    }

    /// Metrics for `range` ("7d", "30d"); the configured default when absent.
    pub fn get_patient_metrics(
        &self,
        patient_id: String,
        range: Option<String>,
    ) -> Result<Vec<FfiMetrics>, KolamError> {
        let range = range.unwrap_or_else(|| self.config.metrics.default_range.clone());
        let metrics = self
            .runtime
            .block_on(self.api.get_patient_metrics(&patient_id, &range))?;
        Ok(metrics.into_iter().map(|m| m.into()).collect())
    }

    /// Tasks for a `YYYY-MM-DD` date.
    pub fn get_patient_tasks(
        &self,
        patient_id: String,
        date: String,
    ) -> Result<Vec<FfiTask>, KolamError> {
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| KolamError::InvalidInput(format!("Bad date {:?}: {}", date, e)))?;
        let tasks = self.runtime.block_on(self.api.get_patient_tasks(&patient_id, date))?;
        Ok(tasks.into_iter().map(|t| t.into()).collect())
    }

    pub fn get_task(&self, id: String) -> Result<Option<FfiTask>, KolamError> {
        let task = self.runtime.block_on(self.api.get_task(&id))?;
        Ok(task.map(|t| t.into()))
    }

    pub fn get_kolam_design(&self, id: String) -> Result<Option<FfiKolamDesign>, KolamError> {
        let design = self.runtime.block_on(self.api.get_kolam_design(&id))?;
        Ok(design.map(|d| d.into()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Generate designs for a patient. Clinicians only.
    pub fn generate_kolams(
        &self,
        patient_id: String,
        principles: FfiDesignPrinciples,
    ) -> Result<Vec<FfiKolamDesign>, KolamError> {
        self.session.lock()?.require_role(UserRole::Clinician)?;
        let principles = DesignPrinciples::try_from(principles)?;
        let designs = self
            .runtime
            .block_on(self.api.generate_kolams(&patient_id, principles))?;
        Ok(designs.into_iter().map(|d| d.into()).collect())
    }

    pub fn submit_task(
        &self,
        task_id: String,
        progress: f64,
        time_elapsed_sec: u64,
        notes: Option<String>,
    ) -> Result<FfiTask, KolamError> {
        self.session.lock()?.require_user()?;
        let attempt = AttemptData {
            progress,
            time_elapsed_sec,
            notes,
        };
        let task = self.runtime.block_on(self.api.submit_task(&task_id, attempt))?;
        Ok(task.into())
    }

    /// Analyze an uploaded image. `kind` is a kolam kind ID ("padi").
    pub fn analyze_kolam(
        &self,
        image: Vec<u8>,
        kind: String,
    ) -> Result<FfiAnalysisReport, KolamError> {
        let kind = KolamKind::from_id(&kind)
            .ok_or_else(|| KolamError::InvalidInput(format!("Unknown kolam kind: {}", kind)))?;
        let report = self.runtime.block_on(self.api.analyze_kolam(&image, kind))?;
        Ok(report.into())
    }

    // =========================================================================
    // Notes
    // =========================================================================

    pub fn load_note(&self, patient_id: String) -> Result<Option<String>, KolamError> {
        let notes = self.notes.lock()?;
        Ok(notes.load_note(&patient_id)?)
    }

    pub fn save_note(&self, patient_id: String, text: String) -> Result<(), KolamError> {
        self.session.lock()?.require_role(UserRole::Clinician)?;
        let mut notes = self.notes.lock()?;
        notes.save_note(&patient_id, &text)?;
        Ok(())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAuthUser {
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: String,
}

impl From<AuthUser> for FfiAuthUser {
    fn from(u: AuthUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            role: u.role.as_str().to_string(),
            name: u.name,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinician {
    pub id: String,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub avatar_url: Option<String>,
    pub initials: String,
}

impl From<Clinician> for FfiClinician {
    fn from(c: Clinician) -> Self {
        let initials = c.initials();
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            specialty: c.specialty,
            avatar_url: c.avatar_url,
            initials,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub assigned_clinician_id: String,
}

impl From<Patient> for FfiPatient {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
            condition: p.condition.as_str().to_string(),
            assigned_clinician_id: p.assigned_clinician_id,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTaskResult {
    pub stroke_accuracy: f64,
    pub stroke_precision: f64,
    pub path_recall_score: Option<f64>,
    pub time_taken_sec: f64,
    pub notes: Option<String>,
}

impl From<TaskResult> for FfiTaskResult {
    fn from(r: TaskResult) -> Self {
        Self {
            stroke_accuracy: r.stroke_accuracy,
            stroke_precision: r.stroke_precision,
            path_recall_score: r.path_recall_score,
            time_taken_sec: r.time_taken_sec,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTask {
    pub id: String,
    pub patient_id: String,
    /// YYYY-MM-DD
    pub date: String,
    pub kolam_id: String,
    pub mode: String,
    pub status: String,
    pub result: Option<FfiTaskResult>,
}

impl From<Task> for FfiTask {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            patient_id: t.patient_id,
            date: t.date.format("%Y-%m-%d").to_string(),
            kolam_id: t.kolam_id,
            mode: t.mode.as_str().to_string(),
            status: t.status.as_str().to_string(),
            result: t.result.map(|r| r.into()),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDesignPrinciples {
    pub symmetry: String,
    pub grid_type: String,
    pub grid_size: String,
    pub constraints: Vec<String>,
    pub notes: Option<String>,
}

impl From<DesignPrinciples> for FfiDesignPrinciples {
    fn from(p: DesignPrinciples) -> Self {
        Self {
            symmetry: p.symmetry.as_str().to_string(),
            grid_type: p.grid_type.as_str().to_string(),
            grid_size: p.grid_size.as_str().to_string(),
            constraints: p.constraints.iter().map(|c| c.as_str().to_string()).collect(),
            notes: p.notes,
        }
    }
}

impl TryFrom<FfiDesignPrinciples> for DesignPrinciples {
    type Error = KolamError;

    fn try_from(p: FfiDesignPrinciples) -> Result<Self, Self::Error> {
        let invalid = |field: &str, value: &str| {
            KolamError::InvalidInput(format!("Unknown {}: {}", field, value))
        };

        let constraints = p
            .constraints
            .iter()
            .map(|c| StrokeConstraint::parse(c).ok_or_else(|| invalid("constraint", c)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DesignPrinciples {
            symmetry: Symmetry::parse(&p.symmetry).ok_or_else(|| invalid("symmetry", &p.symmetry))?,
            grid_type: GridType::parse(&p.grid_type)
                .ok_or_else(|| invalid("grid type", &p.grid_type))?,
            grid_size: GridSize::parse(&p.grid_size)
                .ok_or_else(|| invalid("grid size", &p.grid_size))?,
            constraints,
            notes: p.notes,
        })
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiKolamDesign {
    pub id: String,
    pub svg_path: String,
    pub preview_url: Option<String>,
    pub principles: FfiDesignPrinciples,
}

impl From<KolamDesign> for FfiKolamDesign {
    fn from(d: KolamDesign) -> Self {
        Self {
            id: d.id,
            svg_path: d.svg_path,
            preview_url: d.preview_url,
            principles: d.principles.into(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMetrics {
    /// YYYY-MM-DD
    pub date: String,
    pub tasks_completed: u32,
    pub avg_stroke_accuracy: f64,
    pub avg_stroke_precision: f64,
    pub avg_path_recall_score: Option<f64>,
}

impl From<Metrics> for FfiMetrics {
    fn from(m: Metrics) -> Self {
        Self {
            date: m.date.format("%Y-%m-%d").to_string(),
            tasks_completed: m.tasks_completed,
            avg_stroke_accuracy: m.avg_stroke_accuracy,
            avg_stroke_precision: m.avg_stroke_precision,
            avg_path_recall_score: m.avg_path_recall_score,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnalysisReport {
    pub kind: String,
    pub symmetry: String,
    pub dot_count: u32,
    pub eulerian_path: String,
    pub complexity: String,
    pub cultural_note: String,
}

impl From<AnalysisReport> for FfiAnalysisReport {
    fn from(r: AnalysisReport) -> Self {
        Self {
            kind: r.kind.id().to_string(),
            symmetry: r.symmetry_label(),
            dot_count: r.dot_count,
            eulerian_path: r.path_label().to_string(),
            complexity: format!("{:.1}/10", r.complexity),
            cultural_note: r.cultural_note,
        }
    }
}
