//! Async mock service facade.
//!
//! Every call waits out an artificial delay, then reads or mutates the
//! shared store inside a short synchronous section. The store lock is never
//! held across an await, so each mutation is atomic with respect to other
//! pending calls.

mod clock;

pub use clock::*;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use kolam_analysis::{AnalysisError, AnalysisReport, KolamKind, MockAnalyzer, PatternAnalyzer};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::models::{
    AttemptData, AuthUser, Clinician, Condition, DesignPrinciples, InvalidRange, KolamDesign,
    Metrics, MetricsRange, Patient, Task,
};
use crate::scoring::{AttemptScorer, MetricsSource, RandomMetrics, RandomScorer, ScoreCeilings};
use crate::store::{template_path, MemoryStore, Repository, StoreError};

/// Password accepted for every demo account.
pub const DEMO_PASSWORD: &str = "demo123";

/// Designs minted by each generation request.
pub const DESIGNS_PER_GENERATION: usize = 5;

/// Facade errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Store handle shared by every clone of the facade.
pub type SharedRepository = Arc<Mutex<dyn Repository + Send>>;

/// The mock service. Cheap to clone; clones share one store.
#[derive(Clone)]
pub struct MockApi {
    store: SharedRepository,
    scorer: Arc<dyn AttemptScorer>,
    metrics: Arc<dyn MetricsSource>,
    analyzer: Arc<dyn PatternAnalyzer>,
    clock: Arc<dyn Clock>,
    ceilings: ScoreCeilings,
    config: ApiConfig,
}

impl MockApi {
    /// Create a facade over `store` with the random placeholders.
    pub fn new<R>(store: R, config: ApiConfig) -> Self
    where
        R: Repository + Send + 'static,
    {
        Self {
            store: Arc::new(Mutex::new(store)),
            scorer: Arc::new(RandomScorer),
            metrics: Arc::new(RandomMetrics),
            analyzer: Arc::new(MockAnalyzer),
            clock: Arc::new(SystemClock),
            ceilings: ScoreCeilings::default(),
            config,
        }
    }

    /// Facade over the demo data set, scheduled against the clock's today.
    pub fn demo(config: ApiConfig, clock: Arc<dyn Clock>) -> Self {
        let store = MemoryStore::demo(clock.today());
        Self::new(store, config).with_clock(clock)
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn AttemptScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSource>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn PatternAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn store(&self) -> MutexGuard<'_, dyn Repository + Send + 'static> {
        // A panic mid-update leaves whole records behind, so keep serving
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sign in with a clinician email or a patient ID.
    pub async fn login(&self, identifier: &str, password: &str) -> ApiResult<AuthUser> {
        delay(self.config.latency()).await;

        let user = {
            let store = self.store();
            match store.clinician_by_email(identifier)? {
                Some(clinician) => Some(AuthUser::from_clinician(&clinician)),
                None => store.patient(identifier)?.map(|p| AuthUser::from_patient(&p)),
            }
        };

        match user {
            Some(user) if password == DEMO_PASSWORD => {
                info!(user_id = %user.id, role = user.role.as_str(), "Login succeeded");
                Ok(user)
            }
            _ => {
                warn!(identifier, "Rejected login");
                Err(ApiError::InvalidCredentials)
            }
        }
    }

    pub async fn get_clinician_profile(&self, id: &str) -> ApiResult<Option<Clinician>> {
        delay(self.config.latency()).await;
        debug!(clinician_id = id, "get_clinician_profile");
        let clinician = self.store().clinician(id)?;
        Ok(clinician)
    }

    pub async fn get_clinician_patients(&self, clinician_id: &str) -> ApiResult<Vec<Patient>> {
        delay(self.config.latency()).await;
        debug!(clinician_id, "get_clinician_patients");
        let patients = self.store().patients_for_clinician(clinician_id)?;
        Ok(patients)
    }

    /// Daily metrics for the trailing range ("7d", "30d").
    pub async fn get_patient_metrics(
        &self,
        patient_id: &str,
        range: &str,
    ) -> ApiResult<Vec<Metrics>> {
        delay(self.config.latency()).await;
        debug!(patient_id, range, "get_patient_metrics");

        let range: MetricsRange = range.parse()?;
        let condition = self.store().patient(patient_id)?.map(|p| p.condition);
        Ok(self.metrics.series(condition, range.days, self.today()))
    }

    pub async fn get_patient_tasks(
        &self,
        patient_id: &str,
        date: NaiveDate,
    ) -> ApiResult<Vec<Task>> {
        delay(self.config.latency()).await;
        debug!(patient_id, %date, "get_patient_tasks");
        let tasks = self.store().tasks_for_patient_on(patient_id, date)?;
        Ok(tasks)
    }

    pub async fn get_patient(&self, id: &str) -> ApiResult<Option<Patient>> {
        delay(self.config.latency()).await;
        debug!(patient_id = id, "get_patient");
        let patient = self.store().patient(id)?;
        Ok(patient)
    }

    pub async fn get_task(&self, id: &str) -> ApiResult<Option<Task>> {
        delay(self.config.latency()).await;
        debug!(task_id = id, "get_task");
        let task = self.store().task(id)?;
        Ok(task)
    }

    pub async fn get_kolam_design(&self, id: &str) -> ApiResult<Option<KolamDesign>> {
        delay(self.config.latency()).await;
        debug!(kolam_id = id, "get_kolam_design");
        let design = self.store().design(id)?;
        Ok(design)
    }

    /// Mint a batch of designs and schedule one task per design for tomorrow.
    pub async fn generate_kolams(
        &self,
        patient_id: &str,
        principles: DesignPrinciples,
    ) -> ApiResult<Vec<KolamDesign>> {
        delay(self.config.generation_latency()).await;

        let today = self.today();
        let tomorrow = today.succ_opt().unwrap_or(today);

        let mut store = self.store();
        let patient = store
            .patient(patient_id)?
            .ok_or_else(|| ApiError::PatientNotFound(patient_id.to_string()))?;

        let designs: Vec<KolamDesign> = (0..DESIGNS_PER_GENERATION)
            .map(|index| {
                KolamDesign::generated(template_path(index).to_string(), principles.clone())
            })
            .collect();
        let tasks: Vec<Task> = designs
            .iter()
            .map(|d| Task::new(patient.id.clone(), tomorrow, d.id.clone(), patient.task_mode()))
            .collect();

        store.insert_schedule(&designs, &tasks).map_err(|e| {
            error!(error = %e, patient_id, "Failed to store generated designs");
            e
        })?;

        info!(
            patient_id,
            count = designs.len(),
            date = %tomorrow,
            "Generated designs"
        );
        Ok(designs)
    }

    /// Score an attempt and mark the task completed. Returns the updated task.
    pub async fn submit_task(&self, task_id: &str, attempt: AttemptData) -> ApiResult<Task> {
        delay(self.config.latency()).await;

        let mut store = self.store();
        let mut task = store
            .task(task_id)?
            .ok_or_else(|| ApiError::TaskNotFound(task_id.to_string()))?;
        let condition = store.patient(&task.patient_id)?.map(|p| p.condition);

        let mut result = self.ceilings.clamp(self.scorer.score(condition, task.mode, &attempt));
        // Recall is only tracked for Alzheimer patients
        if condition != Some(Condition::Alzheimer) && result.path_recall_score.take().is_some() {
            debug!(task_id, "Dropped recall score for untracked condition");
        }
        task.complete(result);

        if !store.update_task(&task)? {
            return Err(ApiError::TaskNotFound(task_id.to_string()));
        }

        info!(task_id, patient_id = %task.patient_id, "Task submitted");
        Ok(task)
    }

    /// Analyze an uploaded drawing.
    pub async fn analyze_kolam(&self, image: &[u8], kind: KolamKind) -> ApiResult<AnalysisReport> {
        delay(self.config.analysis_latency()).await;
        debug!(bytes = image.len(), kind = kind.id(), "analyze_kolam");
        Ok(self.analyzer.analyze(image, kind)?)
    }
}

async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskMode, TaskResult, TaskStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn api() -> MockApi {
        MockApi::demo(ApiConfig::instant(), Arc::new(FixedClock(today())))
    }

    struct PerfectScorer;

    impl AttemptScorer for PerfectScorer {
        fn score(&self, _: Option<Condition>, _: TaskMode, attempt: &AttemptData) -> TaskResult {
            TaskResult {
                stroke_accuracy: 100.0,
                stroke_precision: 100.0,
                path_recall_score: Some(130.0),
                time_taken_sec: attempt.time_elapsed_sec as f64,
                notes: None,
            }
        }
    }

    #[tokio::test]
    async fn test_login_roles() {
        let api = api();

        let clinician = api.login("dr_meera@rec.health", "demo123").await.unwrap();
        assert_eq!(clinician.id, "C100");
        assert!(clinician.is_clinician());

        let patient = api.login("Z014", "demo123").await.unwrap();
        assert_eq!(patient.email, "Z014");
        assert_eq!(patient.name, "Sridhar K");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password_and_unknown_user() {
        let api = api();
        assert!(matches!(
            api.login("A001", "wrong").await,
            Err(ApiError::InvalidCredentials)
        ));
        assert!(matches!(
            api.login("nobody@rec.health", "demo123").await,
            Err(ApiError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_scores_are_clamped() {
        let api = api().with_scorer(Arc::new(PerfectScorer));
        let task = api
            .submit_task("T004", AttemptData { progress: 100.0, time_elapsed_sec: 90, notes: None })
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
        let result = task.result.unwrap();
        assert_eq!(result.stroke_accuracy, 95.0);
        assert_eq!(result.stroke_precision, 92.0);
        assert_eq!(result.path_recall_score, Some(100.0));
        assert_eq!(result.time_taken_sec, 90.0);
    }

    #[tokio::test]
    async fn test_invalid_range() {
        let err = api().get_patient_metrics("A001", "week").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRange(_)));
    }

    #[tokio::test]
    async fn test_generate_for_unknown_patient() {
        let api = api();
        let err = api
            .generate_kolams("X999", DesignPrinciples::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PatientNotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_applies() {
        let api = MockApi::demo(ApiConfig::default(), Arc::new(FixedClock(today())));
        let start = tokio::time::Instant::now();
        api.get_patient("A001").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));

        let start = tokio::time::Instant::now();
        api.generate_kolams("A001", DesignPrinciples::default()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
