//! Patient landing screen: today's tasks and recent progress.

use tracing::warn;

use super::{Notification, Notifications, PageError, PageResult, PageState};
use crate::api::{ApiError, MockApi};
use crate::models::{KolamDesign, Metrics, Patient, Task, UserRole};
use crate::session::Session;

/// Range requested by the dashboards.
pub const DASHBOARD_RANGE: &str = "7d";

/// A task with the design it uses, if that design still resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub task: Task,
    pub design: Option<KolamDesign>,
}

impl TaskCard {
    pub fn description(&self) -> &'static str {
        self.task.mode.description()
    }
}

/// The figure shown next to accuracy: recall or precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatientHomeView {
    pub patient: Patient,
    pub tasks: Vec<TaskCard>,
    pub metrics: Vec<Metrics>,
}

impl PatientHomeView {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|c| c.task.is_completed()).count()
    }

    /// Percentage of today's tasks completed; 0 with no tasks.
    pub fn completion_rate(&self) -> f64 {
        if self.tasks.is_empty() {
            0.0
        } else {
            self.completed_count() as f64 / self.tasks.len() as f64 * 100.0
        }
    }

    pub fn latest_metrics(&self) -> Option<&Metrics> {
        self.metrics.last()
    }

    pub fn headline(&self) -> Option<Headline> {
        let latest = self.latest_metrics()?;
        Some(if self.patient.tracks_recall() {
            Headline {
                label: "Recall",
                value: latest.avg_path_recall_score.unwrap_or(0.0),
            }
        } else {
            Headline {
                label: "Precision",
                value: latest.avg_stroke_precision,
            }
        })
    }
}

#[derive(Debug, Default)]
pub struct PatientHomePage {
    state: PageState<PatientHomeView>,
    notifications: Notifications,
}

impl PatientHomePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PageState<PatientHomeView> {
        &self.state
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Load the signed-in patient's day.
    pub async fn load(&mut self, api: &MockApi, session: &Session) -> PageResult<()> {
        let patient_id = session.require_role(UserRole::Patient)?.id.clone();
        self.state = PageState::Loading;

        let loaded = tokio::try_join!(
            api.get_patient(&patient_id),
            api.get_patient_tasks(&patient_id, api.today()),
            api.get_patient_metrics(&patient_id, DASHBOARD_RANGE),
        );
        let (patient, tasks, metrics) = match loaded {
            Ok(parts) => parts,
            Err(e) => return Err(self.fail(e)),
        };
        let Some(patient) = patient else {
            self.state = PageState::Missing;
            return Ok(());
        };

        let mut cards = Vec::with_capacity(tasks.len());
        for task in tasks {
            let design = match api.get_kolam_design(&task.kolam_id).await {
                Ok(design) => design,
                Err(e) => return Err(self.fail(e)),
            };
            cards.push(TaskCard { task, design });
        }

        self.state = PageState::Ready(PatientHomeView {
            patient,
            tasks: cards,
            metrics,
        });
        Ok(())
    }

    fn fail(&mut self, error: ApiError) -> PageError {
        warn!(error = %error, "Failed to load patient home");
        self.notifications
            .push(Notification::error("Error", "Failed to load your tasks"));
        self.state = PageState::Missing;
        error.into()
    }
}
