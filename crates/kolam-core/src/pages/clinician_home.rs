//! Clinician landing screen: profile and roster.

use tracing::warn;

use super::{Notification, Notifications, PageError, PageResult, PageState};
use crate::api::{ApiError, MockApi};
use crate::models::{Clinician, Patient, TaskStatus, UserRole};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub patient: Patient,
    /// Tasks scheduled today and not yet done
    pub pending_today: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClinicianHomeView {
    pub clinician: Clinician,
    pub roster: Vec<RosterEntry>,
}

impl ClinicianHomeView {
    pub fn total_pending(&self) -> usize {
        self.roster.iter().map(|e| e.pending_today).sum()
    }
}

#[derive(Debug, Default)]
pub struct ClinicianHomePage {
    state: PageState<ClinicianHomeView>,
    notifications: Notifications,
}

impl ClinicianHomePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PageState<ClinicianHomeView> {
        &self.state
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub async fn load(&mut self, api: &MockApi, session: &Session) -> PageResult<()> {
        let clinician_id = session.require_role(UserRole::Clinician)?.id.clone();
        self.state = PageState::Loading;

        let loaded = tokio::try_join!(
            api.get_clinician_profile(&clinician_id),
            api.get_clinician_patients(&clinician_id),
        );
        let (clinician, patients) = match loaded {
            Ok(parts) => parts,
            Err(e) => return Err(self.fail(e)),
        };
        let Some(clinician) = clinician else {
            self.state = PageState::Missing;
            return Ok(());
        };

        let today = api.today();
        let mut roster = Vec::with_capacity(patients.len());
        for patient in patients {
            let tasks = match api.get_patient_tasks(&patient.id, today).await {
                Ok(tasks) => tasks,
                Err(e) => return Err(self.fail(e)),
            };
            let pending_today = tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending)
                .count();
            roster.push(RosterEntry {
                patient,
                pending_today,
            });
        }

        self.state = PageState::Ready(ClinicianHomeView { clinician, roster });
        Ok(())
    }

    fn fail(&mut self, error: ApiError) -> PageError {
        warn!(error = %error, "Failed to load clinician home");
        self.notifications
            .push(Notification::error("Error", "Failed to load your patients"));
        self.state = PageState::Missing;
        error.into()
    }
}
