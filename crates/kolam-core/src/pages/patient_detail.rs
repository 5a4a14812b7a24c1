//! Clinician view of one patient: KPIs and private notes.

use tracing::{debug, warn};

use super::{Notification, Notifications, PageResult, PageState, DASHBOARD_RANGE};
use crate::api::MockApi;
use crate::models::{Metrics, MetricsSummary, Patient, UserRole};
use crate::session::Session;
use crate::store::NoteStore;

#[derive(Debug, Clone, PartialEq)]
pub struct PatientDetailView {
    pub patient: Patient,
    pub metrics: Vec<Metrics>,
    pub summary: MetricsSummary,
}

#[derive(Debug)]
pub struct PatientDetailPage {
    patient_id: String,
    state: PageState<PatientDetailView>,
    /// Editable notes text
    pub notes: String,
    notifications: Notifications,
}

impl PatientDetailPage {
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            state: PageState::Loading,
            notes: String::new(),
            notifications: Notifications::default(),
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn state(&self) -> &PageState<PatientDetailView> {
        &self.state
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub async fn load(
        &mut self,
        api: &MockApi,
        session: &Session,
        notes: &dyn NoteStore,
    ) -> PageResult<()> {
        session.require_role(UserRole::Clinician)?;
        self.state = PageState::Loading;

        let loaded = tokio::try_join!(
            api.get_patient(&self.patient_id),
            api.get_patient_metrics(&self.patient_id, DASHBOARD_RANGE),
        );
        let (patient, metrics) = match loaded {
            Ok(parts) => parts,
            Err(e) => {
                warn!(patient_id = %self.patient_id, error = %e, "Failed to load patient data");
                self.notifications
                    .push(Notification::error("Error", "Failed to load patient data"));
                self.state = PageState::Missing;
                return Err(e.into());
            }
        };

        match notes.load_note(&self.patient_id) {
            Ok(Some(saved)) => self.notes = saved,
            Ok(None) => {}
            Err(e) => {
                warn!(patient_id = %self.patient_id, error = %e, "Failed to load notes");
                self.notifications
                    .push(Notification::error("Error", "Failed to load notes"));
                self.state = PageState::Missing;
                return Err(e.into());
            }
        }

        self.state = match patient {
            Some(patient) => {
                let summary = MetricsSummary::from_series(&metrics, patient.condition);
                PageState::Ready(PatientDetailView {
                    patient,
                    metrics,
                    summary,
                })
            }
            None => PageState::Missing,
        };
        Ok(())
    }

    /// Persist the notes text.
    pub fn save_notes(&mut self, notes: &mut dyn NoteStore) -> PageResult<()> {
        notes.save_note(&self.patient_id, &self.notes)?;
        debug!(patient_id = %self.patient_id, "Saved notes");
        Ok(())
    }
}
