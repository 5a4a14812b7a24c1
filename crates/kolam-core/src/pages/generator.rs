//! Design generator screen.

use tracing::{error, warn};

use super::{Notification, Notifications, PageResult, PageState};
use crate::api::MockApi;
use crate::models::{
    DesignPrinciples, GridSize, GridType, KolamDesign, Patient, StrokeConstraint, Symmetry,
    UserRole,
};
use crate::session::Session;

/// Generator form values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorForm {
    pub selected_patient: Option<String>,
    pub grid_type: GridType,
    pub grid_size: GridSize,
    pub symmetry: Symmetry,
    pub constraints: Vec<StrokeConstraint>,
    pub notes: String,
}

impl GeneratorForm {
    /// Add the constraint if absent, otherwise remove it.
    pub fn toggle_constraint(&mut self, constraint: StrokeConstraint) {
        if let Some(pos) = self.constraints.iter().position(|c| *c == constraint) {
            self.constraints.remove(pos);
        } else {
            self.constraints.push(constraint);
        }
    }

    pub fn principles(&self) -> DesignPrinciples {
        let notes = self.notes.trim();
        DesignPrinciples {
            symmetry: self.symmetry,
            grid_type: self.grid_type,
            grid_size: self.grid_size,
            constraints: self.constraints.clone(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct GeneratorPage {
    patients: PageState<Vec<Patient>>,
    pub form: GeneratorForm,
    generating: bool,
    generated: Vec<KolamDesign>,
    notifications: Notifications,
}

impl GeneratorPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patients(&self) -> &PageState<Vec<Patient>> {
        &self.patients
    }

    pub fn generated(&self) -> &[KolamDesign] {
        &self.generated
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Load the signed-in clinician's roster.
    pub async fn load(&mut self, api: &MockApi, session: &Session) -> PageResult<()> {
        let clinician_id = session.require_role(UserRole::Clinician)?.id.clone();
        self.patients = PageState::Loading;

        match api.get_clinician_patients(&clinician_id).await {
            Ok(patients) => {
                self.patients = PageState::Ready(patients);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load roster");
                self.notifications
                    .push(Notification::error("Error", "Failed to load patients"));
                self.patients = PageState::Missing;
                Err(e.into())
            }
        }
    }

    /// Generate designs for the selected patient.
    pub async fn generate(&mut self, api: &MockApi) -> PageResult<()> {
        let Some(patient_id) = self.form.selected_patient.clone() else {
            self.notifications.push(Notification::error(
                "Patient required",
                "Please select a patient before generating designs.",
            ));
            return Ok(());
        };

        self.generating = true;
        let outcome = api.generate_kolams(&patient_id, self.form.principles()).await;
        self.generating = false;

        match outcome {
            Ok(designs) => {
                let name = self
                    .patients
                    .ready()
                    .and_then(|list| list.iter().find(|p| p.id == patient_id))
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| patient_id.clone());
                self.notifications.push(Notification::info(
                    "Designs Generated!",
                    format!("{} designs assigned to {} for tomorrow.", designs.len(), name),
                ));
                self.generated = designs;
                Ok(())
            }
            Err(e) => {
                error!(patient_id = %patient_id, error = %e, "Generation failed");
                self.notifications.push(Notification::error(
                    "Generation failed",
                    "Failed to generate designs. Please try again.",
                ));
                Err(e.into())
            }
        }
    }

    /// Restore form defaults and clear results.
    pub fn reset(&mut self) {
        self.form = GeneratorForm::default();
        self.generated.clear();
    }
}
