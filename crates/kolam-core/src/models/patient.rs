//! Patient models.

use serde::{Deserialize, Serialize};

use super::TaskMode;

/// Condition a patient is being treated for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Condition {
    Autism,
    Alzheimer,
}

impl Condition {
    /// Canonical spelling, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Autism => "Autism",
            Condition::Alzheimer => "Alzheimer",
        }
    }

    /// Parse the canonical spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Autism" => Some(Condition::Autism),
            "Alzheimer" => Some(Condition::Alzheimer),
            _ => None,
        }
    }

    /// Exercise mode assigned to patients with this condition.
    pub fn task_mode(&self) -> TaskMode {
        match self {
            Condition::Autism => TaskMode::GuidedTraining,
            Condition::Alzheimer => TaskMode::RecallSequence,
        }
    }
}

/// A patient on a clinician's roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Patient ID (doubles as the patient's login identifier)
    pub id: String,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Condition under treatment
    pub condition: Condition,
    /// Clinician responsible for this patient (lookup only)
    pub assigned_clinician_id: String,
}

impl Patient {
    /// Create a patient record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        condition: Condition,
        assigned_clinician_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            condition,
            assigned_clinician_id: assigned_clinician_id.into(),
        }
    }

    /// Exercise mode for new tasks assigned to this patient.
    pub fn task_mode(&self) -> TaskMode {
        self.condition.task_mode()
    }

    /// Whether recall scores are tracked for this patient.
    pub fn tracks_recall(&self) -> bool {
        self.condition == Condition::Alzheimer
    }
}
