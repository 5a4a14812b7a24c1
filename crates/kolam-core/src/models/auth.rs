//! Authenticated identity.

use serde::{Deserialize, Serialize};

use super::{Clinician, Patient};

/// Role of a signed-in user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserRole {
    Patient,
    Clinician,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Patient => "Patient",
            UserRole::Clinician => "Clinician",
        }
    }
}

/// The identity returned by a successful login. Held only in a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub name: String,
}

impl AuthUser {
    pub fn from_clinician(clinician: &Clinician) -> Self {
        Self {
            id: clinician.id.clone(),
            email: clinician.email.clone(),
            role: UserRole::Clinician,
            name: clinician.name.clone(),
        }
    }

    /// Patients sign in with their ID, which also stands in for the email.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            email: patient.id.clone(),
            role: UserRole::Patient,
            name: patient.name.clone(),
        }
    }

    pub fn is_clinician(&self) -> bool {
        self.role == UserRole::Clinician
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Condition;

    #[test]
    fn test_patient_identity_uses_id_as_email() {
        let patient = Patient::new("Z014", "Sridhar K", 67, Condition::Alzheimer, "C100");
        let user = AuthUser::from_patient(&patient);
        assert_eq!(user.email, "Z014");
        assert_eq!(user.role, UserRole::Patient);
        assert!(!user.is_clinician());
    }
}
