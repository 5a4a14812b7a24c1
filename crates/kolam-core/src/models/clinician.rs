//! Clinician models.

use serde::{Deserialize, Serialize};

/// A clinician on the static roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clinician {
    pub id: String,
    pub name: String,
    /// Login identifier
    pub email: String,
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Clinician {
    /// Create a clinician without an avatar.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            specialty: specialty.into(),
            avatar_url: None,
        }
    }

    /// Initials shown when no avatar is set ("Dr. Meera Raman" -> "MR").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter(|word| !word.ends_with('.'))
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_skip_title() {
        let clinician =
            Clinician::new("C100", "Dr. Meera Raman", "dr_meera@rec.health", "Neurology");
        assert_eq!(clinician.initials(), "MR");
    }

    #[test]
    fn test_avatar_omitted_when_absent() {
        let clinician = Clinician::new(
            "C101",
            "Dr. Ashok Iyer",
            "dr_ashok@rec.health",
            "Cognitive Therapy",
        );
        let json = serde_json::to_value(&clinician).unwrap();
        assert!(json.get("avatarUrl").is_none());
    }
}
