//! Traditional kolam families offered on the Analyzer screen.

use serde::{Deserialize, Serialize};

/// Family of kolam the user says they uploaded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum KolamKind {
    /// Grid-based patterns
    #[default]
    Padi,
    /// Dot-connected designs
    Pulli,
    /// Continuous line patterns looping around dots
    Sikku,
    /// Creative interpretations
    Freeform,
}

impl KolamKind {
    /// All kinds, in display order.
    pub const ALL: [KolamKind; 4] = [
        KolamKind::Padi,
        KolamKind::Pulli,
        KolamKind::Sikku,
        KolamKind::Freeform,
    ];

    /// Stable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            KolamKind::Padi => "padi",
            KolamKind::Pulli => "pulli",
            KolamKind::Sikku => "sikku",
            KolamKind::Freeform => "freeform",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KolamKind::Padi => "Padi Kolam",
            KolamKind::Pulli => "Pulli Kolam",
            KolamKind::Sikku => "Sikku Kolam",
            KolamKind::Freeform => "Freeform",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            KolamKind::Padi => "Traditional grid-based patterns",
            KolamKind::Pulli => "Dot-connected designs",
            KolamKind::Sikku => "Continuous line patterns",
            KolamKind::Freeform => "Creative interpretations",
        }
    }

    /// Look up a kind by its identifier (case-insensitive).
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}
