//! Kolam design models.

use serde::{Deserialize, Serialize};

/// Symmetry a design is meant to exhibit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Symmetry {
    #[default]
    None,
    Rotational,
    Bilateral,
}

impl Symmetry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symmetry::None => "none",
            Symmetry::Rotational => "rotational",
            Symmetry::Bilateral => "bilateral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Symmetry::None),
            "rotational" => Some(Symmetry::Rotational),
            "bilateral" => Some(Symmetry::Bilateral),
            _ => None,
        }
    }
}

/// Dot grid layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    #[default]
    Square,
    Triangular,
}

impl GridType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridType::Square => "square",
            GridType::Triangular => "triangular",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "square" => Some(GridType::Square),
            "triangular" => Some(GridType::Triangular),
            _ => None,
        }
    }
}

/// Dot grid dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GridSize {
    #[default]
    #[serde(rename = "3x3")]
    Three,
    #[serde(rename = "4x4")]
    Four,
    #[serde(rename = "5x5")]
    Five,
}

impl GridSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridSize::Three => "3x3",
            GridSize::Four => "4x4",
            GridSize::Five => "5x5",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "3x3" => Some(GridSize::Three),
            "4x4" => Some(GridSize::Four),
            "5x5" => Some(GridSize::Five),
            _ => None,
        }
    }

    /// Dots per side.
    pub fn side(&self) -> u32 {
        match self {
            GridSize::Three => 3,
            GridSize::Four => 4,
            GridSize::Five => 5,
        }
    }
}

/// Drawing rule attached to a design.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeConstraint {
    SingleStroke,
    StartTopLeft,
    EndBottomRight,
    AvoidCrossings,
}

impl StrokeConstraint {
    /// Constraints offered by the generator, in display order.
    pub const ALL: [StrokeConstraint; 4] = [
        StrokeConstraint::SingleStroke,
        StrokeConstraint::StartTopLeft,
        StrokeConstraint::EndBottomRight,
        StrokeConstraint::AvoidCrossings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeConstraint::SingleStroke => "single-stroke",
            StrokeConstraint::StartTopLeft => "start-top-left",
            StrokeConstraint::EndBottomRight => "end-bottom-right",
            StrokeConstraint::AvoidCrossings => "avoid-crossings",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Checkbox label ("single stroke").
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

/// Parameters nominally describing a design.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignPrinciples {
    pub symmetry: Symmetry,
    pub grid_type: GridType,
    pub grid_size: GridSize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<StrokeConstraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A drawable kolam pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KolamDesign {
    pub id: String,
    /// SVG path drawing instructions
    pub svg_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    pub principles: DesignPrinciples,
}

impl KolamDesign {
    /// Create a design with a fresh ID.
    pub fn generated(svg_path: String, principles: DesignPrinciples) -> Self {
        Self {
            id: format!("K-{}", uuid::Uuid::new_v4()),
            svg_path,
            preview_url: None,
            principles,
        }
    }
}
