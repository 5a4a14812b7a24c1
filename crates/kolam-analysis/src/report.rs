//! Analysis report model and the canned analyzer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kinds::KolamKind;

/// Analysis errors.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No image data supplied")]
    EmptyImage,

    #[error("Analysis backend error: {0}")]
    Backend(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Dominant symmetry detected in a drawing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SymmetryKind {
    None,
    Rotational,
    Bilateral,
}

impl SymmetryKind {
    pub fn label(&self) -> &'static str {
        match self {
            SymmetryKind::None => "None",
            SymmetryKind::Rotational => "Rotational",
            SymmetryKind::Bilateral => "Bilateral",
        }
    }
}

/// Result of analyzing one drawing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Kind selected by the user
    pub kind: KolamKind,
    /// Dominant symmetry
    pub symmetry: SymmetryKind,
    /// Match strength for the dominant symmetry (0 - 100)
    pub symmetry_percent: f64,
    /// Number of grid dots extracted
    pub dot_count: u32,
    /// Whether the line work admits a single-stroke traversal
    pub eulerian_path: bool,
    /// Visual complexity (0 - 10)
    pub complexity: f64,
    /// Short cultural reading of the pattern
    pub cultural_note: String,
}

/// One result tile on the Analyzer screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTile {
    pub title: &'static str,
    pub value: String,
}

impl AnalysisReport {
    /// e.g. "85% Bilateral"
    pub fn symmetry_label(&self) -> String {
        format!("{:.0}% {}", self.symmetry_percent, self.symmetry.label())
    }

    pub fn path_label(&self) -> &'static str {
        if self.eulerian_path {
            "Valid Eulerian"
        } else {
            "No Eulerian path"
        }
    }

    /// Result tiles in display order.
    pub fn feature_tiles(&self) -> Vec<FeatureTile> {
        vec![
            FeatureTile {
                title: "Symmetry Analysis",
                value: self.symmetry_label(),
            },
            FeatureTile {
                title: "Dot Extraction",
                value: format!("{} Points", self.dot_count),
            },
            FeatureTile {
                title: "Eulerian Path",
                value: if self.eulerian_path { "Valid" } else { "Invalid" }.to_string(),
            },
            FeatureTile {
                title: "Complexity Score",
                value: format!("{:.1}/10", self.complexity),
            },
        ]
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Reading attached to every canned report.
pub const DEFAULT_CULTURAL_NOTE: &str = "This Kolam represents prosperity and welcoming energy, traditionally drawn at dawn to invite positive forces.";

/// Something that can analyze an uploaded drawing.
pub trait PatternAnalyzer: Send + Sync {
    fn analyze(&self, image: &[u8], kind: KolamKind) -> AnalysisResult<AnalysisReport>;
}

/// Analyzer returning a fixed report for any non-empty upload.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalyzer;

impl PatternAnalyzer for MockAnalyzer {
    fn analyze(&self, image: &[u8], kind: KolamKind) -> AnalysisResult<AnalysisReport> {
        if image.is_empty() {
            return Err(AnalysisError::EmptyImage);
        }

        Ok(AnalysisReport {
            kind,
            symmetry: SymmetryKind::Bilateral,
            symmetry_percent: 85.0,
            dot_count: 247,
            eulerian_path: true,
            complexity: 7.2,
            cultural_note: DEFAULT_CULTURAL_NOTE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mock_analyzer_canned_report() {
        let report = MockAnalyzer.analyze(b"\x89PNG", KolamKind::Sikku).unwrap();
        assert_eq!(report.symmetry_label(), "85% Bilateral");
        assert_eq!(report.path_label(), "Valid Eulerian");

        let tiles = report.feature_tiles();
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[1].value, "247 Points");
        assert_eq!(tiles[2].value, "Valid");
        assert_eq!(tiles[3].value, "7.2/10");
    }

    #[test]
    fn test_mock_analyzer_rejects_empty_upload() {
        let err = MockAnalyzer.analyze(&[], KolamKind::Padi).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyImage));
    }

    proptest! {
        #[test]
        fn mock_report_stays_in_range(image in proptest::collection::vec(any::<u8>(), 1..64)) {
            let report = MockAnalyzer.analyze(&image, KolamKind::Freeform).unwrap();
            prop_assert!((0.0..=100.0).contains(&report.symmetry_percent));
            prop_assert!((0.0..=10.0).contains(&report.complexity));
            prop_assert_eq!(report.kind, KolamKind::Freeform);
        }
    }
}
