//! Scoring and progress-metrics seams.
//!
//! Attempt scores and metrics series are produced behind traits so a real
//! stroke analyzer or analytics pipeline can replace the random placeholders.

mod random;

pub use random::*;

use chrono::NaiveDate;

use crate::models::{AttemptData, Condition, Metrics, TaskMode, TaskResult};

/// Turns a raw attempt trace into scores.
pub trait AttemptScorer: Send + Sync {
    /// `condition` is `None` when the task's patient is unknown.
    fn score(
        &self,
        condition: Option<Condition>,
        mode: TaskMode,
        attempt: &AttemptData,
    ) -> TaskResult;
}

/// Produces a daily metrics series ending today.
pub trait MetricsSource: Send + Sync {
    /// Returns `days` records, oldest first.
    fn series(&self, condition: Option<Condition>, days: u32, today: NaiveDate) -> Vec<Metrics>;
}

/// Upper bounds applied to every stored score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCeilings {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

impl Default for ScoreCeilings {
    fn default() -> Self {
        Self {
            accuracy: 95.0,
            precision: 92.0,
            recall: 100.0,
        }
    }
}

impl ScoreCeilings {
    /// Clamp each score into `[0, ceiling]`. NaN becomes 0.
    pub fn clamp(&self, mut result: TaskResult) -> TaskResult {
        result.stroke_accuracy = bound(result.stroke_accuracy, self.accuracy);
        result.stroke_precision = bound(result.stroke_precision, self.precision);
        result.path_recall_score = result.path_recall_score.map(|r| bound(r, self.recall));
        if result.time_taken_sec.is_nan() || result.time_taken_sec < 0.0 {
            result.time_taken_sec = 0.0;
        }
        result
    }
}

fn bound(value: f64, ceiling: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, ceiling)
    }
}
