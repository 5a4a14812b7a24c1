//! Daily progress metrics.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Condition;

/// Aggregated performance for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub date: NaiveDate,
    pub tasks_completed: u32,
    pub avg_stroke_accuracy: f64,
    pub avg_stroke_precision: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_path_recall_score: Option<f64>,
}

/// Range string that does not end in a usable day count.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid metrics range: {0:?}")]
pub struct InvalidRange(pub String);

/// Number of trailing days a metrics series covers ("7d", "30d", "14").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsRange {
    pub days: u32,
}

impl MetricsRange {
    pub const WEEK: MetricsRange = MetricsRange { days: 7 };

    /// Longest series served (ten years).
    pub const MAX_DAYS: u32 = 3650;
}

impl FromStr for MetricsRange {
    type Err = InvalidRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_suffix('d')
            .or_else(|| trimmed.strip_suffix('D'))
            .unwrap_or(trimmed);

        let digit_start = body
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(idx, _)| idx)
            .ok_or_else(|| InvalidRange(s.to_string()))?;

        match body[digit_start..].parse::<u32>() {
            Ok(days) if days <= Self::MAX_DAYS => Ok(MetricsRange { days }),
            _ => Err(InvalidRange(s.to_string())),
        }
    }
}

/// KPI tiles derived from a metrics series.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    /// Most recent day
    pub latest: Option<Metrics>,
    pub avg_accuracy: Option<f64>,
    pub avg_precision: Option<f64>,
    /// Only reported for recall-tracked conditions
    pub avg_recall: Option<f64>,
}

impl MetricsSummary {
    /// Summarize a series ordered oldest first.
    pub fn from_series(series: &[Metrics], condition: Condition) -> Self {
        let mean = |values: Vec<f64>| -> Option<f64> {
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        };

        let avg_recall = if condition == Condition::Alzheimer {
            // Days without a recall score count as zero
            mean(
                series
                    .iter()
                    .map(|m| m.avg_path_recall_score.unwrap_or(0.0))
                    .collect(),
            )
        } else {
            None
        };

        Self {
            latest: series.last().cloned(),
            avg_accuracy: mean(series.iter().map(|m| m.avg_stroke_accuracy).collect()),
            avg_precision: mean(series.iter().map(|m| m.avg_stroke_precision).collect()),
            avg_recall,
        }
    }
}
