//! Randomized placeholders for scoring and metrics.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use super::{AttemptScorer, MetricsSource};
use crate::models::{AttemptData, Condition, Metrics, TaskMode, TaskResult};

/// Scores attempts with random offsets from a per-condition base.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomScorer;

impl RandomScorer {
    /// Score with a caller-supplied generator.
    pub fn score_with<R: Rng + ?Sized>(
        rng: &mut R,
        condition: Option<Condition>,
        attempt: &AttemptData,
    ) -> TaskResult {
        let (base_accuracy, base_precision) = match condition {
            Some(Condition::Autism) => (70.0, 65.0),
            _ => (60.0, 58.0),
        };

        let path_recall_score = match condition {
            Some(Condition::Alzheimer) => Some(50.0 + rng.gen_range(0.0..40.0)),
            _ => None,
        };

        TaskResult {
            stroke_accuracy: f64::min(95.0, base_accuracy + rng.gen_range(0.0..25.0)),
            stroke_precision: f64::min(92.0, base_precision + rng.gen_range(0.0..27.0)),
            path_recall_score,
            time_taken_sec: 120.0 + rng.gen_range(0.0..180.0),
            notes: attempt.notes.clone(),
        }
    }
}

impl AttemptScorer for RandomScorer {
    fn score(
        &self,
        condition: Option<Condition>,
        _mode: TaskMode,
        attempt: &AttemptData,
    ) -> TaskResult {
        Self::score_with(&mut rand::thread_rng(), condition, attempt)
    }
}

/// Draws every day of a series independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMetrics;

impl RandomMetrics {
    /// Generate a series with a caller-supplied generator.
    ///
    /// Days that would fall before the earliest representable date are skipped.
    pub fn series_with<R: Rng + ?Sized>(
        rng: &mut R,
        condition: Option<Condition>,
        days: u32,
        today: NaiveDate,
    ) -> Vec<Metrics> {
        (0..days)
            .rev()
            .filter_map(|offset| today.checked_sub_signed(Duration::days(i64::from(offset))))
            .map(|date| {
                let tasks_completed = rng.gen_range(1..=3);
                match condition {
                    Some(Condition::Autism) => Metrics {
                        date,
                        tasks_completed,
                        avg_stroke_accuracy: 62.0 + rng.gen_range(0.0..12.0),
                        avg_stroke_precision: 58.0 + rng.gen_range(0.0..12.0),
                        avg_path_recall_score: None,
                    },
                    // Unknown patients get the recall-tracked profile
                    _ => Metrics {
                        date,
                        tasks_completed,
                        avg_stroke_accuracy: 55.0 + rng.gen_range(0.0..11.0),
                        avg_stroke_precision: 52.0 + rng.gen_range(0.0..10.0),
                        avg_path_recall_score: Some(45.0 + rng.gen_range(0.0..15.0)),
                    },
                }
            })
            .collect()
    }
}

impl MetricsSource for RandomMetrics {
    fn series(&self, condition: Option<Condition>, days: u32, today: NaiveDate) -> Vec<Metrics> {
        Self::series_with(&mut rand::thread_rng(), condition, days, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_autism_scores() {
        let mut rng = StdRng::seed_from_u64(7);
        let attempt = AttemptData {
            progress: 80.0,
            time_elapsed_sec: 140,
            notes: Some("Task completed".into()),
        };
        for _ in 0..200 {
            let result = RandomScorer::score_with(&mut rng, Some(Condition::Autism), &attempt);
            assert!((70.0..=95.0).contains(&result.stroke_accuracy));
            assert!((65.0..=92.0).contains(&result.stroke_precision));
            assert!(result.path_recall_score.is_none());
            assert!((120.0..=300.0).contains(&result.time_taken_sec));
            assert_eq!(result.notes.as_deref(), Some("Task completed"));
        }
    }

    #[test]
    fn test_alzheimer_scores_include_recall() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let result = RandomScorer::score_with(
                &mut rng,
                Some(Condition::Alzheimer),
                &AttemptData::default(),
            );
            assert!((60.0..=95.0).contains(&result.stroke_accuracy));
            assert!((58.0..=92.0).contains(&result.stroke_precision));
            let recall = result.path_recall_score.unwrap();
            assert!((50.0..=90.0).contains(&recall));
        }
    }

    #[test]
    fn test_unknown_patient_uses_lower_base_without_recall() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = RandomScorer::score_with(&mut rng, None, &AttemptData::default());
        assert!(result.stroke_accuracy >= 60.0);
        assert!(result.path_recall_score.is_none());
    }

    #[test]
    fn test_series_dates_end_today() {
        let series = RandomMetrics.series(Some(Condition::Autism), 7, today());
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(series[6].date, today());
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_series_near_min_date_skips_unrepresentable_days() {
        let today = NaiveDate::MIN + Duration::days(2);
        let series = RandomMetrics.series(Some(Condition::Alzheimer), 5, today);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, NaiveDate::MIN);
        assert_eq!(series[2].date, today);
    }

    #[test]
    fn test_empty_series() {
        assert!(RandomMetrics.series(None, 0, today()).is_empty());
    }

    proptest! {
        #[test]
        fn series_values_in_range(seed in any::<u64>(), days in 0u32..60, autism in any::<bool>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let condition = if autism { Condition::Autism } else { Condition::Alzheimer };
            let series = RandomMetrics::series_with(&mut rng, Some(condition), days, today());
            prop_assert_eq!(series.len(), days as usize);
            for m in &series {
                prop_assert!((1..=3).contains(&m.tasks_completed));
                if autism {
                    prop_assert!((62.0..=74.0).contains(&m.avg_stroke_accuracy));
                    prop_assert!((58.0..=70.0).contains(&m.avg_stroke_precision));
                    prop_assert!(m.avg_path_recall_score.is_none());
                } else {
                    prop_assert!((55.0..=66.0).contains(&m.avg_stroke_accuracy));
                    prop_assert!((52.0..=62.0).contains(&m.avg_stroke_precision));
                    let recall = m.avg_path_recall_score.unwrap();
                    prop_assert!((45.0..=60.0).contains(&recall));
                }
            }
        }
    }
}
