//! Therapy task models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the patient works through a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskMode {
    /// Trace a displayed pattern in real time
    GuidedTraining,
    /// View a pattern, then reproduce it from memory
    RecallSequence,
}

impl TaskMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskMode::GuidedTraining => "GuidedTraining",
            TaskMode::RecallSequence => "RecallSequence",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GuidedTraining" => Some(TaskMode::GuidedTraining),
            "RecallSequence" => Some(TaskMode::RecallSequence),
            _ => None,
        }
    }

    /// Short badge label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskMode::GuidedTraining => "Guided Training",
            TaskMode::RecallSequence => "Recall Exercise",
        }
    }

    /// Heading shown in the task player.
    pub fn title(&self) -> &'static str {
        match self {
            TaskMode::GuidedTraining => "Motor Skills Training",
            TaskMode::RecallSequence => "Memory Recall Exercise",
        }
    }

    /// One-line description on task cards.
    pub fn description(&self) -> &'static str {
        match self {
            TaskMode::GuidedTraining => "Follow the guided path to improve motor skills",
            TaskMode::RecallSequence => "Study the pattern, then reproduce from memory",
        }
    }
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Skipped,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "completed" => Some(TaskStatus::Completed),
            "skipped" => Some(TaskStatus::Skipped),
            _ => None,
        }
    }
}

/// Scores recorded for a completed attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    /// Stroke accuracy percentage
    pub stroke_accuracy: f64,
    /// Stroke precision percentage
    pub stroke_precision: f64,
    /// Path recall percentage (recall-tracked patients only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_recall_score: Option<f64>,
    /// Time spent on the attempt
    pub time_taken_sec: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A single exercise assigned to a patient for a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub patient_id: String,
    /// Day the task is scheduled for
    pub date: NaiveDate,
    /// Design the patient draws
    pub kolam_id: String,
    pub mode: TaskMode,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResult>,
}

impl Task {
    /// Create a pending task with a fresh ID.
    pub fn new(patient_id: String, date: NaiveDate, kolam_id: String, mode: TaskMode) -> Self {
        Self {
            id: format!("T-{}", uuid::Uuid::new_v4()),
            patient_id,
            date,
            kolam_id,
            mode,
            status: TaskStatus::Pending,
            result: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Record a result and mark the task completed.
    pub fn complete(&mut self, result: TaskResult) {
        self.status = TaskStatus::Completed;
        self.result = Some(result);
    }
}

/// Raw interaction trace submitted when a patient finishes a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttemptData {
    /// Self-reported tracing progress (0 - 100)
    pub progress: f64,
    /// Seconds spent practising
    pub time_elapsed_sec: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_task_is_pending() {
        let task = Task::new(
            "A001".into(),
            date("2026-10-19"),
            "K001".into(),
            TaskMode::GuidedTraining,
        );
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.result.is_none());
        assert!(task.id.starts_with("T-"));
        assert_eq!(task.id.len(), 38); // "T-" + UUID
    }

    #[test]
    fn test_new_task_ids_are_unique() {
        let a = Task::new(
            "A001".into(),
            date("2026-10-19"),
            "K001".into(),
            TaskMode::GuidedTraining,
        );
        let b = Task::new(
            "A001".into(),
            date("2026-10-19"),
            "K001".into(),
            TaskMode::GuidedTraining,
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_complete() {
        let mut task = Task::new(
            "Z014".into(),
            date("2026-10-19"),
            "K004".into(),
            TaskMode::RecallSequence,
        );
        task.complete(TaskResult {
            stroke_accuracy: 61.0,
            stroke_precision: 59.5,
            path_recall_score: Some(70.0),
            time_taken_sec: 140.0,
            notes: None,
        });
        assert!(task.is_completed());
        assert_eq!(task.result.unwrap().path_recall_score, Some(70.0));
    }

    #[test]
    fn test_json_shape() {
        let task = Task::new(
            "A001".into(),
            date("2026-10-19"),
            "K001".into(),
            TaskMode::GuidedTraining,
        );
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["date"], "2026-10-19");
        assert_eq!(json["kolamId"], "K001");
        assert_eq!(json["mode"], "GuidedTraining");
        assert_eq!(json["status"], "pending");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_enum_spellings_round_trip() {
        for status in [TaskStatus::Pending, TaskStatus::Completed, TaskStatus::Skipped] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        for mode in [TaskMode::GuidedTraining, TaskMode::RecallSequence] {
            assert_eq!(TaskMode::parse(mode.as_str()), Some(mode));
        }
    }
}
