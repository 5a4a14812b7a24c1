//! Contract tests for the mock service facade.
//!
//! Every scenario runs against both the in-memory store and SQLite.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use kolam_core::api::{ApiError, FixedClock, MockApi};
use kolam_core::config::ApiConfig;
use kolam_core::models::{
    AttemptData, Condition, DesignPrinciples, GridSize, StrokeConstraint, Symmetry, TaskMode,
    TaskResult, TaskStatus, UserRole,
};
use kolam_core::scoring::AttemptScorer;
use kolam_core::{Database, MemoryStore, SeedData};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn backends() -> Vec<(&'static str, MockApi)> {
    let clock = Arc::new(FixedClock(today()));

    let memory =
        MockApi::new(MemoryStore::demo(today()), ApiConfig::instant()).with_clock(clock.clone());

    let mut db = Database::open_in_memory().unwrap();
    db.seed(&SeedData::demo(today())).unwrap();
    let sqlite = MockApi::new(db, ApiConfig::instant()).with_clock(clock);

    vec![("memory", memory), ("sqlite", sqlite)]
}

#[tokio::test]
async fn test_patient_login() {
    for (name, api) in backends() {
        let user = api.login("A001", "demo123").await.unwrap();
        assert_eq!(user.role, UserRole::Patient, "{}", name);
        assert_eq!(user.name, "Ananya S", "{}", name);
        assert_eq!(user.email, "A001", "{}", name);
    }
}

#[tokio::test]
async fn test_clinician_login_and_roster() {
    for (name, api) in backends() {
        let user = api.login("dr_meera@rec.health", "demo123").await.unwrap();
        assert_eq!(user.role, UserRole::Clinician, "{}", name);
        assert_eq!(user.email, "dr_meera@rec.health", "{}", name);

        let profile = api.get_clinician_profile(&user.id).await.unwrap().unwrap();
        assert_eq!(profile.specialty, "Neurology", "{}", name);

        let roster = api.get_clinician_patients(&user.id).await.unwrap();
        let ids: Vec<_> = roster.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A001", "Z014"], "{}", name);

        assert!(api.get_clinician_patients("C101").await.unwrap().is_empty(), "{}", name);
        assert!(api.get_clinician_profile("C999").await.unwrap().is_none(), "{}", name);
    }
}

#[tokio::test]
async fn test_login_failures() {
    for (name, api) in backends() {
        for (identifier, password) in [
            ("A001", "demo1234"),
            ("a001", "demo123"),
            ("dr_nobody@rec.health", "demo123"),
            ("", ""),
        ] {
            let err = api.login(identifier, password).await.unwrap_err();
            assert!(matches!(err, ApiError::InvalidCredentials), "{} {}", name, identifier);
        }
    }
}

#[tokio::test]
async fn test_submit_t001() {
    for (name, api) in backends() {
        let attempt = AttemptData {
            progress: 75.0,
            time_elapsed_sec: 132,
            notes: Some("Task completed".into()),
        };
        api.submit_task("T001", attempt).await.unwrap();

        let task = api.get_task("T001").await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Completed, "{}", name);

        let result = task.result.unwrap();
        assert!((70.0..=95.0).contains(&result.stroke_accuracy), "{}", name);
        assert!((65.0..=92.0).contains(&result.stroke_precision), "{}", name);
        assert!(result.path_recall_score.is_none(), "{}", name);
        assert!((120.0..=300.0).contains(&result.time_taken_sec), "{}", name);
        assert_eq!(result.notes.as_deref(), Some("Task completed"), "{}", name);
    }
}

#[tokio::test]
async fn test_submit_recall_task_scores_recall() {
    for (name, api) in backends() {
        let task = api.submit_task("T004", AttemptData::default()).await.unwrap();
        let recall = task.result.unwrap().path_recall_score.unwrap();
        assert!((50.0..=90.0).contains(&recall), "{}", name);
    }
}

/// Scorer that attaches a recall score to every attempt.
struct AlwaysRecall;

impl AttemptScorer for AlwaysRecall {
    fn score(&self, _: Option<Condition>, _: TaskMode, _: &AttemptData) -> TaskResult {
        TaskResult {
            stroke_accuracy: 80.0,
            stroke_precision: 75.0,
            path_recall_score: Some(70.0),
            time_taken_sec: 150.0,
            notes: None,
        }
    }
}

#[tokio::test]
async fn test_recall_only_kept_for_alzheimer_patients() {
    for (name, api) in backends() {
        let api = api.with_scorer(Arc::new(AlwaysRecall));

        let autism = api.submit_task("T001", AttemptData::default()).await.unwrap();
        assert!(autism.result.unwrap().path_recall_score.is_none(), "{}", name);
        let stored = api.get_task("T001").await.unwrap().unwrap();
        assert!(stored.result.unwrap().path_recall_score.is_none(), "{}", name);

        let alzheimer = api.submit_task("T004", AttemptData::default()).await.unwrap();
        assert_eq!(alzheimer.result.unwrap().path_recall_score, Some(70.0), "{}", name);
    }
}

#[tokio::test]
async fn test_submit_unknown_task() {
    for (name, api) in backends() {
        let err = api.submit_task("T999", AttemptData::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::TaskNotFound(ref id) if id == "T999"), "{}", name);
    }
}

#[tokio::test]
async fn test_metrics_series() {
    for (name, api) in backends() {
        let week = api.get_patient_metrics("Z014", "7d").await.unwrap();
        assert_eq!(week.len(), 7, "{}", name);
        assert_eq!(week[0].date, today() - Duration::days(6), "{}", name);
        assert_eq!(week[6].date, today(), "{}", name);
        assert!(week.iter().all(|m| m.avg_path_recall_score.is_some()), "{}", name);

        let autism = api.get_patient_metrics("A001", "30d").await.unwrap();
        assert_eq!(autism.len(), 30, "{}", name);
        assert!(autism.iter().all(|m| m.avg_path_recall_score.is_none()), "{}", name);

        assert_eq!(api.get_patient_metrics("A001", "14").await.unwrap().len(), 14);
        assert!(api.get_patient_metrics("A001", "0d").await.unwrap().is_empty());
        assert!(api.get_patient_metrics("A001", "d").await.is_err());
    }
}

#[tokio::test]
async fn test_oversized_metrics_range_is_rejected() {
    for (name, api) in backends() {
        for range in ["3651d", "100000000d", "4000000000d"] {
            let err = api.get_patient_metrics("A001", range).await.unwrap_err();
            assert!(matches!(err, ApiError::InvalidRange(_)), "{} {}", name, range);
        }
        let longest = api.get_patient_metrics("A001", "3650d").await.unwrap();
        assert_eq!(longest.len(), 3650, "{}", name);
    }
}

#[tokio::test]
async fn test_tasks_by_day() {
    for (name, api) in backends() {
        let today_tasks = api.get_patient_tasks("A001", today()).await.unwrap();
        assert_eq!(today_tasks.len(), 2, "{}", name);

        let yesterday = api
            .get_patient_tasks("A001", today() - Duration::days(1))
            .await
            .unwrap();
        assert_eq!(yesterday.len(), 1, "{}", name);
        assert_eq!(yesterday[0].id, "T003", "{}", name);
        assert!(yesterday[0].is_completed(), "{}", name);

        assert!(api.get_patient_tasks("X999", today()).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_generate_kolams() {
    for (name, api) in backends() {
        let principles = DesignPrinciples {
            symmetry: Symmetry::Bilateral,
            grid_size: GridSize::Five,
            constraints: vec![StrokeConstraint::StartTopLeft, StrokeConstraint::EndBottomRight],
            notes: Some("Bold lines".into()),
            ..DesignPrinciples::default()
        };

        let designs = api.generate_kolams("Z014", principles.clone()).await.unwrap();
        assert_eq!(designs.len(), 5, "{}", name);
        assert!(designs.iter().all(|d| d.principles == principles), "{}", name);

        let ids: HashSet<_> = designs.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids.len(), 5, "{}", name);

        for design in &designs {
            let stored = api.get_kolam_design(&design.id).await.unwrap();
            assert_eq!(stored.as_ref(), Some(design), "{}", name);
        }

        let tomorrow = today() + Duration::days(1);
        let scheduled = api.get_patient_tasks("Z014", tomorrow).await.unwrap();
        assert_eq!(scheduled.len(), 5, "{}", name);
        for task in &scheduled {
            assert_eq!(task.status, TaskStatus::Pending, "{}", name);
            assert_eq!(task.mode, TaskMode::RecallSequence, "{}", name);
            assert!(ids.contains(&task.kolam_id), "{}", name);
        }
    }
}

#[tokio::test]
async fn test_generation_cycles_templates() {
    let (_, api) = backends().remove(0);
    let designs = api
        .generate_kolams("A001", DesignPrinciples::default())
        .await
        .unwrap();
    let seeded = api.get_kolam_design("K001").await.unwrap().unwrap();
    assert_eq!(designs[0].svg_path, seeded.svg_path);

    let tasks = api
        .get_patient_tasks("A001", today() + Duration::days(1))
        .await
        .unwrap();
    assert!(tasks.iter().all(|t| t.mode == TaskMode::GuidedTraining));
}

#[tokio::test]
async fn test_generate_for_unknown_patient_leaves_store_untouched() {
    for (name, api) in backends() {
        let err = api
            .generate_kolams("X999", DesignPrinciples::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PatientNotFound(_)), "{}", name);
        assert!(api
            .get_patient_tasks("X999", today() + Duration::days(1))
            .await
            .unwrap()
            .is_empty());
    }
}

#[tokio::test]
async fn test_concurrent_submissions_all_land() {
    let (_, api) = backends().remove(0);
    let (a, b, c) = tokio::join!(
        api.submit_task("T001", AttemptData::default()),
        api.submit_task("T002", AttemptData::default()),
        api.submit_task("T005", AttemptData::default()),
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();

    for id in ["T001", "T002", "T005"] {
        assert!(api.get_task(id).await.unwrap().unwrap().is_completed(), "{}", id);
    }
}

#[tokio::test]
async fn test_analyze_kolam() {
    let (_, api) = backends().remove(0);
    let report = api
        .analyze_kolam(b"\x89PNG\r\n", kolam_analysis::KolamKind::Pulli)
        .await
        .unwrap();
    assert_eq!(report.symmetry_label(), "85% Bilateral");
    assert_eq!(report.dot_count, 247);

    let err = api
        .analyze_kolam(&[], kolam_analysis::KolamKind::Pulli)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Analysis(_)));
}
