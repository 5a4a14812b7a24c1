//! Demo roster, designs and tasks loaded into a fresh store.

use chrono::NaiveDate;

use crate::models::{
    Clinician, Condition, DesignPrinciples, GridSize, GridType, KolamDesign, Patient,
    StrokeConstraint, Symmetry, Task, TaskMode, TaskResult, TaskStatus,
};

/// Path templates cycled through when minting new designs.
pub const TEMPLATE_PATHS: [&str; 5] = [
    "M50,20 L80,50 L50,80 L20,50 Z M35,35 L65,35 L65,65 L35,65 Z",
    "M30,30 Q50,10 70,30 Q90,50 70,70 Q50,90 30,70 Q10,50 30,30 Z",
    "M50,10 L90,50 L70,90 L30,90 L10,50 Z M40,30 L60,30 L70,50 L60,70 L40,70 L30,50 Z",
    "M20,20 L80,20 L80,80 L20,80 Z M35,35 L65,35 M35,50 L65,50 M35,65 L65,65",
    "M50,15 L75,40 L50,65 L25,40 Z M50,25 L65,40 L50,55 L35,40 Z",
];

/// Template for the `index`-th design of a batch.
pub fn template_path(index: usize) -> &'static str {
    TEMPLATE_PATHS[index % TEMPLATE_PATHS.len()]
}

/// Records a store starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    pub clinicians: Vec<Clinician>,
    pub patients: Vec<Patient>,
    pub designs: Vec<KolamDesign>,
    pub tasks: Vec<Task>,
}

impl SeedData {
    /// The demo data set, with tasks scheduled relative to `today`.
    pub fn demo(today: NaiveDate) -> Self {
        let yesterday = today.pred_opt().unwrap_or(today);

        let mut meera =
            Clinician::new("C100", "Dr. Meera Raman", "dr_meera@rec.health", "Neurology");
        meera.avatar_url = Some(
            "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=150&h=150&fit=crop&crop=face".into(),
        );
        let mut ashok = Clinician::new(
            "C101",
            "Dr. Ashok Iyer",
            "dr_ashok@rec.health",
            "Cognitive Therapy",
        );
        ashok.avatar_url = Some(
            "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=150&h=150&fit=crop&crop=face".into(),
        );

        let patients = vec![
            Patient::new("A001", "Ananya S", 10, Condition::Autism, "C100"),
            Patient::new("Z014", "Sridhar K", 67, Condition::Alzheimer, "C100"),
        ];

        let design = |id: &str, index: usize, principles: DesignPrinciples| KolamDesign {
            id: id.to_string(),
            svg_path: TEMPLATE_PATHS[index].to_string(),
            preview_url: None,
            principles,
        };
        let principles = |symmetry, grid_type, grid_size, constraints: &[StrokeConstraint]| {
            DesignPrinciples {
                symmetry,
                grid_type,
                grid_size,
                constraints: constraints.to_vec(),
                notes: None,
            }
        };

        use GridSize::{Five, Four, Three};
        use GridType::{Square, Triangular};
        use Symmetry::{Bilateral, Rotational};

        let designs = vec![
            design(
                "K001",
                0,
                principles(Rotational, Square, Three, &[StrokeConstraint::SingleStroke]),
            ),
            design(
                "K002",
                1,
                principles(Bilateral, Square, Four, &[StrokeConstraint::StartTopLeft]),
            ),
            design("K003", 2, principles(Rotational, Triangular, Three, &[])),
            design(
                "K004",
                3,
                principles(Bilateral, Square, Four, &[StrokeConstraint::AvoidCrossings]),
            ),
            design("K005", 4, principles(Rotational, Square, Five, &[])),
        ];

        let task = |id: &str, patient_id: &str, date: NaiveDate, kolam_id: &str, mode| Task {
            id: id.to_string(),
            patient_id: patient_id.to_string(),
            date,
            kolam_id: kolam_id.to_string(),
            mode,
            status: TaskStatus::Pending,
            result: None,
        };

        let mut done = task("T003", "A001", yesterday, "K003", TaskMode::GuidedTraining);
        done.complete(TaskResult {
            stroke_accuracy: 72.0,
            stroke_precision: 68.0,
            path_recall_score: None,
            time_taken_sec: 185.0,
            notes: None,
        });

        let tasks = vec![
            task("T001", "A001", today, "K001", TaskMode::GuidedTraining),
            task("T002", "A001", today, "K002", TaskMode::GuidedTraining),
            done,
            task("T004", "Z014", today, "K004", TaskMode::RecallSequence),
            task("T005", "Z014", today, "K005", TaskMode::RecallSequence),
        ];

        Self {
            clinicians: vec![meera, ashok],
            patients,
            designs,
            tasks,
        }
    }
}
