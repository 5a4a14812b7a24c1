//! SQLite schema definition.

/// Complete database schema.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Roster
-- ============================================================================

CREATE TABLE IF NOT EXISTS clinicians (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    specialty TEXT NOT NULL,
    avatar_url TEXT
);

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    condition TEXT NOT NULL CHECK (condition IN ('Autism', 'Alzheimer')),
    assigned_clinician_id TEXT NOT NULL           -- lookup only, no ownership
);

CREATE INDEX IF NOT EXISTS idx_patients_clinician ON patients(assigned_clinician_id);

-- ============================================================================
-- Designs
-- ============================================================================

CREATE TABLE IF NOT EXISTS kolam_designs (
    id TEXT PRIMARY KEY,
    svg_path TEXT NOT NULL,
    preview_url TEXT,
    principles TEXT NOT NULL                       -- JSON DesignPrinciples
);

-- ============================================================================
-- Tasks
-- ============================================================================

CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(id),
    date TEXT NOT NULL,                            -- YYYY-MM-DD
    kolam_id TEXT NOT NULL REFERENCES kolam_designs(id),
    mode TEXT NOT NULL CHECK (mode IN ('GuidedTraining', 'RecallSequence')),
    status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'completed', 'skipped')),
    result TEXT                                    -- JSON TaskResult
);

CREATE INDEX IF NOT EXISTS idx_tasks_patient_date ON tasks(patient_id, date);

-- ============================================================================
-- Notes (key/value)
-- ============================================================================

CREATE TABLE IF NOT EXISTS notes (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_condition_check() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO patients (id, name, age, condition, assigned_clinician_id) VALUES ('X1', 'X', 30, 'Flu', 'C100')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_task_requires_existing_patient() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO kolam_designs (id, svg_path, principles) VALUES ('K001', 'M0,0', '{}')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO tasks (id, patient_id, date, kolam_id, mode) VALUES ('T1', 'NOPE', '2026-10-18', 'K001', 'GuidedTraining')",
            [],
        );
        assert!(result.is_err());
    }
}
