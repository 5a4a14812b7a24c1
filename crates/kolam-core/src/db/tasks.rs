//! Task database operations.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::{format_date, parse_date, Database, DbError, DbResult};
use crate::models::{Task, TaskMode, TaskResult, TaskStatus};

const COLUMNS: &str = "id, patient_id, date, kolam_id, mode, status, result";

pub(super) fn insert(conn: &Connection, task: &Task, ignore_existing: bool) -> DbResult<()> {
    let verb = if ignore_existing { "INSERT OR IGNORE" } else { "INSERT" };
    let result_json = task
        .result
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    conn.execute(
        &format!(
            "{} INTO tasks ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            verb, COLUMNS
        ),
        params![
            task.id,
            task.patient_id,
            format_date(task.date),
            task.kolam_id,
            task.mode.as_str(),
            task.status.as_str(),
            result_json,
        ],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct TaskRow {
    id: String,
    patient_id: String,
    date: String,
    kolam_id: String,
    mode: String,
    status: String,
    result: Option<String>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DbError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let mode = TaskMode::parse(&row.mode)
            .ok_or_else(|| DbError::Constraint(format!("Unknown task mode: {}", row.mode)))?;
        let status = TaskStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown task status: {}", row.status)))?;
        let result: Option<TaskResult> = row
            .result
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Task {
            id: row.id,
            patient_id: row.patient_id,
            date: parse_date(&row.date)?,
            kolam_id: row.kolam_id,
            mode,
            status,
            result,
        })
    }
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        date: row.get(2)?,
        kolam_id: row.get(3)?,
        mode: row.get(4)?,
        status: row.get(5)?,
        result: row.get(6)?,
    })
}

impl Database {
    /// Insert a new task.
    pub fn insert_task(&self, task: &Task) -> DbResult<()> {
        insert(&self.conn, task, false)
    }

    /// Write a task's status and result.
    pub fn update_task(&self, task: &Task) -> DbResult<bool> {
        let result_json = task
            .result
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let rows_affected = self.conn.execute(
            "UPDATE tasks SET status = ?2, result = ?3 WHERE id = ?1",
            params![task.id, task.status.as_str(), result_json],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a task by ID.
    pub fn get_task(&self, id: &str) -> DbResult<Option<Task>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM tasks WHERE id = ?", COLUMNS),
                [id],
                map_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List a patient's tasks for one day, in insertion order.
    pub fn list_tasks_for_patient_on(
        &self,
        patient_id: &str,
        date: NaiveDate,
    ) -> DbResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM tasks WHERE patient_id = ?1 AND date = ?2 ORDER BY rowid",
            COLUMNS
        ))?;

        let rows = stmt.query_map(params![patient_id, format_date(date)], map_row)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?.try_into()?);
        }
        Ok(tasks)
    }
}
