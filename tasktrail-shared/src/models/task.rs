/// Task model and database operations
///
/// Tasks belong to a project and carry a six-value status enum. There is no
/// enforced transition graph: any status may move to any other by explicit
/// request. Every task mutation is audited through
/// [`TaskHistory`](super::task_history::TaskHistory); the service layer runs
/// the mutation and the history insert in one transaction, so the mutating
/// operations here accept any `PgExecutor` rather than a pool.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM (
///     'to_do', 'in_progress', 'waiting_for_approval', 'blocked', 'completed', 'cancelled'
/// );
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(100) NOT NULL,
///     description VARCHAR(255),
///     start_date DATE,
///     end_date DATE,
///     status task_status NOT NULL DEFAULT 'to_do',
///     project_id UUID NOT NULL REFERENCES projects(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use super::DateField;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    WaitingForApproval,
    Blocked,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Converts status to its symbolic name as used in the JSON API and in
    /// history record templates
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "TO_DO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::WaitingForApproval => "WAITING_FOR_APPROVAL",
            TaskStatus::Blocked => "BLOCKED",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status string case-insensitively
    ///
    /// Input is upper-cased before matching, so `"to_do"`, `"To_Do"` and
    /// `"TO_DO"` all parse to [`TaskStatus::ToDo`]. Underscores are still
    /// required. Project status parsing is case-sensitive; the asymmetry is
    /// a documented quirk of the API surface that clients rely on.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TO_DO" => Some(TaskStatus::ToDo),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "WAITING_FOR_APPROVAL" => Some(TaskStatus::WaitingForApproval),
            "BLOCKED" => Some(TaskStatus::Blocked),
            "COMPLETED" => Some(TaskStatus::Completed),
            "CANCELLED" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional start date
    pub start_date: Option<NaiveDate>,

    /// Optional end date
    pub end_date: Option<NaiveDate>,

    /// Current status
    pub status: TaskStatus,

    /// Project this task belongs to
    pub project_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional start date
    pub start_date: Option<NaiveDate>,

    /// Optional end date
    pub end_date: Option<NaiveDate>,

    /// Initial status
    pub status: TaskStatus,

    /// Project this task belongs to
    pub project_id: Uuid,
}

const TASK_COLUMNS: &str =
    "id, title, description, start_date, end_date, status, project_id, created_at";

impl Task {
    /// Creates a new task
    pub async fn create<'e>(
        exec: impl PgExecutor<'e>,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, start_date, end_date, status, project_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, start_date, end_date, status, project_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.status)
        .bind(data.project_id)
        .fetch_one(exec)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by title (first match wins)
    pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE title = $1 ORDER BY created_at ASC LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at ASC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists all tasks in a project
    pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at ASC"
        ))
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists all tasks with a given status
    pub async fn list_by_status(pool: &PgPool, status: TaskStatus) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE status = $1 ORDER BY created_at ASC"
        ))
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists all tasks sorted by one of the allow-listed date columns
    ///
    /// The column name is interpolated from [`DateField`], never from raw
    /// client input.
    pub async fn list_sorted(
        pool: &PgPool,
        field: DateField,
        descending: bool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let direction = if descending { "DESC" } else { "ASC" };
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY {} {}",
            field.as_column(),
            direction
        ))
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's status
    ///
    /// Returns the updated task, or `None` if the task does not exist.
    pub async fn update_status<'e>(
        exec: impl PgExecutor<'e>,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET status = $2 WHERE id = $1 RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(exec)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns `false` if no task with that ID existed. History rows keep
    /// their row but lose the reference (ON DELETE SET NULL); comments are
    /// removed with the task.
    pub async fn delete<'e>(exec: impl PgExecutor<'e>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
