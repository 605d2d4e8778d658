/// Task history model and database operations
///
/// History records form an append-only audit trail of task changes. They are
/// never updated or deleted by the application; when a task is removed the
/// database clears the reference (ON DELETE SET NULL) so the trail survives
/// the task.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_history (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     change_description VARCHAR(255) NOT NULL,
///     change_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     task_id UUID REFERENCES tasks(id) ON DELETE SET NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Audit record describing one change to a task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskHistory {
    /// Unique record ID
    pub id: Uuid,

    /// Free-text description of the change
    pub change_description: String,

    /// When the change happened
    pub change_date: DateTime<Utc>,

    /// Task the change applied to (null once the task is deleted)
    pub task_id: Option<Uuid>,
}

impl TaskHistory {
    /// Appends a history record for a task
    ///
    /// Called inside the same transaction as the task mutation it describes,
    /// so either both writes commit or neither does.
    pub async fn record<'e>(
        exec: impl PgExecutor<'e>,
        description: &str,
        task_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let entry = sqlx::query_as::<_, TaskHistory>(
            r#"
            INSERT INTO task_history (change_description, task_id)
            VALUES ($1, $2)
            RETURNING id, change_description, change_date, task_id
            "#,
        )
        .bind(description)
        .bind(task_id)
        .fetch_one(exec)
        .await?;

        Ok(entry)
    }

    /// Lists the history of a task, oldest first
    pub async fn list_by_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let entries = sqlx::query_as::<_, TaskHistory>(
            r#"
            SELECT id, change_description, change_date, task_id
            FROM task_history
            WHERE task_id = $1
            ORDER BY change_date ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }
}
