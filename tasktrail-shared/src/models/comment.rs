/// Comment model and database operations
///
/// Comments are free-text notes attached to a task. The creation timestamp
/// is set by the database and refreshed on update.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     content VARCHAR(255) NOT NULL,
///     creation_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,

    /// Comment text
    pub content: String,

    /// When the comment was created (refreshed on update)
    pub creation_date: DateTime<Utc>,

    /// Task this comment belongs to
    pub task_id: Uuid,
}

/// Input for creating or updating a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// Comment text
    pub content: String,

    /// Task this comment belongs to
    pub task_id: Uuid,
}

impl Comment {
    /// Creates a new comment
    pub async fn create(pool: &PgPool, data: CreateComment) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, task_id)
            VALUES ($1, $2)
            RETURNING id, content, creation_date, task_id
            "#,
        )
        .bind(data.content)
        .bind(data.task_id)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Finds a comment by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, content, creation_date, task_id FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Lists all comments on a task, oldest first
    pub async fn list_by_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, creation_date, task_id
            FROM comments
            WHERE task_id = $1
            ORDER BY creation_date ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }

    /// Updates a comment's content and task reference
    ///
    /// The creation timestamp is refreshed so it always reflects the last
    /// write. Returns `None` if the comment does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: CreateComment,
    ) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = $2, task_id = $3, creation_date = NOW()
            WHERE id = $1
            RETURNING id, content, creation_date, task_id
            "#,
        )
        .bind(id)
        .bind(data.content)
        .bind(data.task_id)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Deletes a comment
    ///
    /// Returns `false` if no comment with that ID existed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
