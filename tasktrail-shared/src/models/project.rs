/// Project model and database operations
///
/// Projects are owned by a user and contain tasks. They carry a six-value
/// status enum and a pair of date columns that support sorting and exact-date
/// filtering through the [`DateField`](super::DateField) allow-list.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_status AS ENUM (
///     'planned', 'in_progress', 'completed', 'on_hold', 'cancelled', 'archived'
/// );
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(30) NOT NULL,
///     description VARCHAR(255) NOT NULL,
///     start_date DATE NOT NULL,
///     end_date DATE,
///     status project_status NOT NULL DEFAULT 'planned',
///     user_id UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use super::DateField;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planned,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
    Archived,
}

impl ProjectStatus {
    /// Converts status to its symbolic name as used in the JSON API
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planned => "PLANNED",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::Cancelled => "CANCELLED",
            ProjectStatus::Archived => "ARCHIVED",
        }
    }

    /// Parses a status from its symbolic name, case-sensitively
    ///
    /// Project status strings must match the symbolic name exactly
    /// (`"PLANNED"`, not `"planned"`). Task status parsing is
    /// case-insensitive; the asymmetry is a documented quirk of the API
    /// surface that clients rely on.
    pub fn parse_strict(s: &str) -> Option<Self> {
        match s {
            "PLANNED" => Some(ProjectStatus::Planned),
            "IN_PROGRESS" => Some(ProjectStatus::InProgress),
            "COMPLETED" => Some(ProjectStatus::Completed),
            "ON_HOLD" => Some(ProjectStatus::OnHold),
            "CANCELLED" => Some(ProjectStatus::Cancelled),
            "ARCHIVED" => Some(ProjectStatus::Archived),
            _ => None,
        }
    }
}

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Project description
    pub description: String,

    /// Start date
    pub start_date: NaiveDate,

    /// End date (null while open-ended)
    pub end_date: Option<NaiveDate>,

    /// Current status
    pub status: ProjectStatus,

    /// Owning user
    pub user_id: Uuid,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Project description
    pub description: String,

    /// Start date
    pub start_date: NaiveDate,

    /// Optional end date
    pub end_date: Option<NaiveDate>,

    /// Initial status
    pub status: ProjectStatus,

    /// Owning user
    pub user_id: Uuid,
}

const PROJECT_COLUMNS: &str =
    "id, name, description, start_date, end_date, status, user_id, created_at";

impl Project {
    /// Creates a new project
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, start_date, end_date, status, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, start_date, end_date, status, user_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.status)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by name (first match wins)
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE name = $1 ORDER BY created_at ASC LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at ASC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Lists all projects owned by a user
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Lists all projects sorted by one of the allow-listed date columns
    ///
    /// The column name is interpolated from [`DateField`], never from raw
    /// client input.
    pub async fn list_sorted(
        pool: &PgPool,
        field: DateField,
        descending: bool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let direction = if descending { "DESC" } else { "ASC" };
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY {} {}",
            field.as_column(),
            direction
        ))
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Lists projects whose allow-listed date column equals the given date
    pub async fn list_filtered_by_date(
        pool: &PgPool,
        field: DateField,
        date: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE {} = $1 ORDER BY created_at ASC",
            field.as_column()
        ))
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Reassigns a project to a new owning user
    pub async fn set_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET user_id = $2 WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project
    ///
    /// Returns `false` if no project with that ID existed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_as_str() {
        assert_eq!(ProjectStatus::Planned.as_str(), "PLANNED");
        assert_eq!(ProjectStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(ProjectStatus::Completed.as_str(), "COMPLETED");
        assert_eq!(ProjectStatus::OnHold.as_str(), "ON_HOLD");
        assert_eq!(ProjectStatus::Cancelled.as_str(), "CANCELLED");
        assert_eq!(ProjectStatus::Archived.as_str(), "ARCHIVED");
    }

    #[test]
    fn test_project_status_parse_is_case_sensitive() {
        assert_eq!(
            ProjectStatus::parse_strict("PLANNED"),
            Some(ProjectStatus::Planned)
        );
        assert_eq!(
            ProjectStatus::parse_strict("ON_HOLD"),
            Some(ProjectStatus::OnHold)
        );
        assert_eq!(ProjectStatus::parse_strict("planned"), None);
        assert_eq!(ProjectStatus::parse_strict("Planned"), None);
        assert_eq!(ProjectStatus::parse_strict("DONE"), None);
    }

    #[test]
    fn test_project_status_serializes_as_symbolic_name() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }
}
