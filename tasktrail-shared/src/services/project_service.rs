/// Project business rules
///
/// Creation requires an existing owner; assignment requires both sides to
/// exist and rejects assigning a project to the user who already owns it.
/// Sort and filter fields go through the [`DateField`] allow-list.

use super::{ServiceError, ServiceResult};
use crate::models::project::{CreateProject, Project};
use crate::models::user::User;
use crate::models::DateField;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Service for project operations
#[derive(Clone)]
pub struct ProjectService {
    db: PgPool,
}

impl ProjectService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a new project
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the owning user does not exist.
    pub async fn create_project(&self, data: CreateProject) -> ServiceResult<Project> {
        if User::find_by_id(&self.db, data.user_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "User with ID {} does not exist",
                data.user_id
            )));
        }

        let project = Project::create(&self.db, data).await?;
        info!(project_id = %project.id, "Created project");
        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Project> {
        Project::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project with ID {id} does not exist")))
    }

    /// Finds a project by name
    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Project> {
        Project::find_by_name(&self.db, name).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Project with name '{name}' does not exist"))
        })
    }

    /// Lists all projects
    pub async fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(Project::list_all(&self.db).await?)
    }

    /// Lists all projects sorted by a date field
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] if `sort_by` is not
    /// `start_date` or `end_date`.
    pub async fn list_sorted(&self, sort_by: &str, descending: bool) -> ServiceResult<Vec<Project>> {
        let field = parse_date_field(sort_by)?;
        Ok(Project::list_sorted(&self.db, field, descending).await?)
    }

    /// Lists projects whose date field equals the given date
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] if `filter_by` is not
    /// `start_date` or `end_date`.
    pub async fn list_filtered_by_date(
        &self,
        filter_by: &str,
        date: NaiveDate,
    ) -> ServiceResult<Vec<Project>> {
        let field = parse_date_field(filter_by)?;
        Ok(Project::list_filtered_by_date(&self.db, field, date).await?)
    }

    /// Assigns a project to a user
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if either side does not exist and
    /// [`ServiceError::Conflict`] if the user already owns the project.
    pub async fn assign_to_user(&self, project_id: Uuid, user_id: Uuid) -> ServiceResult<Project> {
        let project = Project::find_by_id(&self.db, project_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Project with ID {project_id} does not exist"))
            })?;

        if User::find_by_id(&self.db, user_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "User with ID {user_id} does not exist"
            )));
        }

        if project.user_id == user_id {
            return Err(ServiceError::Conflict(format!(
                "Project with ID {project_id} is already assigned to user with ID {user_id}"
            )));
        }

        let project = Project::set_owner(&self.db, project_id, user_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Project with ID {project_id} does not exist"))
            })?;

        info!(project_id = %project_id, user_id = %user_id, "Assigned project to user");
        Ok(project)
    }

    /// Deletes a project
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the project does not exist.
    pub async fn delete_project(&self, id: Uuid) -> ServiceResult<()> {
        if !Project::delete(&self.db, id).await? {
            return Err(ServiceError::NotFound(format!(
                "Project with ID {id} does not exist"
            )));
        }

        info!(project_id = %id, "Deleted project");
        Ok(())
    }
}

/// Parses a sort/filter field, rejecting anything outside the allow-list
fn parse_date_field(s: &str) -> ServiceResult<DateField> {
    DateField::parse(s).ok_or_else(|| {
        ServiceError::InvalidArgument(format!(
            "Invalid date field '{s}'. Use 'start_date' or 'end_date'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_field_rejects_unknown_columns() {
        assert!(parse_date_field("start_date").is_ok());
        assert!(parse_date_field("end_date").is_ok());
        assert!(matches!(
            parse_date_field("created_at"),
            Err(ServiceError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_date_field("id; DROP TABLE projects"),
            Err(ServiceError::InvalidArgument(_))
        ));
    }
}
