/// Task business rules and audit logging
///
/// Every mutating task operation appends a [`TaskHistory`] record describing
/// the change. The mutation and the history insert run in one transaction,
/// so a crash between the two writes cannot leave the audit trail out of
/// step with the data.
///
/// On deletion the history record is inserted before the task row is
/// removed: the foreign key must still be valid at insert time, and the
/// database then clears it via ON DELETE SET NULL.
///
/// There is no enforced status transition graph; any status may move to any
/// other by explicit request.

use super::{ServiceError, ServiceResult};
use crate::models::project::Project;
use crate::models::task::{CreateTask, Task, TaskStatus};
use crate::models::task_history::TaskHistory;
use crate::models::DateField;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Service for task operations with automatic history logging
#[derive(Clone)]
pub struct TaskService {
    db: PgPool,
}

/// History record template for task creation
fn created_description(title: &str) -> String {
    format!("New task '{title}' has been created.")
}

/// History record template for task deletion
fn deleted_description(title: &str) -> String {
    format!("Task '{title}' has been deleted.")
}

/// History record template for a status change
fn status_changed_description(title: &str, old: TaskStatus, new: TaskStatus) -> String {
    format!(
        "Task '{title}' status changed from '{}' to '{}'.",
        old.as_str(),
        new.as_str()
    )
}

impl TaskService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a task and logs it in the task history
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the referenced project does not
    /// exist; nothing is persisted in that case.
    pub async fn create_task(&self, data: CreateTask) -> ServiceResult<Task> {
        if Project::find_by_id(&self.db, data.project_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Project with ID {} does not exist",
                data.project_id
            )));
        }

        let mut tx = self.db.begin().await?;
        let task = Task::create(&mut *tx, data).await?;
        TaskHistory::record(&mut *tx, &created_description(&task.title), task.id).await?;
        tx.commit().await?;

        info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    /// Deletes a task and logs the deletion
    ///
    /// The history record is inserted before the task row is removed so the
    /// foreign key is still valid at insert time.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the task does not exist.
    pub async fn delete_task(&self, id: Uuid) -> ServiceResult<()> {
        let task = Task::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Task with ID {id} does not exist")))?;

        let mut tx = self.db.begin().await?;
        TaskHistory::record(&mut *tx, &deleted_description(&task.title), task.id).await?;
        Task::delete(&mut *tx, id).await?;
        tx.commit().await?;

        info!(task_id = %id, "Deleted task");
        Ok(())
    }

    /// Changes a task's status and logs the change
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the task does not exist.
    pub async fn change_status(&self, id: Uuid, new_status: TaskStatus) -> ServiceResult<Task> {
        let task = Task::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Task with ID {id} does not exist")))?;

        let old_status = task.status;

        let mut tx = self.db.begin().await?;
        let task = Task::update_status(&mut *tx, id, new_status)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Task with ID {id} does not exist")))?;
        TaskHistory::record(
            &mut *tx,
            &status_changed_description(&task.title, old_status, new_status),
            task.id,
        )
        .await?;
        tx.commit().await?;

        info!(task_id = %id, old = old_status.as_str(), new = new_status.as_str(), "Changed task status");
        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Task> {
        Task::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Task with ID {id} does not exist")))
    }

    /// Finds a task by title
    pub async fn find_by_title(&self, title: &str) -> ServiceResult<Task> {
        Task::find_by_title(&self.db, title).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Task with title '{title}' does not exist"))
        })
    }

    /// Lists all tasks
    pub async fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(Task::list_all(&self.db).await?)
    }

    /// Lists all tasks in a project
    pub async fn list_by_project(&self, project_id: Uuid) -> ServiceResult<Vec<Task>> {
        Ok(Task::list_by_project(&self.db, project_id).await?)
    }

    /// Lists all tasks with a given status
    pub async fn list_by_status(&self, status: TaskStatus) -> ServiceResult<Vec<Task>> {
        Ok(Task::list_by_status(&self.db, status).await?)
    }

    /// Lists all tasks sorted by a date field
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] if `sort_by` is not
    /// `start_date` or `end_date`.
    pub async fn list_sorted(&self, sort_by: &str, descending: bool) -> ServiceResult<Vec<Task>> {
        let field = DateField::parse(sort_by).ok_or_else(|| {
            ServiceError::InvalidArgument(format!(
                "Invalid date field '{sort_by}'. Use 'start_date' or 'end_date'"
            ))
        })?;
        Ok(Task::list_sorted(&self.db, field, descending).await?)
    }

    /// Lists the audit history of a task, oldest first
    pub async fn history(&self, task_id: Uuid) -> ServiceResult<Vec<TaskHistory>> {
        Ok(TaskHistory::list_by_task(&self.db, task_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_description_template() {
        assert_eq!(
            created_description("Ship release"),
            "New task 'Ship release' has been created."
        );
    }

    #[test]
    fn test_deleted_description_template() {
        assert_eq!(
            deleted_description("Ship release"),
            "Task 'Ship release' has been deleted."
        );
    }

    #[test]
    fn test_status_changed_description_template() {
        assert_eq!(
            status_changed_description("Ship release", TaskStatus::ToDo, TaskStatus::InProgress),
            "Task 'Ship release' status changed from 'TO_DO' to 'IN_PROGRESS'."
        );
    }
}
