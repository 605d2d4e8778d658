/// Comment business rules
///
/// Comments must reference an existing task at creation and update time; a
/// dangling reference is treated as invalid input rather than a missing
/// resource, since the comment itself is the resource being addressed.

use super::{ServiceError, ServiceResult};
use crate::models::comment::{Comment, CreateComment};
use crate::models::task::Task;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Service for comment operations
#[derive(Clone)]
pub struct CommentService {
    db: PgPool,
}

impl CommentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a comment on a task
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] if the referenced task does
    /// not exist.
    pub async fn create_comment(&self, data: CreateComment) -> ServiceResult<Comment> {
        self.ensure_task_exists(data.task_id).await?;

        let comment = Comment::create(&self.db, data).await?;
        info!(comment_id = %comment.id, task_id = %comment.task_id, "Created comment");
        Ok(comment)
    }

    /// Updates a comment's content and task reference
    ///
    /// The creation timestamp is refreshed on update.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the comment does not exist and
    /// [`ServiceError::InvalidArgument`] if the new task reference does not.
    pub async fn update_comment(&self, id: Uuid, data: CreateComment) -> ServiceResult<Comment> {
        self.ensure_task_exists(data.task_id).await?;

        Comment::update(&self.db, id, data)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Comment with ID {id} does not exist")))
    }

    /// Finds a comment by ID
    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Comment> {
        Comment::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Comment with ID {id} does not exist")))
    }

    /// Lists all comments on a task, oldest first
    pub async fn list_by_task(&self, task_id: Uuid) -> ServiceResult<Vec<Comment>> {
        Ok(Comment::list_by_task(&self.db, task_id).await?)
    }

    /// Deletes a comment
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the comment does not exist.
    pub async fn delete_comment(&self, id: Uuid) -> ServiceResult<()> {
        if !Comment::delete(&self.db, id).await? {
            return Err(ServiceError::NotFound(format!(
                "Comment with ID {id} does not exist"
            )));
        }

        info!(comment_id = %id, "Deleted comment");
        Ok(())
    }

    async fn ensure_task_exists(&self, task_id: Uuid) -> ServiceResult<()> {
        if Task::find_by_id(&self.db, task_id).await?.is_none() {
            return Err(ServiceError::InvalidArgument(format!(
                "Task with ID {task_id} does not exist"
            )));
        }
        Ok(())
    }
}
