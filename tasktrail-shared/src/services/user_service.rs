/// User business rules
///
/// Creation enforces email uniqueness up front so the conflict is reported
/// with a clear message instead of a raw constraint violation; everything
/// else is a pass-through to the model layer.

use super::{ServiceError, ServiceResult};
use crate::models::project::Project;
use crate::models::user::{CreateUser, User};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Service for user operations
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Conflict`] if the email is already in use.
    pub async fn create_user(&self, data: CreateUser) -> ServiceResult<User> {
        if User::find_by_email(&self.db, &data.email).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "User with email '{}' already exists",
                data.email
            )));
        }

        let user = User::create(&self.db, data).await?;
        info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<User> {
        User::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User with ID {id} does not exist")))
    }

    /// Finds a user by first name
    pub async fn find_by_name(&self, name: &str) -> ServiceResult<User> {
        User::find_by_name(&self.db, name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User with name '{name}' does not exist")))
    }

    /// Lists all users
    pub async fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(User::list_all(&self.db).await?)
    }

    /// Lists all projects owned by a user
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the user does not exist.
    pub async fn list_projects(&self, user_id: Uuid) -> ServiceResult<Vec<Project>> {
        if User::find_by_id(&self.db, user_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "User with ID {user_id} does not exist"
            )));
        }

        Ok(Project::list_by_user(&self.db, user_id).await?)
    }

    /// Deletes a user
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the user does not exist.
    pub async fn delete_user(&self, id: Uuid) -> ServiceResult<()> {
        if !User::delete(&self.db, id).await? {
            return Err(ServiceError::NotFound(format!(
                "User with ID {id} does not exist"
            )));
        }

        info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
