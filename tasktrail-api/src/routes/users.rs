/// User management endpoints
///
/// # Endpoints
///
/// - `POST /v1/users` - Create user
/// - `GET /v1/users` - List users
/// - `GET /v1/users/:id` - Get user by ID
/// - `GET /v1/users/name/:name` - Get user by first name
/// - `GET /v1/users/:id/projects` - List projects owned by user
/// - `DELETE /v1/users/:id` - Delete user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tasktrail_shared::models::project::Project;
use tasktrail_shared::models::user::{CreateUser, User};
use uuid::Uuid;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// First name
    #[validate(length(min = 1, max = 30, message = "Name must be 1-30 characters"))]
    pub name: String,

    /// Last name
    #[validate(length(min = 1, max = 30, message = "Surname must be 1-30 characters"))]
    pub surname: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// List users response
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    /// Users
    pub users: Vec<User>,
}

/// Projects owned by a user
#[derive(Debug, Serialize)]
pub struct UserProjectsResponse {
    /// Projects
    pub projects: Vec<Project>,
}

/// Delete user response
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    /// Whether the user was deleted
    pub deleted: bool,
}

/// Create a new user
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already in use
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = state
        .users
        .create_user(CreateUser {
            name: req.name,
            surname: req.surname,
            email: req.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let user = state.users.find_by_id(id).await?;
    Ok(Json(user))
}

/// Get a user by first name
pub async fn get_user_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<User>> {
    let user = state.users.find_by_name(&name).await?;
    Ok(Json(user))
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<UserListResponse>> {
    let users = state.users.list_users().await?;
    Ok(Json(UserListResponse { users }))
}

/// List all projects owned by a user
pub async fn get_user_projects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProjectsResponse>> {
    let projects = state.users.list_projects(id).await?;
    Ok(Json(UserProjectsResponse { projects }))
}

/// Delete a user by ID
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteUserResponse>> {
    state.users.delete_user(id).await?;
    Ok(Json(DeleteUserResponse { deleted: true }))
}
