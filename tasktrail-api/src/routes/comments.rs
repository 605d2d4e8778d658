/// Comment management endpoints
///
/// # Endpoints
///
/// - `POST /v1/comments` - Create comment on a task
/// - `GET /v1/comments/:id` - Get comment by ID
/// - `PUT /v1/comments/:id` - Update comment (refreshes timestamp)
/// - `DELETE /v1/comments/:id` - Delete comment

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
use tasktrail_shared::models::comment::{Comment, CreateComment};
use uuid::Uuid;
use validator::Validate;

/// Create or update comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    /// Comment text
    #[validate(length(min = 1, max = 255, message = "Content must be 1-255 characters"))]
    pub content: String,

    /// Task the comment belongs to
    pub task_id: Uuid,
}

/// Delete comment response
#[derive(Debug, Serialize)]
pub struct DeleteCommentResponse {
    /// Whether the comment was deleted
    pub deleted: bool,
}

/// Create a new comment on a task
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or referenced task does not exist
pub async fn create_comment(
    State(state): State<AppState>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let comment = state
        .comments
        .create_comment(CreateComment {
            content: req.content,
            task_id: req.task_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Get a comment by ID
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Comment>> {
    let comment = state.comments.find_by_id(id).await?;
    Ok(Json(comment))
}

/// Update a comment's content and task reference
///
/// The comment's timestamp is refreshed to the time of the update.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or referenced task does not exist
/// - `404 Not Found`: Comment does not exist
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<Json<Comment>> {
    req.validate().map_err(ApiError::from_validation)?;

    let comment = state
        .comments
        .update_comment(
            id,
            CreateComment {
                content: req.content,
                task_id: req.task_id,
            },
        )
        .await?;

    Ok(Json(comment))
}

/// Delete a comment by ID
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteCommentResponse>> {
    state.comments.delete_comment(id).await?;
    Ok(Json(DeleteCommentResponse { deleted: true }))
}
