/// Task management endpoints
///
/// Every mutating endpoint leaves an audit record in the task history; the
/// service layer writes the mutation and the history row in one transaction.
///
/// # Endpoints
///
/// - `POST /v1/tasks` - Create task
/// - `GET /v1/tasks` - List tasks
/// - `GET /v1/tasks/sorted?sort_by=&descending=` - List sorted by date field
/// - `GET /v1/tasks/status/:status` - List tasks by status
/// - `GET /v1/tasks/:id` - Get task by ID
/// - `GET /v1/tasks/title/:title` - Get task by title
/// - `PUT /v1/tasks/:id/status` - Change task status
/// - `GET /v1/tasks/:id/history` - List audit history
/// - `GET /v1/tasks/:id/comments` - List comments
/// - `DELETE /v1/tasks/:id` - Delete task (history survives)
///
/// Task status strings are upper-cased before matching, so `"to_do"` and
/// `"TO_DO"` are both accepted. Project status parsing is case-sensitive;
/// the asymmetry is deliberate and documented.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tasktrail_shared::models::comment::Comment;
use tasktrail_shared::models::task::{CreateTask, Task, TaskStatus};
use tasktrail_shared::models::task_history::TaskHistory;
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Optional description
    #[validate(length(min = 1, max = 255, message = "Description must be 1-255 characters"))]
    pub description: Option<String>,

    /// Optional start date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,

    /// Optional end date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,

    /// Status (matched case-insensitively)
    pub status: String,

    /// Project the task belongs to
    pub project_id: Uuid,
}

/// Change task status request
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// New status (matched case-insensitively)
    pub status: String,
}

/// Query parameters for the sorted listing
#[derive(Debug, Deserialize)]
pub struct SortQuery {
    /// Date field to sort by (default: start_date)
    pub sort_by: Option<String>,

    /// Sort descending (default: false)
    pub descending: Option<bool>,
}

/// List tasks response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// Tasks
    pub tasks: Vec<Task>,
}

/// Task audit history response
#[derive(Debug, Serialize)]
pub struct TaskHistoryResponse {
    /// History records, oldest first
    pub history: Vec<TaskHistory>,
}

/// Comments on a task
#[derive(Debug, Serialize)]
pub struct TaskCommentsResponse {
    /// Comments, oldest first
    pub comments: Vec<Comment>,
}

/// Delete task response
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    /// Whether the task was deleted
    pub deleted: bool,
}

/// Parses a task status string, upper-casing it first
fn parse_task_status(s: &str) -> ApiResult<TaskStatus> {
    TaskStatus::parse(s).ok_or_else(|| ApiError::BadRequest(format!("Invalid status value: {s}")))
}

/// Create a new task
///
/// Appends a `New task '<title>' has been created.` history record in the
/// same transaction as the insert.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or status string invalid
/// - `404 Not Found`: Referenced project does not exist (nothing persisted)
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let status = parse_task_status(&req.status)?;

    let task = state
        .tasks
        .create_task(CreateTask {
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            status,
            project_id: req.project_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.find_by_id(id).await?;
    Ok(Json(task))
}

/// Get a task by title
pub async fn get_task_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.find_by_title(&title).await?;
    Ok(Json(task))
}

/// List all tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<TaskListResponse>> {
    let tasks = state.tasks.list_tasks().await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// List all tasks sorted by a date field
///
/// # Errors
///
/// - `400 Bad Request`: `sort_by` outside {start_date, end_date}
pub async fn list_tasks_sorted(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let sort_by = query.sort_by.as_deref().unwrap_or("start_date");
    let tasks = state
        .tasks
        .list_sorted(sort_by, query.descending.unwrap_or(false))
        .await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// List all tasks with the given status
///
/// # Errors
///
/// - `400 Bad Request`: Status string invalid
pub async fn list_tasks_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> ApiResult<Json<TaskListResponse>> {
    let status = parse_task_status(&status)?;
    let tasks = state.tasks.list_by_status(status).await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// Change a task's status
///
/// Appends a `Task '<title>' status changed from '<OLD>' to '<NEW>'.`
/// history record in the same transaction as the update.
///
/// # Errors
///
/// - `400 Bad Request`: Status string invalid
/// - `404 Not Found`: Task does not exist
pub async fn change_task_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeStatusRequest>,
) -> ApiResult<Json<Task>> {
    let status = parse_task_status(&req.status)?;
    let task = state.tasks.change_status(id, status).await?;
    Ok(Json(task))
}

/// List the audit history of a task, oldest first
///
/// Works for deleted tasks too: the records survive deletion, but their
/// task reference is nulled out by the store, so look them up before the
/// task is gone to see them grouped here.
pub async fn get_task_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskHistoryResponse>> {
    let history = state.tasks.history(id).await?;
    Ok(Json(TaskHistoryResponse { history }))
}

/// List all comments on a task, oldest first
pub async fn get_task_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskCommentsResponse>> {
    let comments = state.comments.list_by_task(id).await?;
    Ok(Json(TaskCommentsResponse { comments }))
}

/// Delete a task by ID
///
/// Appends a `Task '<title>' has been deleted.` history record before the
/// row is removed, in the same transaction.
///
/// # Errors
///
/// - `404 Not Found`: Task does not exist
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    state.tasks.delete_task(id).await?;
    Ok(Json(DeleteTaskResponse { deleted: true }))
}
