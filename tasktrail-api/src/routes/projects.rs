/// Project management endpoints
///
/// # Endpoints
///
/// - `POST /v1/projects` - Create project
/// - `GET /v1/projects` - List projects
/// - `GET /v1/projects/sorted?sort_by=&descending=` - List sorted by date field
/// - `GET /v1/projects/filtered?filter_by=&date=` - List filtered by exact date
/// - `GET /v1/projects/:id` - Get project by ID
/// - `GET /v1/projects/name/:name` - Get project by name
/// - `GET /v1/projects/:id/tasks` - List tasks in project
/// - `PUT /v1/projects/:id/owner/:user_id` - Reassign project owner
/// - `DELETE /v1/projects/:id` - Delete project
///
/// Project status strings are matched case-sensitively against the symbolic
/// names (`PLANNED`, `IN_PROGRESS`, ...). Task status parsing is
/// case-insensitive; the asymmetry is deliberate and documented.

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
use tasktrail_shared::models::project::{CreateProject, Project, ProjectStatus};
use tasktrail_shared::models::task::Task;
use uuid::Uuid;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 30, message = "Name must be 1-30 characters"))]
    pub name: String,

    /// Project description
    #[validate(length(min = 1, max = 255, message = "Description must be 1-255 characters"))]
    pub description: String,

    /// Start date (YYYY-MM-DD)
    pub start_date: NaiveDate,

    /// Optional end date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,

    /// Status (symbolic name, case-sensitive)
    pub status: String,

    /// Owning user ID
    pub user_id: Uuid,
}

/// Query parameters for the sorted listing
#[derive(Debug, Deserialize)]
pub struct SortQuery {
    /// Date field to sort by (default: start_date)
    pub sort_by: Option<String>,

    /// Sort descending (default: false)
    pub descending: Option<bool>,
}

/// Query parameters for the date-filtered listing
#[derive(Debug, Deserialize)]
pub struct DateFilterQuery {
    /// Date field to filter on (default: start_date)
    pub filter_by: Option<String>,

    /// Exact date to match (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// List projects response
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    /// Projects
    pub projects: Vec<Project>,
}

/// Tasks in a project
#[derive(Debug, Serialize)]
pub struct ProjectTasksResponse {
    /// Tasks
    pub tasks: Vec<Task>,
}

/// Delete project response
#[derive(Debug, Serialize)]
pub struct DeleteProjectResponse {
    /// Whether the project was deleted
    pub deleted: bool,
}

/// Create a new project
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or status string invalid
/// - `404 Not Found`: Owning user does not exist
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate().map_err(ApiError::from_validation)?;

    // Case-sensitive on purpose: "planned" is rejected, "PLANNED" accepted.
    let status = ProjectStatus::parse_strict(&req.status)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid status value: {}", req.status)))?;

    let project = state
        .projects
        .create_project(CreateProject {
            name: req.name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            status,
            user_id: req.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Get a project by ID
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = state.projects.find_by_id(id).await?;
    Ok(Json(project))
}

/// Get a project by name
pub async fn get_project_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Project>> {
    let project = state.projects.find_by_name(&name).await?;
    Ok(Json(project))
}

/// List all projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<ProjectListResponse>> {
    let projects = state.projects.list_projects().await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// List all projects sorted by a date field
///
/// # Errors
///
/// - `400 Bad Request`: `sort_by` outside {start_date, end_date}
pub async fn list_projects_sorted(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<ProjectListResponse>> {
    let sort_by = query.sort_by.as_deref().unwrap_or("start_date");
    let projects = state
        .projects
        .list_sorted(sort_by, query.descending.unwrap_or(false))
        .await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// List projects whose date field equals the given date
///
/// # Errors
///
/// - `400 Bad Request`: `filter_by` outside {start_date, end_date}
pub async fn list_projects_filtered(
    State(state): State<AppState>,
    Query(query): Query<DateFilterQuery>,
) -> ApiResult<Json<ProjectListResponse>> {
    let filter_by = query.filter_by.as_deref().unwrap_or("start_date");
    let projects = state
        .projects
        .list_filtered_by_date(filter_by, query.date)
        .await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// List all tasks in a project
pub async fn get_project_tasks(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProjectTasksResponse>> {
    // 404 for an unknown project rather than an empty list
    state.projects.find_by_id(id).await?;
    let tasks = state.tasks.list_by_project(id).await?;
    Ok(Json(ProjectTasksResponse { tasks }))
}

/// Reassign a project to a different owner
///
/// # Errors
///
/// - `404 Not Found`: Project or user does not exist
/// - `409 Conflict`: User already owns the project
pub async fn assign_project(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Project>> {
    let project = state.projects.assign_to_user(id, user_id).await?;
    Ok(Json(project))
}

/// Delete a project by ID
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteProjectResponse>> {
    state.projects.delete_project(id).await?;
    Ok(Json(DeleteProjectResponse { deleted: true }))
}
