/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasktrail_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tasktrail_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tasktrail_shared::services::{CommentService, ProjectService, TaskService, UserService};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Services are constructed once here and handed to handlers via Axum's
/// `State` extractor; nothing in the process is a global. Cloning is cheap:
/// every field is a handle around reference-counted internals.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// User business logic
    pub users: UserService,

    /// Project business logic
    pub projects: ProjectService,

    /// Task business logic (with audit-trail side effects)
    pub tasks: TaskService,

    /// Comment business logic
    pub comments: CommentService,
}

impl AppState {
    /// Creates new application state, wiring services to the pool
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            users: UserService::new(db.clone()),
            projects: ProjectService::new(db.clone()),
            tasks: TaskService::new(db.clone()),
            comments: CommentService::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// └── /v1/
///     ├── /users                       # POST create, GET list
///     │   ├── /:id                     # GET, DELETE
///     │   ├── /:id/projects            # GET owned projects
///     │   └── /name/:name              # GET by first name
///     ├── /projects                    # POST create, GET list
///     │   ├── /sorted                  # GET ?sort_by=&descending=
///     │   ├── /filtered                # GET ?filter_by=&date=
///     │   ├── /:id                     # GET, DELETE
///     │   ├── /:id/tasks               # GET tasks in project
///     │   ├── /:id/owner/:user_id      # PUT reassign owner
///     │   └── /name/:name              # GET by name
///     ├── /tasks                       # POST create, GET list
///     │   ├── /sorted                  # GET ?sort_by=&descending=
///     │   ├── /status/:status          # GET filter by status
///     │   ├── /:id                     # GET, DELETE
///     │   ├── /:id/status              # PUT change status
///     │   ├── /:id/history             # GET audit trail
///     │   ├── /:id/comments            # GET comments
///     │   └── /title/:title            # GET by title
///     └── /comments                    # POST create
///         └── /:id                     # GET, PUT, DELETE
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/", post(routes::users::create_user).get(routes::users::list_users))
        .route(
            "/:id",
            get(routes::users::get_user).delete(routes::users::delete_user),
        )
        .route("/:id/projects", get(routes::users::get_user_projects))
        .route("/name/:name", get(routes::users::get_user_by_name));

    let project_routes = Router::new()
        .route(
            "/",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route("/sorted", get(routes::projects::list_projects_sorted))
        .route("/filtered", get(routes::projects::list_projects_filtered))
        .route(
            "/:id",
            get(routes::projects::get_project).delete(routes::projects::delete_project),
        )
        .route("/:id/tasks", get(routes::projects::get_project_tasks))
        .route("/:id/owner/:user_id", put(routes::projects::assign_project))
        .route("/name/:name", get(routes::projects::get_project_by_name));

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task).get(routes::tasks::list_tasks))
        .route("/sorted", get(routes::tasks::list_tasks_sorted))
        .route("/status/:status", get(routes::tasks::list_tasks_by_status))
        .route(
            "/:id",
            get(routes::tasks::get_task).delete(routes::tasks::delete_task),
        )
        .route("/:id/status", put(routes::tasks::change_task_status))
        .route("/:id/history", get(routes::tasks::get_task_history))
        .route("/:id/comments", get(routes::tasks::get_task_comments))
        .route("/title/:title", get(routes::tasks::get_task_by_title));

    let comment_routes = Router::new()
        .route("/", post(routes::comments::create_comment))
        .route(
            "/:id",
            get(routes::comments::get_comment)
                .put(routes::comments::update_comment)
                .delete(routes::comments::delete_comment),
        );

    let v1_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/comments", comment_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
