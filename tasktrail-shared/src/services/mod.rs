/// Business-rule services on top of the models
///
/// Services are plain structs holding a `PgPool`. They are constructed once
/// at process start and handed to the HTTP layer by value (the pool is
/// reference-counted, so cloning a service is cheap). Domain failures are
/// reported through [`ServiceError`]; the HTTP layer maps them to status
/// codes.

pub mod comment_service;
pub mod project_service;
pub mod task_service;
pub mod user_service;

pub use comment_service::CommentService;
pub use project_service::ProjectService;
pub use task_service::TaskService;
pub use user_service::UserService;

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Domain-level error raised by the service layer
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Entity (or a referenced entity) does not exist
    #[error("{0}")]
    NotFound(String),

    /// Malformed or out-of-range input
    #[error("{0}")]
    InvalidArgument(String),

    /// Uniqueness or duplicate-assignment violation
    #[error("{0}")]
    Conflict(String),

    /// Persistence failure surfaced unchanged
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
