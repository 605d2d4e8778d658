/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User management endpoints
/// - `projects`: Project management endpoints
/// - `tasks`: Task management endpoints (with audit trail)
/// - `comments`: Comment management endpoints

pub mod comments;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
