#![allow(dead_code)]

//! Common test utilities for integration tests
//!
//! Provides shared infrastructure:
//! - Test application setup (with and without a live database)
//! - Request helpers returning status + parsed JSON body
//! - Fixture creation for users, projects and tasks

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use tasktrail_api::app::{build_router, AppState};
use tasktrail_api::config::{ApiConfig, Config, DatabaseConfig};
use tower::ServiceExt;
use uuid::Uuid;

/// Test context holding the app and its database pool
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

fn test_config(url: &str) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: url.to_string(),
            max_connections: 5,
        },
    }
}

impl TestContext {
    /// Creates a test context backed by a real database
    ///
    /// Connects to `DATABASE_URL` and runs migrations. Tests using this
    /// require a running Postgres.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL")?;

        let db = PgPool::connect(&url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../tasktrail-shared/migrations").run(&db).await?;

        let state = AppState::new(db.clone(), test_config(&url));
        let app = build_router(state);

        Ok(Self { db, app })
    }

    /// Creates a test context with a lazy pool that never connects
    ///
    /// Suitable for exercising request validation paths, which reject the
    /// request before any query is issued.
    pub fn lazy() -> Self {
        let url = "postgresql://localhost/tasktrail_unreachable";
        let db = PgPool::connect_lazy(url).expect("lazy pool");
        let state = AppState::new(db.clone(), test_config(url));
        let app = build_router(state);
        Self { db, app }
    }

    /// Sends a request with an optional JSON body, returning status and
    /// parsed response body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let request = builder.body(body).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

/// Creates a user with a unique email, returning its ID
pub async fn create_test_user(ctx: &TestContext) -> Uuid {
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/users",
            Some(json!({
                "name": "Test",
                "surname": "User",
                "email": format!("test-{}@example.com", Uuid::new_v4()),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "user fixture: {body}");
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Creates a project owned by the given user, returning its ID
pub async fn create_test_project(ctx: &TestContext, user_id: Uuid, start_date: &str) -> Uuid {
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/projects",
            Some(json!({
                "name": "Test project",
                "description": "A project used by the integration tests",
                "start_date": start_date,
                "status": "PLANNED",
                "user_id": user_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "project fixture: {body}");
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Creates a task in the given project, returning its ID
pub async fn create_test_task(ctx: &TestContext, project_id: Uuid, title: &str) -> Uuid {
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({
                "title": title,
                "description": "A task used by the integration tests",
                "status": "TO_DO",
                "project_id": project_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "task fixture: {body}");
    body["id"].as_str().unwrap().parse().unwrap()
}
