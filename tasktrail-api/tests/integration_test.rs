/// Integration tests for the TaskTrail API
///
/// These tests verify the full system end-to-end against a real database:
/// - Task lifecycle and its audit trail
/// - Referential checks on create
/// - Sorting and filtering
/// - Uniqueness conflicts
///
/// They require a running Postgres, so they are ignored by default:
///
/// ```bash
/// DATABASE_URL=postgresql://localhost/tasktrail_test cargo test -- --ignored
/// ```

mod common;

use axum::http::StatusCode;
use common::{create_test_project, create_test_task, create_test_user, TestContext};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_create_task_with_missing_project_persists_nothing() {
    let ctx = TestContext::new().await.unwrap();

    let missing_project = Uuid::new_v4();
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({
                "title": "Orphan task",
                "status": "TO_DO",
                "project_id": missing_project,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    assert_eq!(body["error"], "not_found");

    // Neither the task nor a history record may exist.
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE title = 'Orphan task'")
            .fetch_one(&ctx.db)
            .await
            .unwrap();
    assert_eq!(count, 0);

    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM task_history WHERE change_description LIKE '%Orphan task%'",
    )
    .fetch_one(&ctx.db)
    .await
    .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_task_lifecycle_writes_audit_trail() {
    let ctx = TestContext::new().await.unwrap();

    let user_id = create_test_user(&ctx).await;
    let project_id = create_test_project(&ctx, user_id, "2024-03-01").await;
    let title = format!("Lifecycle task {}", Uuid::new_v4());
    let task_id = create_test_task(&ctx, project_id, &title).await;

    // Creation appended exactly one history record with the template text.
    let (status, body) = ctx
        .request("GET", &format!("/v1/tasks/{task_id}/history"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0]["change_description"],
        format!("New task '{title}' has been created.")
    );

    // Status change appends a second record naming both statuses.
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/v1/tasks/{task_id}/status"),
            Some(json!({"status": "in_progress"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "IN_PROGRESS");

    let (_, body) = ctx
        .request("GET", &format!("/v1/tasks/{task_id}/history"), None)
        .await;
    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(
        history[1]["change_description"],
        format!("Task '{title}' status changed from 'TO_DO' to 'IN_PROGRESS'.")
    );

    // Deletion appends a final record, then removes the task.
    let (status, _) = ctx
        .request("DELETE", &format!("/v1/tasks/{task_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .request("GET", &format!("/v1/tasks/{task_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The audit trail survives the task; the store nulls the reference.
    let rows: Vec<(String, Option<Uuid>)> = sqlx::query_as(
        "SELECT change_description, task_id FROM task_history WHERE change_description LIKE $1 ORDER BY change_date ASC",
    )
    .bind(format!("%'{title}'%"))
    .fetch_all(&ctx.db)
    .await
    .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].0, format!("Task '{title}' has been deleted."));
    for (_, task_ref) in &rows {
        assert_eq!(*task_ref, None);
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_project_sorting_ascending_descending_reversed() {
    let ctx = TestContext::new().await.unwrap();

    let user_id = create_test_user(&ctx).await;
    let early = create_test_project(&ctx, user_id, "2023-01-15").await;
    let middle = create_test_project(&ctx, user_id, "2023-06-15").await;
    let late = create_test_project(&ctx, user_id, "2023-11-15").await;
    let ours = [early, middle, late];

    let order_of = |body: &serde_json::Value| -> Vec<Uuid> {
        body["projects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().parse().unwrap())
            .filter(|id| ours.contains(id))
            .collect()
    };

    let (status, body) = ctx
        .request("GET", "/v1/projects/sorted?sort_by=start_date", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let ascending = order_of(&body);
    assert_eq!(ascending, vec![early, middle, late]);

    let (status, body) = ctx
        .request(
            "GET",
            "/v1/projects/sorted?sort_by=start_date&descending=true",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let descending = order_of(&body);
    assert_eq!(descending, vec![late, middle, early]);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_duplicate_email_is_a_conflict() {
    let ctx = TestContext::new().await.unwrap();

    let email = format!("duplicate-{}@example.com", Uuid::new_v4());
    let payload = json!({
        "name": "Jan",
        "surname": "Kowalski",
        "email": email,
    });

    let (status, _) = ctx.request("POST", "/v1/users", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx.request("POST", "/v1/users", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    // The second attempt left the table unchanged.
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_task_status_is_case_normalized() {
    let ctx = TestContext::new().await.unwrap();

    let user_id = create_test_user(&ctx).await;
    let project_id = create_test_project(&ctx, user_id, "2024-03-01").await;

    // Lowercase "to_do" is normalized to TO_DO and accepted.
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({
                "title": "Case-normalized task",
                "status": "to_do",
                "project_id": project_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["status"], "TO_DO");
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_duplicate_project_assignment_is_a_conflict() {
    let ctx = TestContext::new().await.unwrap();

    let owner = create_test_user(&ctx).await;
    let other = create_test_user(&ctx).await;
    let project_id = create_test_project(&ctx, owner, "2024-03-01").await;

    // Assigning to the current owner is rejected.
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/v1/projects/{project_id}/owner/{owner}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // Reassigning to someone else succeeds.
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/v1/projects/{project_id}/owner/{other}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], other.to_string());
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_comment_requires_existing_task() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .request(
            "POST",
            "/v1/comments",
            Some(json!({
                "content": "Comment on nothing",
                "task_id": Uuid::new_v4(),
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn test_comment_lifecycle() {
    let ctx = TestContext::new().await.unwrap();

    let user_id = create_test_user(&ctx).await;
    let project_id = create_test_project(&ctx, user_id, "2024-03-01").await;
    let task_id = create_test_task(&ctx, project_id, "Commented task").await;

    let (status, body) = ctx
        .request(
            "POST",
            "/v1/comments",
            Some(json!({"content": "First!", "task_id": task_id})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let comment_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/v1/comments/{comment_id}"),
            Some(json!({"content": "Edited", "task_id": task_id})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Edited");

    let (status, body) = ctx
        .request("GET", &format!("/v1/tasks/{task_id}/comments"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);

    let (status, _) = ctx
        .request("DELETE", &format!("/v1/comments/{comment_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .request("GET", &format!("/v1/comments/{comment_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
