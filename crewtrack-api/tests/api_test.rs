//! Integration tests for the CrewTrack API
//!
//! These tests drive the full router against a real database:
//! - CRUD round-trips for users, tasks, and events
//! - Required-field validation (400)
//! - The tech-lead role gates (403) and the DEV mark-DONE exception
//! - Not-found mapping for updates/deletes on missing ids (404)
//!
//! Each test skips itself when `DATABASE_URL` is unset.

mod common;

use axum::http::StatusCode;
use common::{get_request, json_request, send};
use crewtrack_shared::models::event::Event;
use crewtrack_shared::models::task::{CreateTask, Task, TaskStatus};
use crewtrack_shared::models::user::User;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_health_check() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let (status, body) = send(&ctx, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_user_defaults_to_dev() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let email = format!("ann-{}@example.com", Uuid::new_v4());
    let (status, body) = send(
        &ctx,
        json_request("POST", "/users", json!({"name": "Ann", "email": email})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "DEV");
    let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    User::delete(&ctx.db, id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let (status, body) = send(
        &ctx,
        json_request("POST", "/users", json!({"name": "No Email"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let (status, body) = send(
        &ctx,
        json_request(
            "POST",
            "/users",
            json!({"name": "Copycat", "email": ctx.lead.email}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_update_user_requires_tech_lead() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    // DEV actor is rejected and nothing changes
    let (status, _) = send(
        &ctx,
        json_request(
            "PUT",
            "/users",
            json!({"id": ctx.dev.id, "name": "Renamed", "userId": ctx.dev.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let unchanged = User::find_by_id(&ctx.db, ctx.dev.id).await.unwrap().unwrap();
    assert_eq!(unchanged.name, "Test Dev");

    // Tech lead succeeds; omitted fields are untouched
    let (status, body) = send(
        &ctx,
        json_request(
            "PUT",
            "/users",
            json!({"id": ctx.dev.id, "name": "Renamed", "userId": ctx.lead.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["email"], ctx.dev.email);
    assert_eq!(body["role"], "DEV");

    // Missing id
    let (status, _) = send(
        &ctx,
        json_request("PUT", "/users", json!({"name": "X", "userId": ctx.lead.id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown id
    let (status, _) = send(
        &ctx,
        json_request(
            "PUT",
            "/users",
            json!({"id": Uuid::new_v4(), "name": "X", "userId": ctx.lead.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_delete_user_gates_and_validation() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    // Missing userId
    let (status, _) = send(
        &ctx,
        json_request("DELETE", "/users", json!({"id": ctx.dev.id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // DEV actor is rejected and the user survives
    let (status, _) = send(
        &ctx,
        json_request(
            "DELETE",
            "/users",
            json!({"id": ctx.dev.id, "userId": ctx.dev.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(User::find_by_id(&ctx.db, ctx.dev.id).await.unwrap().is_some());

    // Tech lead succeeds
    let (status, body) = send(
        &ctx,
        json_request(
            "DELETE",
            "/users",
            json!({"id": ctx.dev.id, "userId": ctx.lead.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert!(User::find_by_id(&ctx.db, ctx.dev.id).await.unwrap().is_none());

    // Deleting again reports not found
    let (status, _) = send(
        &ctx,
        json_request(
            "DELETE",
            "/users",
            json!({"id": ctx.dev.id, "userId": ctx.lead.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// The end-to-end scenario from the tracker's intended use: create a
/// user, give them a task, and see the task come back with its owner
/// embedded.
#[tokio::test]
async fn test_task_listing_embeds_owner() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let email = format!("ann-{}@example.com", Uuid::new_v4());
    let (status, user_body) = send(
        &ctx,
        json_request("POST", "/users", json!({"name": "Ann", "email": email})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user_body["role"], "DEV");
    let ann_id: Uuid = user_body["id"].as_str().unwrap().parse().unwrap();

    let (status, task_body) = send(
        &ctx,
        json_request(
            "POST",
            "/tasks",
            json!({
                "title": "T1",
                "description": "d",
                "status": "IN_PROGRESS",
                "userId": ann_id,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task_body["title"], "T1");
    assert_eq!(task_body["status"], "IN_PROGRESS");
    assert_eq!(task_body["userId"], user_body["id"]);

    let (status, list) = send(&ctx, get_request("/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    let entry = list
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == task_body["id"])
        .expect("created task missing from listing");
    assert_eq!(entry["user"]["name"], "Ann");

    // Cascades to the task
    User::delete(&ctx.db, ann_id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_task_missing_fields() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let (status, body) = send(
        &ctx,
        json_request(
            "POST",
            "/tasks",
            json!({"title": "No owner", "description": "d", "status": "TODO"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_task_unknown_owner() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let (status, _) = send(
        &ctx,
        json_request(
            "POST",
            "/tasks",
            json!({
                "title": "Orphan",
                "description": "d",
                "status": "TODO",
                "userId": Uuid::new_v4(),
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_task_update_role_gates() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let task = Task::create(
        &ctx.db,
        CreateTask {
            title: "T1".to_string(),
            description: "d".to_string(),
            status: TaskStatus::InProgress,
            user_id: ctx.dev.id,
        },
    )
    .await
    .unwrap();

    // A dev changing anything but status-to-DONE is rejected
    let (status, _) = send(
        &ctx,
        json_request(
            "PUT",
            "/tasks",
            json!({"id": task.id, "title": "new", "userId": ctx.dev.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let unchanged = Task::find_by_id(&ctx.db, task.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "T1");

    // A dev may mark the task DONE; nothing else changes
    let (status, body) = send(
        &ctx,
        json_request(
            "PUT",
            "/tasks",
            json!({"id": task.id, "status": "DONE", "userId": ctx.dev.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "DONE");
    assert_eq!(body["title"], "T1");
    assert_eq!(body["description"], "d");

    // A tech lead may change any field
    let (status, body) = send(
        &ctx,
        json_request(
            "PUT",
            "/tasks",
            json!({
                "id": task.id,
                "title": "Renamed",
                "dueDate": "2025-07-01T00:00:00Z",
                "userId": ctx.lead.id,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["dueDate"], "2025-07-01T00:00:00Z");
    assert_eq!(body["status"], "DONE");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_task_delete_role_gate() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let task = Task::create(
        &ctx.db,
        CreateTask {
            title: "Doomed".to_string(),
            description: "d".to_string(),
            status: TaskStatus::Todo,
            user_id: ctx.dev.id,
        },
    )
    .await
    .unwrap();

    let (status, _) = send(
        &ctx,
        json_request(
            "DELETE",
            "/tasks",
            json!({"id": task.id, "userId": ctx.dev.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(Task::find_by_id(&ctx.db, task.id).await.unwrap().is_some());

    let (status, body) = send(
        &ctx,
        json_request(
            "DELETE",
            "/tasks",
            json!({"id": task.id, "userId": ctx.lead.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(
        &ctx,
        json_request(
            "DELETE",
            "/tasks",
            json!({"id": task.id, "userId": ctx.lead.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_event_lifecycle() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    // Creation without an acting user is open
    let (status, body) = send(
        &ctx,
        json_request(
            "POST",
            "/events",
            json!({
                "title": "Weekly Planning Session",
                "description": "Zoom sync with team",
                "startTime": "2025-06-24T10:00:00Z",
                "endTime": "2025-06-24T11:00:00Z",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Weekly Planning Session");
    assert_eq!(body["startTime"], "2025-06-24T10:00:00Z");
    let event_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    let (status, list) = send(&ctx, get_request("/events")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["id"] == body["id"]));

    // A dev acting user is rejected on update
    let (status, _) = send(
        &ctx,
        json_request(
            "PUT",
            "/events",
            json!({"id": event_id, "title": "Hijacked", "userId": ctx.dev.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A tech lead updates; omitted fields are untouched
    let (status, updated) = send(
        &ctx,
        json_request(
            "PUT",
            "/events",
            json!({"id": event_id, "title": "Moved Planning", "userId": ctx.lead.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Moved Planning");
    assert_eq!(updated["description"], "Zoom sync with team");
    assert_eq!(updated["endTime"], "2025-06-24T11:00:00Z");

    // Delete requires both fields, then the role
    let (status, _) = send(
        &ctx,
        json_request("DELETE", "/events", json!({"id": event_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &ctx,
        json_request(
            "DELETE",
            "/events",
            json!({"id": event_id, "userId": ctx.lead.id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(Event::find_by_id(&ctx.db, event_id).await.unwrap().is_none());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_event_missing_fields() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let (status, body) = send(
        &ctx,
        json_request(
            "POST",
            "/events",
            json!({"title": "No times", "description": "d"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_event_rejects_dev_actor() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let (status, _) = send(
        &ctx,
        json_request(
            "POST",
            "/events",
            json!({
                "title": "Retro",
                "startTime": "2025-06-25T10:00:00Z",
                "endTime": "2025-06-25T11:00:00Z",
                "userId": ctx.dev.id,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_users() {
    let Some(ctx) = common::setup().await else {
        return;
    };

    let (status, body) = send(&ctx, get_request("/users")).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    let lead_id = ctx.lead.id.to_string();
    let dev_id = ctx.dev.id.to_string();
    assert!(users.iter().any(|u| u["id"] == lead_id));
    assert!(users.iter().any(|u| u["id"] == dev_id));

    ctx.cleanup().await.unwrap();
}
