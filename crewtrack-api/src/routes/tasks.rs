//! Task endpoints
//!
//! # Endpoints
//!
//! - `GET /tasks` - List all tasks with their owning user embedded
//! - `POST /tasks` - Create a task (the body `userId` is the owner, not
//!   an acting user, so no role check runs here)
//! - `PUT /tasks` - Update a task; non-leads may only mark it `DONE`
//! - `DELETE /tasks` - Delete a task (tech leads only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use crewtrack_shared::{
    auth,
    models::task::{CreateTask, Task, TaskStatus, TaskWithOwner, UpdateTask},
};
use serde::Deserialize;
use uuid::Uuid;

/// Create task request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Short title (required)
    pub title: Option<String>,

    /// Description (required)
    pub description: Option<String>,

    /// Initial status (required)
    pub status: Option<TaskStatus>,

    /// Owning user (required; must reference an existing user)
    pub user_id: Option<Uuid>,
}

/// Update task request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// Record to update (required)
    pub id: Option<Uuid>,

    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,

    /// Acting user for the role check
    pub user_id: Option<Uuid>,
}

/// Delete task request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskRequest {
    /// Record to delete (required)
    pub id: Option<Uuid>,

    /// Acting user for the role check (required)
    pub user_id: Option<Uuid>,
}

/// The one change a non-lead is allowed to make: setting the status to
/// `DONE`, and nothing else.
fn is_done_only_change(req: &UpdateTaskRequest) -> bool {
    req.title.is_none()
        && req.description.is_none()
        && req.due_date.is_none()
        && matches!(req.status, Some(TaskStatus::Done))
}

/// `GET /tasks`
///
/// Returns all tasks, each joined with its owning user record.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskWithOwner>>> {
    let tasks = Task::list_with_owner(&state.db).await?;

    Ok(Json(tasks))
}

/// `POST /tasks`
///
/// Creates a task. All of `title`, `description`, `status`, and `userId`
/// are required; `userId` names the owner.
///
/// # Errors
///
/// - `400 Bad Request`: any required field missing
/// - `409 Conflict`: `userId` does not reference an existing user
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let (title, description, status, user_id) =
        match (req.title, req.description, req.status, req.user_id) {
            (Some(title), Some(description), Some(status), Some(user_id)) => {
                (title, description, status, user_id)
            }
            _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
        };

    let task = Task::create(
        &state.db,
        CreateTask {
            title,
            description,
            status,
            user_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /tasks`
///
/// Partially updates a task: only fields present in the body change.
/// A tech lead may change any field; everyone else may only set the
/// status to `DONE`.
///
/// # Errors
///
/// - `400 Bad Request`: id missing
/// - `403 Forbidden`: non-lead attempted anything but marking `DONE`
/// - `404 Not Found`: id does not exist
pub async fn update_task(
    State(state): State<AppState>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let id = req
        .id
        .ok_or_else(|| ApiError::BadRequest("Task ID is required".to_string()))?;

    let lead = match req.user_id {
        Some(actor) => auth::is_tech_lead(&state.db, actor).await?,
        None => false,
    };

    if !lead && !is_done_only_change(&req) {
        return Err(ApiError::Forbidden(
            "Only tech leads may change task fields other than marking it DONE".to_string(),
        ));
    }

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            status: req.status,
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// `DELETE /tasks`
///
/// Deletes a task. Tech leads only.
///
/// # Errors
///
/// - `400 Bad Request`: id or userId missing
/// - `403 Forbidden`: acting user not a tech lead
/// - `404 Not Found`: id does not exist
pub async fn delete_task(
    State(state): State<AppState>,
    Json(req): Json<DeleteTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (id, user_id) = match (req.id, req.user_id) {
        (Some(id), Some(user_id)) => (id, user_id),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required fields: id and userId".to_string(),
            ))
        }
    };

    auth::require_tech_lead(&state.db, Some(user_id)).await?;

    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}
