//! User endpoints
//!
//! # Endpoints
//!
//! - `GET /users` - List all users
//! - `POST /users` - Create a user (role check runs when `userId` is supplied)
//! - `PUT /users` - Update a user (tech leads only)
//! - `DELETE /users` - Delete a user (tech leads only)
//!
//! Request bodies deserialize every field as optional so that missing
//! required fields produce a 400 with an `{"error"}` body instead of a
//! serde rejection.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};
use axum::{extract::State, http::StatusCode, Json};
use crewtrack_shared::{
    auth,
    models::user::{CreateUser, Role, UpdateUser, User},
};
use serde::Deserialize;
use uuid::Uuid;

/// Create user request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Display name (required)
    pub name: Option<String>,

    /// Email address (required, unique)
    pub email: Option<String>,

    /// Role; defaults to `DEV` when omitted
    pub role: Option<Role>,

    /// Acting user for the role check
    pub user_id: Option<Uuid>,
}

/// Update user request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// Record to update (required)
    pub id: Option<Uuid>,

    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,

    /// Acting user for the role check
    pub user_id: Option<Uuid>,
}

/// Delete user request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    /// Record to delete (required)
    pub id: Option<Uuid>,

    /// Acting user for the role check (required)
    pub user_id: Option<Uuid>,
}

/// `GET /users`
///
/// Returns all users.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::find_all(&state.db).await?;

    Ok(Json(users))
}

/// `POST /users`
///
/// Creates a user. `name` and `email` are required; `role` defaults to
/// `DEV`. When the body carries an acting `userId` the tech-lead check
/// runs; the bare path (no `userId`) is kept open for compatibility with
/// the original ungated endpoint.
///
/// # Errors
///
/// - `400 Bad Request`: name or email missing
/// - `403 Forbidden`: acting user supplied but not a tech lead
/// - `409 Conflict`: email already exists
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let (name, email) = match (req.name, req.email) {
        (Some(name), Some(email)) => (name, email),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required fields: name and email".to_string(),
            ))
        }
    };

    if req.user_id.is_some() {
        auth::require_tech_lead(&state.db, req.user_id).await?;
    }

    let user = User::create(
        &state.db,
        CreateUser {
            name,
            email,
            role: req.role,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /users`
///
/// Partially updates a user: only fields present in the body change.
/// Tech leads only.
///
/// # Errors
///
/// - `400 Bad Request`: id missing
/// - `403 Forbidden`: acting user missing or not a tech lead
/// - `404 Not Found`: id does not exist
pub async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let id = req
        .id
        .ok_or_else(|| ApiError::BadRequest("User ID is required".to_string()))?;

    auth::require_tech_lead(&state.db, req.user_id).await?;

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            name: req.name,
            email: req.email,
            role: req.role,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// `DELETE /users`
///
/// Deletes a user and, via cascade, the tasks they own. Tech leads only.
///
/// # Errors
///
/// - `400 Bad Request`: id or userId missing
/// - `403 Forbidden`: acting user not a tech lead
/// - `404 Not Found`: id does not exist
pub async fn delete_user(
    State(state): State<AppState>,
    Json(req): Json<DeleteUserRequest>,
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

    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}
