//! Event endpoints
//!
//! # Endpoints
//!
//! - `GET /events` - List all events
//! - `POST /events` - Create an event (role check runs when `userId` is supplied)
//! - `PUT /events` - Update an event (tech leads only)
//! - `DELETE /events` - Delete an event (tech leads only)
//!
//! Start/end ordering is not validated anywhere; an event may end before
//! it starts if the caller says so.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use crewtrack_shared::{
    auth,
    models::event::{CreateEvent, Event, UpdateEvent},
};
use serde::Deserialize;
use uuid::Uuid;

/// Create event request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Short title (required)
    pub title: Option<String>,

    pub description: Option<String>,

    /// When the event starts (required)
    pub start_time: Option<DateTime<Utc>>,

    /// When the event ends (required)
    pub end_time: Option<DateTime<Utc>>,

    /// Acting user for the role check
    pub user_id: Option<Uuid>,
}

/// Update event request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    /// Record to update (required)
    pub id: Option<Uuid>,

    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,

    /// Acting user for the role check
    pub user_id: Option<Uuid>,
}

/// Delete event request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventRequest {
    /// Record to delete (required)
    pub id: Option<Uuid>,

    /// Acting user for the role check (required)
    pub user_id: Option<Uuid>,
}

/// `GET /events`
///
/// Returns all events.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    let events = Event::find_all(&state.db).await?;

    Ok(Json(events))
}

/// `POST /events`
///
/// Creates an event. `title`, `startTime`, and `endTime` are required.
/// When the body carries an acting `userId` the tech-lead check runs;
/// the bare path is kept open for compatibility with the original
/// ungated endpoint.
///
/// # Errors
///
/// - `400 Bad Request`: title, startTime, or endTime missing
/// - `403 Forbidden`: acting user supplied but not a tech lead
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let (title, start_time, end_time) = match (req.title, req.start_time, req.end_time) {
        (Some(title), Some(start_time), Some(end_time)) => (title, start_time, end_time),
        _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
    };

    if req.user_id.is_some() {
        auth::require_tech_lead(&state.db, req.user_id).await?;
    }

    let event = Event::create(
        &state.db,
        CreateEvent {
            title,
            description: req.description,
            start_time,
            end_time,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// `PUT /events`
///
/// Partially updates an event: only fields present in the body change.
/// Tech leads only.
///
/// # Errors
///
/// - `400 Bad Request`: id missing
/// - `403 Forbidden`: acting user missing or not a tech lead
/// - `404 Not Found`: id does not exist
pub async fn update_event(
    State(state): State<AppState>,
    Json(req): Json<UpdateEventRequest>,
) -> ApiResult<Json<Event>> {
    let id = req
        .id
        .ok_or_else(|| ApiError::BadRequest("Event ID is required".to_string()))?;

    auth::require_tech_lead(&state.db, req.user_id).await?;

    let event = Event::update(
        &state.db,
        id,
        UpdateEvent {
            title: req.title,
            description: req.description,
            start_time: req.start_time,
            end_time: req.end_time,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}

/// `DELETE /events`
///
/// Deletes an event. Tech leads only.
///
/// # Errors
///
/// - `400 Bad Request`: id or userId missing
/// - `403 Forbidden`: acting user not a tech lead
/// - `404 Not Found`: id does not exist
pub async fn delete_event(
    State(state): State<AppState>,
    Json(req): Json<DeleteEventRequest>,
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

    let deleted = Event::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Event deleted".to_string(),
    }))
}
