//! Routes for the event catalog and feedback submission.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use stillpoint_feedback::application::{command_handlers, query_handlers};
use stillpoint_feedback::domain::aggregates::{Event, EventFeedback, FeedbackBody};
use stillpoint_feedback::domain::commands;

use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Request body for POST /{id}/feedback.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    /// Display name of the author.
    pub author_name: String,
    /// Tagged payload: `{"type": "comment", "comment": "..."}` and so on.
    #[serde(flatten)]
    pub body: FeedbackBody,
}

/// POST /
#[instrument(skip_all, fields(user_id = %actor.user_id))]
async fn create_event(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let command = commands::CreateEvent {
        correlation_id: Uuid::new_v4(),
        actor,
        title: request.title,
        location: request.location,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
    };

    info!(correlation_id = %command.correlation_id, "handling create_event command");

    let event =
        command_handlers::handle_create_event(&command, state.clock.as_ref(), &*state.events)
            .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /
#[instrument(skip_all)]
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = query_handlers::list_events(&*state.events).await?;
    Ok(Json(events))
}

/// GET /{id}
#[instrument(skip_all, fields(event_id = %event_id))]
async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event = query_handlers::get_event(event_id, &*state.events).await?;
    Ok(Json(event))
}

/// POST /{id}/feedback
#[instrument(skip_all, fields(event_id = %event_id, user_id = %actor.user_id))]
async fn submit_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(event_id): Path<Uuid>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<EventFeedback>), ApiError> {
    let command = commands::SubmitFeedback {
        correlation_id: Uuid::new_v4(),
        actor,
        event_id,
        author_name: request.author_name,
        body: request.body,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_feedback command");

    let item = command_handlers::handle_submit_feedback(
        &command,
        state.clock.as_ref(),
        &*state.events,
        &*state.feedback,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /{id}/feedback
#[instrument(skip_all, fields(event_id = %event_id))]
async fn list_approved_feedback(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<query_handlers::PublishedFeedbackView>>, ApiError> {
    let items =
        query_handlers::list_approved_feedback(event_id, &*state.events, &*state.feedback).await?;
    Ok(Json(items))
}

/// Returns the router for the event catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event).get(list_events))
        .route("/{id}", get(get_event))
        .route(
            "/{id}/feedback",
            post(submit_feedback).get(list_approved_feedback),
        )
}
