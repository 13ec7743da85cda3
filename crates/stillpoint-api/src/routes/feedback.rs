//! Routes for feedback moderation.

use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get, routing::post};
use tracing::{info, instrument};
use uuid::Uuid;

use stillpoint_feedback::application::{command_handlers, query_handlers};
use stillpoint_feedback::domain::aggregates::EventFeedback;
use stillpoint_feedback::domain::commands;

use super::{DeletedResponse, NotesRequest};
use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::state::AppState;

/// GET /
#[instrument(skip_all, fields(user_id = %actor.user_id))]
async fn list_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(filter): Query<query_handlers::FeedbackFilter>,
) -> Result<Json<Vec<EventFeedback>>, ApiError> {
    let items = query_handlers::list_feedback(&filter, &actor, &*state.feedback).await?;
    Ok(Json(items))
}

/// GET /{id}
#[instrument(skip_all, fields(feedback_id = %feedback_id))]
async fn get_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(feedback_id): Path<Uuid>,
) -> Result<Json<EventFeedback>, ApiError> {
    let item = query_handlers::get_feedback(feedback_id, &actor, &*state.feedback).await?;
    Ok(Json(item))
}

/// POST /{id}/approve
#[instrument(skip_all, fields(feedback_id = %feedback_id))]
async fn approve_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(feedback_id): Path<Uuid>,
    request: Option<Json<NotesRequest>>,
) -> Result<Json<EventFeedback>, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let command = commands::ApproveFeedback {
        correlation_id: Uuid::new_v4(),
        actor,
        feedback_id,
        notes: request.notes,
    };

    info!(correlation_id = %command.correlation_id, "handling approve_feedback command");

    let item =
        command_handlers::handle_approve_feedback(&command, state.clock.as_ref(), &*state.feedback)
            .await?;
    Ok(Json(item))
}

/// POST /{id}/reject
#[instrument(skip_all, fields(feedback_id = %feedback_id))]
async fn reject_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(feedback_id): Path<Uuid>,
    request: Option<Json<NotesRequest>>,
) -> Result<Json<EventFeedback>, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let command = commands::RejectFeedback {
        correlation_id: Uuid::new_v4(),
        actor,
        feedback_id,
        notes: request.notes,
    };

    info!(correlation_id = %command.correlation_id, "handling reject_feedback command");

    let item =
        command_handlers::handle_reject_feedback(&command, state.clock.as_ref(), &*state.feedback)
            .await?;
    Ok(Json(item))
}

/// DELETE /{id}
#[instrument(skip_all, fields(feedback_id = %feedback_id))]
async fn delete_feedback(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(feedback_id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let command = commands::DeleteFeedback {
        correlation_id: Uuid::new_v4(),
        actor,
        feedback_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_feedback command");

    let deleted = command_handlers::handle_delete_feedback(&command, &*state.feedback).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// Returns the router for feedback moderation.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_feedback))
        .route("/{id}", get(get_feedback).delete(delete_feedback))
        .route("/{id}/approve", post(approve_feedback))
        .route("/{id}/reject", post(reject_feedback))
}
