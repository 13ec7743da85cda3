//! Routes for the volunteering bounded context.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use stillpoint_volunteering::application::{command_handlers, query_handlers};
use stillpoint_volunteering::domain::aggregates::{
    Applicant, CustomQuestion, VolunteerApplication, VolunteerOpportunity,
};
use stillpoint_volunteering::domain::commands;

use super::{DeletedResponse, NotesRequest};
use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::state::AppState;

/// Request body for POST /opportunities.
#[derive(Debug, Deserialize)]
pub struct CreateOpportunityRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub questions: Vec<CustomQuestion>,
}

fn default_active() -> bool {
    true
}

/// Request body for POST /opportunities/{id}/applications.
#[derive(Debug, Deserialize)]
pub struct SubmitApplicationRequest {
    /// Contact details of the applicant.
    #[serde(flatten)]
    pub applicant: Applicant,
    /// Free-form message.
    pub message: Option<String>,
    /// Answers keyed by question id.
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

/// POST /opportunities
#[instrument(skip_all, fields(user_id = %actor.user_id))]
async fn create_opportunity(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<CreateOpportunityRequest>,
) -> Result<(StatusCode, Json<VolunteerOpportunity>), ApiError> {
    let command = commands::CreateOpportunity {
        correlation_id: Uuid::new_v4(),
        actor,
        title: request.title,
        description: request.description,
        is_active: request.is_active,
        questions: request.questions,
    };

    info!(correlation_id = %command.correlation_id, "handling create_opportunity command");

    let opportunity = command_handlers::handle_create_opportunity(
        &command,
        state.clock.as_ref(),
        &*state.opportunities,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(opportunity)))
}

/// GET /opportunities
#[instrument(skip_all)]
async fn list_opportunities(
    State(state): State<AppState>,
) -> Result<Json<Vec<query_handlers::OpportunityView>>, ApiError> {
    let views = query_handlers::list_active_opportunities(&*state.opportunities).await?;
    Ok(Json(views))
}

/// GET /opportunities/{id}
#[instrument(skip_all, fields(opportunity_id = %opportunity_id))]
async fn get_opportunity(
    State(state): State<AppState>,
    Path(opportunity_id): Path<Uuid>,
) -> Result<Json<query_handlers::OpportunityView>, ApiError> {
    let view = query_handlers::get_opportunity(opportunity_id, &*state.opportunities).await?;
    Ok(Json(view))
}

/// POST /opportunities/{id}/applications
#[instrument(skip_all, fields(opportunity_id = %opportunity_id))]
async fn submit_application(
    State(state): State<AppState>,
    Path(opportunity_id): Path<Uuid>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<VolunteerApplication>), ApiError> {
    let command = commands::SubmitApplication {
        correlation_id: Uuid::new_v4(),
        opportunity_id,
        applicant: request.applicant,
        message: request.message,
        answers: request.answers,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_application command");

    let application = command_handlers::handle_submit_application(
        &command,
        state.clock.as_ref(),
        &*state.opportunities,
        &*state.applications,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /applications
#[instrument(skip_all, fields(user_id = %actor.user_id))]
async fn list_applications(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(filter): Query<query_handlers::ApplicationFilter>,
) -> Result<Json<Vec<VolunteerApplication>>, ApiError> {
    let items = query_handlers::list_applications(&filter, &actor, &*state.applications).await?;
    Ok(Json(items))
}

/// GET /applications/{id}
#[instrument(skip_all, fields(application_id = %application_id))]
async fn get_application(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(application_id): Path<Uuid>,
) -> Result<Json<VolunteerApplication>, ApiError> {
    let item =
        query_handlers::get_application(application_id, &actor, &*state.applications).await?;
    Ok(Json(item))
}

/// POST /applications/{id}/approve
#[instrument(skip_all, fields(application_id = %application_id))]
async fn approve_application(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(application_id): Path<Uuid>,
    request: Option<Json<NotesRequest>>,
) -> Result<Json<VolunteerApplication>, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let command = commands::ApproveApplication {
        correlation_id: Uuid::new_v4(),
        actor,
        application_id,
        notes: request.notes,
    };

    info!(correlation_id = %command.correlation_id, "handling approve_application command");

    let application = command_handlers::handle_approve_application(
        &command,
        state.clock.as_ref(),
        &*state.applications,
    )
    .await?;
    Ok(Json(application))
}

/// POST /applications/{id}/reject
#[instrument(skip_all, fields(application_id = %application_id))]
async fn reject_application(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(application_id): Path<Uuid>,
    request: Option<Json<NotesRequest>>,
) -> Result<Json<VolunteerApplication>, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let command = commands::RejectApplication {
        correlation_id: Uuid::new_v4(),
        actor,
        application_id,
        notes: request.notes,
    };

    info!(correlation_id = %command.correlation_id, "handling reject_application command");

    let application = command_handlers::handle_reject_application(
        &command,
        state.clock.as_ref(),
        &*state.applications,
    )
    .await?;
    Ok(Json(application))
}

/// POST /applications/{id}/contact
#[instrument(skip_all, fields(application_id = %application_id))]
async fn contact_applicant(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(application_id): Path<Uuid>,
    request: Option<Json<NotesRequest>>,
) -> Result<Json<VolunteerApplication>, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let command = commands::ContactApplicant {
        correlation_id: Uuid::new_v4(),
        actor,
        application_id,
        notes: request.notes,
    };

    info!(correlation_id = %command.correlation_id, "handling contact_applicant command");

    let application = command_handlers::handle_contact_applicant(
        &command,
        state.clock.as_ref(),
        &*state.applications,
    )
    .await?;
    Ok(Json(application))
}

/// DELETE /applications/{id}
#[instrument(skip_all, fields(application_id = %application_id))]
async fn delete_application(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(application_id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let command = commands::DeleteApplication {
        correlation_id: Uuid::new_v4(),
        actor,
        application_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_application command");

    let deleted =
        command_handlers::handle_delete_application(&command, &*state.applications).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// Returns the router for the volunteering context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/opportunities",
            post(create_opportunity).get(list_opportunities),
        )
        .route("/opportunities/{id}", get(get_opportunity))
        .route("/opportunities/{id}/applications", post(submit_application))
        .route("/applications", get(list_applications))
        .route(
            "/applications/{id}",
            get(get_application).delete(delete_application),
        )
        .route("/applications/{id}/approve", post(approve_application))
        .route("/applications/{id}/reject", post(reject_application))
        .route("/applications/{id}/contact", post(contact_applicant))
}
