//! Routes for the content bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use stillpoint_content::application::{command_handlers, query_handlers};
use stillpoint_content::domain::aggregates::{Content, ContentChanges};
use stillpoint_content::domain::body::ContentBody;
use stillpoint_content::domain::commands;

use super::DeletedResponse;
use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    /// Title of the item.
    pub title: String,
    /// Type-tagged payload.
    pub body: ContentBody,
    /// Whether to feature the item.
    #[serde(default)]
    pub featured: bool,
}

/// Request body for PUT /{id}. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct EditContentRequest {
    pub title: Option<String>,
    pub body: Option<ContentBody>,
    pub featured: Option<bool>,
}

/// Request body for POST /{id}/reject.
#[derive(Debug, Default, Deserialize)]
pub struct RejectContentRequest {
    /// Why the item goes back to draft.
    pub reason: Option<String>,
}

/// Request body for POST /{id}/featured.
#[derive(Debug, Deserialize)]
pub struct SetFeaturedRequest {
    pub featured: bool,
}

/// POST /
#[instrument(skip_all, fields(user_id = %actor.user_id))]
async fn create_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<Content>), ApiError> {
    let command = commands::CreateContent {
        correlation_id: Uuid::new_v4(),
        actor,
        title: request.title,
        body: request.body,
        featured: request.featured,
    };

    info!(correlation_id = %command.correlation_id, "handling create_content command");

    let content =
        command_handlers::handle_create_content(&command, state.clock.as_ref(), &*state.content)
            .await?;

    Ok((StatusCode::CREATED, Json(content)))
}

/// GET /
#[instrument(skip_all, fields(user_id = %actor.user_id, role = %actor.role))]
async fn list_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(filter): Query<query_handlers::ContentFilter>,
) -> Result<Json<Vec<Content>>, ApiError> {
    let items = query_handlers::list_content(&filter, &actor, &*state.content).await?;
    Ok(Json(items))
}

/// GET /{id}
#[instrument(skip_all, fields(content_id = %content_id))]
async fn get_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(content_id): Path<Uuid>,
) -> Result<Json<Content>, ApiError> {
    let content = query_handlers::get_content(content_id, &actor, &*state.content).await?;
    Ok(Json(content))
}

/// PUT /{id}
#[instrument(skip_all, fields(content_id = %content_id))]
async fn edit_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(content_id): Path<Uuid>,
    Json(request): Json<EditContentRequest>,
) -> Result<Json<Content>, ApiError> {
    let command = commands::EditContent {
        correlation_id: Uuid::new_v4(),
        actor,
        content_id,
        changes: ContentChanges {
            title: request.title,
            body: request.body,
            featured: request.featured,
        },
    };

    info!(correlation_id = %command.correlation_id, "handling edit_content command");

    let content =
        command_handlers::handle_edit_content(&command, state.clock.as_ref(), &*state.content)
            .await?;
    Ok(Json(content))
}

/// POST /{id}/submit
#[instrument(skip_all, fields(content_id = %content_id))]
async fn submit_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(content_id): Path<Uuid>,
) -> Result<Json<Content>, ApiError> {
    let command = commands::SubmitContent {
        correlation_id: Uuid::new_v4(),
        actor,
        content_id,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_content command");

    let content =
        command_handlers::handle_submit_content(&command, state.clock.as_ref(), &*state.content)
            .await?;
    Ok(Json(content))
}

/// POST /{id}/approve
#[instrument(skip_all, fields(content_id = %content_id))]
async fn approve_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(content_id): Path<Uuid>,
) -> Result<Json<Content>, ApiError> {
    let command = commands::ApproveContent {
        correlation_id: Uuid::new_v4(),
        actor,
        content_id,
    };

    info!(correlation_id = %command.correlation_id, "handling approve_content command");

    let content =
        command_handlers::handle_approve_content(&command, state.clock.as_ref(), &*state.content)
            .await?;
    Ok(Json(content))
}

/// POST /{id}/reject
#[instrument(skip_all, fields(content_id = %content_id))]
async fn reject_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(content_id): Path<Uuid>,
    request: Option<Json<RejectContentRequest>>,
) -> Result<Json<Content>, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let command = commands::RejectContent {
        correlation_id: Uuid::new_v4(),
        actor,
        content_id,
        reason: request.reason,
    };

    info!(correlation_id = %command.correlation_id, "handling reject_content command");

    let content =
        command_handlers::handle_reject_content(&command, state.clock.as_ref(), &*state.content)
            .await?;
    Ok(Json(content))
}

/// POST /{id}/archive
#[instrument(skip_all, fields(content_id = %content_id))]
async fn archive_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(content_id): Path<Uuid>,
) -> Result<Json<Content>, ApiError> {
    let command = commands::ArchiveContent {
        correlation_id: Uuid::new_v4(),
        actor,
        content_id,
    };

    info!(correlation_id = %command.correlation_id, "handling archive_content command");

    let content =
        command_handlers::handle_archive_content(&command, state.clock.as_ref(), &*state.content)
            .await?;
    Ok(Json(content))
}

/// POST /{id}/featured
#[instrument(skip_all, fields(content_id = %content_id, featured = request.featured))]
async fn set_featured(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(content_id): Path<Uuid>,
    Json(request): Json<SetFeaturedRequest>,
) -> Result<Json<Content>, ApiError> {
    let command = commands::SetContentFeatured {
        correlation_id: Uuid::new_v4(),
        actor,
        content_id,
        featured: request.featured,
    };

    info!(correlation_id = %command.correlation_id, "handling set_content_featured command");

    let content = command_handlers::handle_set_content_featured(
        &command,
        state.clock.as_ref(),
        &*state.content,
    )
    .await?;
    Ok(Json(content))
}

/// DELETE /{id}
#[instrument(skip_all, fields(content_id = %content_id))]
async fn delete_content(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(content_id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let command = commands::DeleteContent {
        correlation_id: Uuid::new_v4(),
        actor,
        content_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_content command");

    let deleted = command_handlers::handle_delete_content(&command, &*state.content).await?;
    Ok(Json(DeletedResponse { deleted }))
}

/// GET /public/content
#[instrument(skip_all)]
async fn list_published(
    State(state): State<AppState>,
    Query(filter): Query<query_handlers::PublishedContentFilter>,
) -> Result<Json<Vec<query_handlers::PublishedContentView>>, ApiError> {
    let items = query_handlers::list_published_content(&filter, &*state.content).await?;
    Ok(Json(items))
}

/// GET /public/content/{id}
#[instrument(skip_all, fields(content_id = %content_id))]
async fn get_published(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
) -> Result<Json<query_handlers::PublishedContentView>, ApiError> {
    let item = query_handlers::get_published_content(content_id, &*state.content).await?;
    Ok(Json(item))
}

/// Returns the admin router for the content context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_content).get(list_content))
        .route(
            "/{id}",
            get(get_content).put(edit_content).delete(delete_content),
        )
        .route("/{id}/submit", post(submit_content))
        .route("/{id}/approve", post(approve_content))
        .route("/{id}/reject", post(reject_content))
        .route("/{id}/archive", post(archive_content))
        .route("/{id}/featured", post(set_featured))
}

/// Returns the public, read-only router for published content.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_published))
        .route("/{id}", get(get_published))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use stillpoint_test_support::{
        MemoryDocumentStore, admin, content_manager, content_reviewer, member,
    };

    use crate::routes::test_helpers::{failing_state, memory_state, send};

    fn poster_request() -> Value {
        json!({
            "title": "Autumn retreat",
            "body": {
                "type": "poster",
                "payload": { "image_url": "https://cdn.example.org/autumn.png" }
            }
        })
    }

    async fn create_draft(store: &MemoryDocumentStore) -> String {
        let app = router().with_state(memory_state(store));
        let (status, json) = send(
            app,
            "POST",
            "/",
            Some(content_manager()),
            Some(poster_request()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["id"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn test_create_content_returns_201_with_draft() {
        // Arrange
        let store = MemoryDocumentStore::new();
        let app = router().with_state(memory_state(&store));

        // Act
        let (status, json) = send(
            app,
            "POST",
            "/",
            Some(content_manager()),
            Some(poster_request()),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["status"], "draft");
        assert_eq!(json["body"]["type"], "poster");
        assert_eq!(json["featured"], false);
    }

    #[tokio::test]
    async fn test_create_content_without_headers_returns_401() {
        let store = MemoryDocumentStore::new();
        let app = router().with_state(memory_state(&store));

        let (status, json) = send(app, "POST", "/", None, Some(poster_request())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_approve_draft_returns_409() {
        // Arrange
        let store = MemoryDocumentStore::new();
        let id = create_draft(&store).await;
        let app = router().with_state(memory_state(&store));

        // Act
        let (status, json) = send(
            app,
            "POST",
            &format!("/{id}/approve"),
            Some(content_reviewer()),
            None,
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], "invalid_transition");
    }

    #[tokio::test]
    async fn test_reject_without_body_returns_400() {
        let store = MemoryDocumentStore::new();
        let id = create_draft(&store).await;
        let (status, _) = send(
            router().with_state(memory_state(&store)),
            "POST",
            &format!("/{id}/submit"),
            Some(content_manager()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(
            router().with_state(memory_state(&store)),
            "POST",
            &format!("/{id}/reject"),
            Some(admin()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_delete_by_member_returns_403() {
        let store = MemoryDocumentStore::new();
        let id = create_draft(&store).await;
        let app = router().with_state(memory_state(&store));

        let (status, json) = send(app, "DELETE", &format!("/{id}"), Some(member()), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"], "forbidden");
    }

    #[tokio::test]
    async fn test_get_unknown_content_returns_404() {
        let store = MemoryDocumentStore::new();
        let app = router().with_state(memory_state(&store));

        let (status, json) = send(
            app,
            "GET",
            &format!("/{}", Uuid::new_v4()),
            Some(admin()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_create_content_returns_422_for_unknown_type() {
        let store = MemoryDocumentStore::new();
        let app = router().with_state(memory_state(&store));
        let body = json!({
            "title": "Mystery",
            "body": { "type": "hologram", "payload": {} }
        });

        let (status, _) = send(app, "POST", "/", Some(admin()), Some(body)).await;

        // Axum returns 422 for deserialization failures.
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_list_content_returns_500_when_repository_fails() {
        let app = router().with_state(failing_state());

        let (status, json) = send(app, "GET", "/", Some(admin()), None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[tokio::test]
    async fn test_public_router_hides_drafts() {
        let store = MemoryDocumentStore::new();
        let id = create_draft(&store).await;

        let (list_status, list) = send(
            public_router().with_state(memory_state(&store)),
            "GET",
            "/",
            None,
            None,
        )
        .await;
        let (get_status, _) = send(
            public_router().with_state(memory_state(&store)),
            "GET",
            &format!("/{id}"),
            None,
            None,
        )
        .await;

        assert_eq!(list_status, StatusCode::OK);
        assert_eq!(list, json!([]));
        assert_eq!(get_status, StatusCode::NOT_FOUND);
    }
}
