//! Route modules organized by bounded context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod content;
pub mod events;
pub mod feedback;
pub mod health;
pub mod volunteering;

/// Response body returned after a delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Identifier of the removed document.
    pub deleted: Uuid,
}

/// Optional request body for moderation transitions.
#[derive(Debug, Default, Deserialize)]
pub struct NotesRequest {
    /// Moderator notes; required when rejecting.
    pub notes: Option<String>,
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use stillpoint_core::actor::Actor;
    use stillpoint_core::clock::Clock;
    use stillpoint_test_support::{
        FailingDocumentRepository, FixedClock, MemoryDocumentStore, fixed_now,
    };
    use tower::ServiceExt;

    use crate::extract::{USER_ID_HEADER, USER_ROLE_HEADER};
    use crate::state::AppState;

    pub fn memory_state(store: &MemoryDocumentStore) -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(fixed_now()));
        AppState::new(clock, store.clone())
    }

    pub fn failing_state() -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(fixed_now()));
        AppState::new(clock, FailingDocumentRepository)
    }

    /// Sends one request and returns the status and the JSON body (or
    /// `Value::Null` for an empty body).
    pub async fn send(
        app: Router,
        method: &str,
        uri: &str,
        actor: Option<Actor>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(actor) = actor {
            builder = builder
                .header(USER_ID_HEADER, actor.user_id.to_string())
                .header(USER_ROLE_HEADER, actor.role.as_str());
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}
