//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use stillpoint_core::actor::Actor;
use stillpoint_core::clock::Clock;
use stillpoint_test_support::{FixedClock, MemoryDocumentStore, fixed_now};
use tower::ServiceExt;

use stillpoint_api::extract::{USER_ID_HEADER, USER_ROLE_HEADER};
use stillpoint_api::state::AppState;

/// A test server backed by one in-memory store. Each request gets a fresh
/// router over the same documents.
#[derive(Clone, Default)]
pub struct TestApp {
    pub store: MemoryDocumentStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full app router with a fixed clock.
    pub fn router(&self) -> Router {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(fixed_now()));
        stillpoint_api::app(AppState::new(clock, self.store.clone()))
    }

    pub async fn get(&self, uri: &str, actor: Option<Actor>) -> (StatusCode, serde_json::Value) {
        self.send("GET", uri, actor, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        actor: Option<Actor>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        self.send("POST", uri, actor, body).await
    }

    pub async fn put(
        &self,
        uri: &str,
        actor: Actor,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.send("PUT", uri, Some(actor), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, actor: Actor) -> (StatusCode, serde_json::Value) {
        self.send("DELETE", uri, Some(actor), None).await
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        actor: Option<Actor>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
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

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body_bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };

        (status, json)
    }
}
