//! Document repository abstraction.
//!
//! Entities are stored whole as JSON documents in named collections. A save
//! replaces the stored document, so concurrent writers resolve as
//! last-write-wins.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::DomainError;

/// An entity persisted as a single JSON document.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the document lives in.
    const COLLECTION: &'static str;

    /// Human-readable kind, used in not-found errors.
    const KIND: &'static str;

    /// Returns the document identifier.
    fn document_id(&self) -> Uuid;
}

/// Repository trait for loading and storing documents of one kind.
#[async_trait]
pub trait DocumentRepository<D: Document>: Send + Sync {
    /// Load a document by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<D>, DomainError>;

    /// Load every document in the collection that matches `criteria`.
    async fn find_matching(&self, criteria: &Criteria) -> Result<Vec<D>, DomainError>;

    /// Insert or replace a document.
    async fn save(&self, document: &D) -> Result<(), DomainError>;

    /// Remove a document. Returns `false` if nothing was stored under `id`.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

/// Loads a document that must exist.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the repository holds no document for
/// `id`, or any error the repository reports.
pub async fn load_existing<D: Document>(
    repo: &dyn DocumentRepository<D>,
    id: Uuid,
) -> Result<D, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound { kind: D::KIND, id })
}

/// Serializes a document for storage.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if serialization fails.
pub fn encode<D: Document>(document: &D) -> Result<Value, DomainError> {
    serde_json::to_value(document)
        .map_err(|e| DomainError::Infrastructure(format!("document serialization failed: {e}")))
}

/// Deserializes a stored document.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the stored JSON does not match `D`.
pub fn decode<D: Document>(body: Value) -> Result<D, DomainError> {
    serde_json::from_value(body)
        .map_err(|e| DomainError::Infrastructure(format!("document deserialization failed: {e}")))
}

/// A JSON containment filter over documents.
///
/// Paths use dots for nested fields (`"body.type"`). A document matches when
/// every listed field is present with an equal value, which is the semantics
/// of the `PostgreSQL` `@>` operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pattern: Map<String, Value>,
}

impl Criteria {
    /// An empty filter matching every document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the field at `path` to equal `value`.
    #[must_use]
    pub fn eq(mut self, path: &str, value: impl Into<Value>) -> Self {
        let segments: Vec<&str> = path.split('.').collect();
        insert_path(&mut self.pattern, &segments, value.into());
        self
    }

    /// Like [`Criteria::eq`], but only when `value` is present.
    #[must_use]
    pub fn eq_opt<T: Into<Value>>(self, path: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.eq(path, value),
            None => self,
        }
    }

    /// Whether the filter has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// The filter as a JSON object, suitable for a containment query.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.pattern.clone())
    }

    /// Whether `document` satisfies the filter.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.pattern
            .iter()
            .all(|(key, expected)| document.get(key).is_some_and(|v| contains(v, expected)))
    }
}

fn insert_path(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_owned(), value);
        }
        [head, rest @ ..] => {
            let entry = map
                .entry((*head).to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}

fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected
            .iter()
            .all(|(key, value)| actual.get(key).is_some_and(|a| contains(a, value))),
        (actual, expected) => actual == expected,
    }
}
