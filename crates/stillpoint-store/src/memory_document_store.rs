//! In-process implementation of the `DocumentRepository` trait.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{Criteria, Document, DocumentRepository, decode, encode};

type Collections = BTreeMap<&'static str, BTreeMap<Uuid, Value>>;

/// A document store held in memory. Clones share the same underlying data,
/// so one store can back repositories for several document kinds.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored in `collection`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store lock is poisoned.
    pub fn count(&self, collection: &str) -> Result<usize, DomainError> {
        let guard = self.collections.read().map_err(|_| poisoned())?;
        Ok(guard.get(collection).map_or(0, BTreeMap::len))
    }
}

fn poisoned() -> DomainError {
    DomainError::Infrastructure("memory store lock poisoned".to_owned())
}

#[async_trait]
impl<D: Document> DocumentRepository<D> for MemoryDocumentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<D>, DomainError> {
        let body = {
            let guard = self.collections.read().map_err(|_| poisoned())?;
            guard
                .get(D::COLLECTION)
                .and_then(|documents| documents.get(&id))
                .cloned()
        };
        body.map(decode).transpose()
    }

    async fn find_matching(&self, criteria: &Criteria) -> Result<Vec<D>, DomainError> {
        let bodies: Vec<Value> = {
            let guard = self.collections.read().map_err(|_| poisoned())?;
            guard
                .get(D::COLLECTION)
                .map(|documents| {
                    documents
                        .values()
                        .filter(|body| criteria.matches(body))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };
        bodies.into_iter().map(decode).collect()
    }

    async fn save(&self, document: &D) -> Result<(), DomainError> {
        let body = encode(document)?;
        let mut guard = self.collections.write().map_err(|_| poisoned())?;
        guard
            .entry(D::COLLECTION)
            .or_default()
            .insert(document.document_id(), body);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut guard = self.collections.write().map_err(|_| poisoned())?;
        Ok(guard
            .get_mut(D::COLLECTION)
            .is_some_and(|documents| documents.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use stillpoint_core::repository::{Criteria, Document, DocumentRepository};
    use uuid::Uuid;

    use super::MemoryDocumentStore;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Uuid,
        status: String,
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";
        const KIND: &'static str = "note";

        fn document_id(&self) -> Uuid {
            self.id
        }
    }

    fn note(status: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            status: status.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_save_then_find_by_id() {
        let store = MemoryDocumentStore::new();
        let draft = note("draft");

        DocumentRepository::<Note>::save(&store, &draft).await.unwrap();
        let found: Option<Note> = store.find_by_id(draft.id).await.unwrap();

        assert_eq!(found, Some(draft));
    }

    #[tokio::test]
    async fn test_save_replaces_existing_document() {
        let store = MemoryDocumentStore::new();
        let mut doc = note("draft");
        DocumentRepository::<Note>::save(&store, &doc).await.unwrap();

        doc.status = "published".to_owned();
        DocumentRepository::<Note>::save(&store, &doc).await.unwrap();

        let found: Note = store.find_by_id(doc.id).await.unwrap().unwrap();
        assert_eq!(found.status, "published");
        assert_eq!(store.count("notes").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_matching_filters_by_criteria() {
        let store = MemoryDocumentStore::new();
        for status in ["draft", "published", "draft"] {
            DocumentRepository::<Note>::save(&store, &note(status))
                .await
                .unwrap();
        }

        let drafts: Vec<Note> = store
            .find_matching(&Criteria::new().eq("status", "draft"))
            .await
            .unwrap();

        assert_eq!(drafts.len(), 2);
        assert!(drafts.iter().all(|n| n.status == "draft"));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_document_existed() {
        let store = MemoryDocumentStore::new();
        let doc = note("draft");
        DocumentRepository::<Note>::save(&store, &doc).await.unwrap();

        assert!(DocumentRepository::<Note>::delete(&store, doc.id).await.unwrap());
        assert!(!DocumentRepository::<Note>::delete(&store, doc.id).await.unwrap());
    }
}
