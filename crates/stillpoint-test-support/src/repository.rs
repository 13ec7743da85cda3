//! Test repositories: mock `DocumentRepository` implementations for tests.

use async_trait::async_trait;
use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{Criteria, Document, DocumentRepository};
use uuid::Uuid;

/// A document repository that always returns an infrastructure error. Useful
/// for testing error-handling paths.
#[derive(Debug, Clone, Copy)]
pub struct FailingDocumentRepository;

#[async_trait]
impl<D: Document> DocumentRepository<D> for FailingDocumentRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<D>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_matching(&self, _criteria: &Criteria) -> Result<Vec<D>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _document: &D) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
