//! `PostgreSQL` implementation of the `DocumentRepository` trait.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{Criteria, Document, DocumentRepository, decode, encode};

/// PostgreSQL-backed document store. One instance serves every collection.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a new `PgDocumentStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("database error: {err}"))
}

#[async_trait]
impl<D: Document> DocumentRepository<D> for PgDocumentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<D>, DomainError> {
        let row: Option<(Value,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = $1 AND id = $2")
                .bind(D::COLLECTION)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(infrastructure)?;

        row.map(|(body,)| decode(body)).transpose()
    }

    async fn find_matching(&self, criteria: &Criteria) -> Result<Vec<D>, DomainError> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            "SELECT body FROM documents WHERE collection = $1 AND body @> $2 ORDER BY created_at",
        )
        .bind(D::COLLECTION)
        .bind(criteria.to_json())
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;

        rows.into_iter().map(|(body,)| decode(body)).collect()
    }

    async fn save(&self, document: &D) -> Result<(), DomainError> {
        let body = encode(document)?;
        sqlx::query(
            r"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET body = EXCLUDED.body, updated_at = NOW()
            ",
        )
        .bind(D::COLLECTION)
        .bind(document.document_id())
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;

        tracing::debug!(collection = D::COLLECTION, id = %document.document_id(), "document saved");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(D::COLLECTION)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;

        Ok(result.rows_affected() > 0)
    }
}
