//! Stillpoint document stores.
//!
//! `PgDocumentStore` persists documents as JSONB rows; `MemoryDocumentStore`
//! keeps them in process for development and tests.

pub mod memory_document_store;
pub mod pg_document_store;

pub use memory_document_store::MemoryDocumentStore;
pub use pg_document_store::PgDocumentStore;
