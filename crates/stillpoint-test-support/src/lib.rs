//! Shared test mocks and utilities for the Stillpoint content platform.

mod actors;
mod clock;
mod repository;

pub use actors::{admin, content_manager, content_reviewer, member};
pub use clock::{FixedClock, fixed_now};
pub use repository::FailingDocumentRepository;
pub use stillpoint_store::MemoryDocumentStore;
