//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::actor::Role;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A document was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The kind of document that was looked up.
        kind: &'static str,
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// The actor's role does not permit the action.
    #[error("role {role} may not perform {action}")]
    Forbidden {
        /// The role that attempted the action.
        role: Role,
        /// The action that was attempted.
        action: String,
    },

    /// The action does not apply to the entity's current status.
    #[error("cannot {action} while status is {status}")]
    InvalidTransition {
        /// The action that was attempted.
        action: String,
        /// The current status of the entity.
        status: String,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
