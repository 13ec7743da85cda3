//! Role-gated status transition rules.
//!
//! Each moderated entity declares a [`TransitionPolicy`]: which roles may
//! invoke an action, and which status the action leads to from a given
//! status. Policies are pure; persistence happens in the command handlers.

use std::fmt;

use crate::actor::{Actor, Role};
use crate::error::DomainError;

/// The result of an allowed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<S> {
    /// The entity moves to (or stays in) the given status.
    MoveTo(S),
    /// The entity is removed from the store.
    Remove,
}

/// Pure mapping of (role, action, status) to an allowed outcome.
pub trait TransitionPolicy {
    /// Actions the entity supports.
    type Action: Copy + fmt::Display;
    /// Status values the entity moves through.
    type Status: Copy + PartialEq + fmt::Display;

    /// Roles that may invoke `action` at all.
    fn permitted_roles(action: Self::Action) -> &'static [Role];

    /// Where `action` leads from `from`, or `None` if it does not apply.
    fn outcome(action: Self::Action, from: Self::Status) -> Option<Outcome<Self::Status>>;

    /// Whether `role` may perform `action` on an entity in `status`.
    fn can_perform(role: Role, action: Self::Action, status: Self::Status) -> bool {
        Self::permitted_roles(action).contains(&role) && Self::outcome(action, status).is_some()
    }

    /// Checks the actor's role, then the current status, and returns the
    /// outcome of the action.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` if the role may not perform the
    /// action, and `DomainError::InvalidTransition` if the action does not
    /// apply to `status`.
    fn authorize(
        actor: &Actor,
        action: Self::Action,
        status: Self::Status,
    ) -> Result<Outcome<Self::Status>, DomainError> {
        if !Self::permitted_roles(action).contains(&actor.role) {
            tracing::warn!(
                user_id = %actor.user_id,
                role = %actor.role,
                %action,
                %status,
                "transition denied"
            );
            return Err(DomainError::Forbidden {
                role: actor.role,
                action: action.to_string(),
            });
        }
        Self::outcome(action, status).ok_or_else(|| DomainError::InvalidTransition {
            action: action.to_string(),
            status: status.to_string(),
        })
    }
}
