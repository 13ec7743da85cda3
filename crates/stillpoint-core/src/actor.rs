//! Roles and the actor identity passed into every command.
//!
//! Identity is established by an external auth collaborator; this crate only
//! models its result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// The closed set of roles that gate every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including deletion and archival.
    Admin,
    /// Authors and edits content, submits it for review.
    ContentManager,
    /// Reviews submitted content.
    ContentReviewer,
    /// A regular signed-in member (attendee).
    User,
}

impl Role {
    /// Every role, in privilege order.
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::ContentManager,
        Role::ContentReviewer,
        Role::User,
    ];

    /// Roles that may moderate applications and feedback.
    pub const MODERATORS: [Role; 3] = [Role::Admin, Role::ContentManager, Role::ContentReviewer];

    /// Returns the wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ContentManager => "content_manager",
            Role::ContentReviewer => "content_reviewer",
            Role::User => "user",
        }
    }

    /// Whether this role belongs to the staff working in the admin panel.
    #[must_use]
    pub fn is_staff(self) -> bool {
        Self::MODERATORS.contains(&self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown role: {s}")))
    }
}

/// The authenticated caller of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User identifier from the external auth provider.
    pub user_id: Uuid,
    /// The role resolved for the session.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Ensures the actor holds one of `allowed`, for operations that are not
    /// status transitions (creation, reads).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` if the actor's role is not listed.
    pub fn require_any(&self, allowed: &[Role], action: &str) -> Result<(), DomainError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.user_id, role = %self.role, action, "permission denied");
            Err(DomainError::Forbidden {
                role: self.role,
                action: action.to_owned(),
            })
        }
    }
}
