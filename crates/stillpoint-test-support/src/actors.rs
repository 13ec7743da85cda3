//! Actor fixtures, one per role.

use stillpoint_core::actor::{Actor, Role};
use uuid::Uuid;

/// A fresh admin actor.
#[must_use]
pub fn admin() -> Actor {
    Actor::new(Uuid::new_v4(), Role::Admin)
}

/// A fresh content manager actor.
#[must_use]
pub fn content_manager() -> Actor {
    Actor::new(Uuid::new_v4(), Role::ContentManager)
}

/// A fresh content reviewer actor.
#[must_use]
pub fn content_reviewer() -> Actor {
    Actor::new(Uuid::new_v4(), Role::ContentReviewer)
}

/// A fresh regular member actor.
#[must_use]
pub fn member() -> Actor {
    Actor::new(Uuid::new_v4(), Role::User)
}
