//! Commands for the content context.

use stillpoint_core::actor::Actor;
use stillpoint_core::command::Command;
use uuid::Uuid;

use super::aggregates::ContentChanges;
use super::body::ContentBody;

/// Command to create a new draft.
#[derive(Debug, Clone)]
pub struct CreateContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// Title of the item.
    pub title: String,
    /// Type-specific payload.
    pub body: ContentBody,
    /// Whether the item is featured.
    pub featured: bool,
}

impl Command for CreateContent {
    fn command_type(&self) -> &'static str {
        "content.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to edit a draft.
#[derive(Debug, Clone)]
pub struct EditContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The content identifier.
    pub content_id: Uuid,
    /// Fields to change.
    pub changes: ContentChanges,
}

impl Command for EditContent {
    fn command_type(&self) -> &'static str {
        "content.edit"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to submit a draft for review.
#[derive(Debug, Clone)]
pub struct SubmitContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The content identifier.
    pub content_id: Uuid,
}

impl Command for SubmitContent {
    fn command_type(&self) -> &'static str {
        "content.submit"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to approve and publish a submitted item.
#[derive(Debug, Clone)]
pub struct ApproveContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The content identifier.
    pub content_id: Uuid,
}

impl Command for ApproveContent {
    fn command_type(&self) -> &'static str {
        "content.approve"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to send a submitted item back to draft.
#[derive(Debug, Clone)]
pub struct RejectContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The content identifier.
    pub content_id: Uuid,
    /// Why the item was rejected; required.
    pub reason: Option<String>,
}

impl Command for RejectContent {
    fn command_type(&self) -> &'static str {
        "content.reject"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to archive an item.
#[derive(Debug, Clone)]
pub struct ArchiveContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The content identifier.
    pub content_id: Uuid,
}

impl Command for ArchiveContent {
    fn command_type(&self) -> &'static str {
        "content.archive"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to set or clear the featured flag.
#[derive(Debug, Clone)]
pub struct SetContentFeatured {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The content identifier.
    pub content_id: Uuid,
    /// The new flag value.
    pub featured: bool,
}

impl Command for SetContentFeatured {
    fn command_type(&self) -> &'static str {
        "content.set_featured"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to delete an item.
#[derive(Debug, Clone)]
pub struct DeleteContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The content identifier.
    pub content_id: Uuid,
}

impl Command for DeleteContent {
    fn command_type(&self) -> &'static str {
        "content.delete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}
