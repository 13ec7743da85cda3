//! Commands for the feedback context.

use chrono::{DateTime, Utc};
use stillpoint_core::actor::Actor;
use stillpoint_core::command::Command;
use uuid::Uuid;

use super::aggregates::FeedbackBody;

/// Command to add an event to the catalog.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// Title of the event.
    pub title: String,
    /// Where it takes place.
    pub location: String,
    /// Start time.
    pub starts_at: DateTime<Utc>,
    /// End time; feedback opens from here.
    pub ends_at: DateTime<Utc>,
}

impl Command for CreateEvent {
    fn command_type(&self) -> &'static str {
        "feedback.create_event"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to leave feedback on a finished event.
#[derive(Debug, Clone)]
pub struct SubmitFeedback {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The attendee leaving feedback.
    pub actor: Actor,
    /// The event the feedback is about.
    pub event_id: Uuid,
    /// Display name of the author.
    pub author_name: String,
    /// The feedback itself.
    pub body: FeedbackBody,
}

impl Command for SubmitFeedback {
    fn command_type(&self) -> &'static str {
        "feedback.submit_feedback"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to approve pending feedback.
#[derive(Debug, Clone)]
pub struct ApproveFeedback {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The feedback identifier.
    pub feedback_id: Uuid,
    /// Optional moderator notes.
    pub notes: Option<String>,
}

impl Command for ApproveFeedback {
    fn command_type(&self) -> &'static str {
        "feedback.approve_feedback"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to reject pending feedback.
#[derive(Debug, Clone)]
pub struct RejectFeedback {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The feedback identifier.
    pub feedback_id: Uuid,
    /// Moderator notes; required.
    pub notes: Option<String>,
}

impl Command for RejectFeedback {
    fn command_type(&self) -> &'static str {
        "feedback.reject_feedback"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to delete feedback.
#[derive(Debug, Clone)]
pub struct DeleteFeedback {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The feedback identifier.
    pub feedback_id: Uuid,
}

impl Command for DeleteFeedback {
    fn command_type(&self) -> &'static str {
        "feedback.delete_feedback"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}
