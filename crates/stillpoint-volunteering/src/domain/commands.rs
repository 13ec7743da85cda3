//! Commands for the volunteering context.

use std::collections::BTreeMap;

use stillpoint_core::actor::Actor;
use stillpoint_core::command::Command;
use uuid::Uuid;

use super::aggregates::{Applicant, CustomQuestion};

/// Command to create a volunteer opportunity.
#[derive(Debug, Clone)]
pub struct CreateOpportunity {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// Title of the opportunity.
    pub title: String,
    /// What the volunteer will do.
    pub description: String,
    /// Whether applications are accepted.
    pub is_active: bool,
    /// Custom questions asked of applicants.
    pub questions: Vec<CustomQuestion>,
}

impl Command for CreateOpportunity {
    fn command_type(&self) -> &'static str {
        "volunteering.create_opportunity"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to submit an application. Applicants need not be signed in.
#[derive(Debug, Clone)]
pub struct SubmitApplication {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The opportunity applied for.
    pub opportunity_id: Uuid,
    /// Contact details.
    pub applicant: Applicant,
    /// Free-form message.
    pub message: Option<String>,
    /// Answers keyed by question id.
    pub answers: BTreeMap<String, String>,
}

impl Command for SubmitApplication {
    fn command_type(&self) -> &'static str {
        "volunteering.submit_application"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        None
    }
}

/// Command to approve a pending application.
#[derive(Debug, Clone)]
pub struct ApproveApplication {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The application identifier.
    pub application_id: Uuid,
    /// Optional moderator notes.
    pub notes: Option<String>,
}

impl Command for ApproveApplication {
    fn command_type(&self) -> &'static str {
        "volunteering.approve_application"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to reject a pending application.
#[derive(Debug, Clone)]
pub struct RejectApplication {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The application identifier.
    pub application_id: Uuid,
    /// Why the application was rejected; required.
    pub notes: Option<String>,
}

impl Command for RejectApplication {
    fn command_type(&self) -> &'static str {
        "volunteering.reject_application"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to mark an approved applicant as contacted.
#[derive(Debug, Clone)]
pub struct ContactApplicant {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The application identifier.
    pub application_id: Uuid,
    /// Optional moderator notes.
    pub notes: Option<String>,
}

impl Command for ContactApplicant {
    fn command_type(&self) -> &'static str {
        "volunteering.contact_applicant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}

/// Command to delete an application.
#[derive(Debug, Clone)]
pub struct DeleteApplication {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The actor issuing the command.
    pub actor: Actor,
    /// The application identifier.
    pub application_id: Uuid,
}

impl Command for DeleteApplication {
    fn command_type(&self) -> &'static str {
        "volunteering.delete_application"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn actor(&self) -> Option<&Actor> {
        Some(&self.actor)
    }
}
