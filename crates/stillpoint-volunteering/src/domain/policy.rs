//! Transition rules for volunteer applications.

use std::fmt;

use stillpoint_core::actor::Role;
use stillpoint_core::policy::{Outcome, TransitionPolicy};

use super::aggregates::ApplicationStatus;

/// Roles that may create opportunities.
pub const ORGANIZERS: &[Role] = &[Role::Admin, Role::ContentManager];

const ADMINS: &[Role] = &[Role::Admin];

/// Actions a moderator can take on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationAction {
    Approve,
    Reject,
    Contact,
    Delete,
}

impl fmt::Display for ApplicationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApplicationAction::Approve => "approve",
            ApplicationAction::Reject => "reject",
            ApplicationAction::Contact => "contact",
            ApplicationAction::Delete => "delete",
        })
    }
}

/// pending → approved | rejected; approved → contacted.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationPolicy;

impl TransitionPolicy for ApplicationPolicy {
    type Action = ApplicationAction;
    type Status = ApplicationStatus;

    fn permitted_roles(action: ApplicationAction) -> &'static [Role] {
        match action {
            ApplicationAction::Approve | ApplicationAction::Reject | ApplicationAction::Contact => {
                &Role::MODERATORS
            }
            ApplicationAction::Delete => ADMINS,
        }
    }

    fn outcome(
        action: ApplicationAction,
        from: ApplicationStatus,
    ) -> Option<Outcome<ApplicationStatus>> {
        use ApplicationStatus::{Approved, Contacted, Pending, Rejected};

        match (action, from) {
            (ApplicationAction::Approve, Pending) => Some(Outcome::MoveTo(Approved)),
            (ApplicationAction::Reject, Pending) => Some(Outcome::MoveTo(Rejected)),
            (ApplicationAction::Contact, Approved) => Some(Outcome::MoveTo(Contacted)),
            (ApplicationAction::Delete, _) => Some(Outcome::Remove),
            _ => None,
        }
    }
}
