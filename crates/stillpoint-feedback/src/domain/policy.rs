//! Transition rules for event feedback.

use std::fmt;

use stillpoint_core::actor::Role;
use stillpoint_core::policy::{Outcome, TransitionPolicy};

use super::aggregates::FeedbackStatus;

/// Roles that may add events to the catalog.
pub const ORGANIZERS: &[Role] = &[Role::Admin, Role::ContentManager];

const ADMINS: &[Role] = &[Role::Admin];

/// Actions a moderator can take on feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    Approve,
    Reject,
    Delete,
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeedbackAction::Approve => "approve",
            FeedbackAction::Reject => "reject",
            FeedbackAction::Delete => "delete",
        })
    }
}

/// pending → approved | rejected. Both outcomes are final.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackPolicy;

impl TransitionPolicy for FeedbackPolicy {
    type Action = FeedbackAction;
    type Status = FeedbackStatus;

    fn permitted_roles(action: FeedbackAction) -> &'static [Role] {
        match action {
            FeedbackAction::Approve | FeedbackAction::Reject => &Role::MODERATORS,
            FeedbackAction::Delete => ADMINS,
        }
    }

    fn outcome(action: FeedbackAction, from: FeedbackStatus) -> Option<Outcome<FeedbackStatus>> {
        match (action, from) {
            (FeedbackAction::Approve, FeedbackStatus::Pending) => {
                Some(Outcome::MoveTo(FeedbackStatus::Approved))
            }
            (FeedbackAction::Reject, FeedbackStatus::Pending) => {
                Some(Outcome::MoveTo(FeedbackStatus::Rejected))
            }
            (FeedbackAction::Delete, _) => Some(Outcome::Remove),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moderators_decide_pending_feedback() {
        for role in Role::MODERATORS {
            assert!(FeedbackPolicy::can_perform(
                role,
                FeedbackAction::Approve,
                FeedbackStatus::Pending
            ));
            assert!(FeedbackPolicy::can_perform(
                role,
                FeedbackAction::Reject,
                FeedbackStatus::Pending
            ));
        }
        assert!(!FeedbackPolicy::can_perform(
            Role::User,
            FeedbackAction::Approve,
            FeedbackStatus::Pending
        ));
    }

    #[test]
    fn test_decided_feedback_cannot_be_decided_again() {
        for status in [FeedbackStatus::Approved, FeedbackStatus::Rejected] {
            assert!(FeedbackPolicy::outcome(FeedbackAction::Approve, status).is_none());
            assert!(FeedbackPolicy::outcome(FeedbackAction::Reject, status).is_none());
        }
    }

    #[test]
    fn test_delete_is_admin_only_from_any_status() {
        for status in FeedbackStatus::ALL {
            assert!(FeedbackPolicy::can_perform(
                Role::Admin,
                FeedbackAction::Delete,
                status
            ));
            assert!(!FeedbackPolicy::can_perform(
                Role::ContentManager,
                FeedbackAction::Delete,
                status
            ));
        }
    }
}
