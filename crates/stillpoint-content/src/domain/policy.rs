//! Transition rules for content items.

use std::fmt;

use stillpoint_core::actor::Role;
use stillpoint_core::policy::{Outcome, TransitionPolicy};

use super::aggregates::ContentStatus;

/// Roles that author content.
pub const AUTHORS: &[Role] = &[Role::Admin, Role::ContentManager];

/// Roles that review submitted content.
pub const REVIEWERS: &[Role] = &[Role::Admin, Role::ContentReviewer];

/// Roles that may read the admin views of content.
pub const STAFF: &[Role] = &[Role::Admin, Role::ContentManager, Role::ContentReviewer];

const ADMINS: &[Role] = &[Role::Admin];

/// Actions that act on an existing content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAction {
    /// Change title, body or featured flag of a draft.
    Edit,
    /// Send a draft for review.
    Submit,
    /// Publish a submitted item.
    Approve,
    /// Return a submitted item to draft with a reason.
    Reject,
    /// Retire a draft or published item.
    Archive,
    /// Toggle the featured flag of a draft.
    Feature,
    /// Remove the item.
    Delete,
}

impl ContentAction {
    /// Returns the wire name of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentAction::Edit => "edit",
            ContentAction::Submit => "submit",
            ContentAction::Approve => "approve",
            ContentAction::Reject => "reject",
            ContentAction::Archive => "archive",
            ContentAction::Feature => "feature",
            ContentAction::Delete => "delete",
        }
    }
}

impl fmt::Display for ContentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The content workflow: draft → `pending_review` → published, with
/// rejection back to draft and admin-only archival and deletion.
#[derive(Debug, Clone, Copy)]
pub struct ContentPolicy;

impl TransitionPolicy for ContentPolicy {
    type Action = ContentAction;
    type Status = ContentStatus;

    fn permitted_roles(action: ContentAction) -> &'static [Role] {
        match action {
            ContentAction::Edit | ContentAction::Submit | ContentAction::Feature => AUTHORS,
            ContentAction::Approve | ContentAction::Reject => REVIEWERS,
            ContentAction::Archive | ContentAction::Delete => ADMINS,
        }
    }

    fn outcome(action: ContentAction, from: ContentStatus) -> Option<Outcome<ContentStatus>> {
        use ContentStatus::{Archived, Draft, PendingReview, Published};

        match (action, from) {
            (ContentAction::Edit | ContentAction::Feature, Draft) => Some(Outcome::MoveTo(Draft)),
            (ContentAction::Submit, Draft) => Some(Outcome::MoveTo(PendingReview)),
            (ContentAction::Approve, PendingReview) => Some(Outcome::MoveTo(Published)),
            (ContentAction::Reject, PendingReview) => Some(Outcome::MoveTo(Draft)),
            (ContentAction::Archive, Draft | Published) => Some(Outcome::MoveTo(Archived)),
            (ContentAction::Delete, _) => Some(Outcome::Remove),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillpoint_core::actor::Actor;
    use stillpoint_core::error::DomainError;
    use uuid::Uuid;

    const ALL_STATUSES: [ContentStatus; 4] = [
        ContentStatus::Draft,
        ContentStatus::PendingReview,
        ContentStatus::Published,
        ContentStatus::Archived,
    ];

    #[test]
    fn test_approve_applies_only_to_pending_review() {
        for status in ALL_STATUSES {
            let allowed =
                ContentPolicy::can_perform(Role::ContentReviewer, ContentAction::Approve, status);
            assert_eq!(
                allowed,
                status == ContentStatus::PendingReview,
                "status {status}"
            );
        }
    }

    #[test]
    fn test_delete_is_admin_only_from_any_status() {
        for status in ALL_STATUSES {
            for role in Role::ALL {
                let allowed = ContentPolicy::can_perform(role, ContentAction::Delete, status);
                assert_eq!(allowed, role == Role::Admin, "role {role}, status {status}");
            }
        }
    }

    #[test]
    fn test_managers_cannot_review_and_reviewers_cannot_submit() {
        assert!(!ContentPolicy::can_perform(
            Role::ContentManager,
            ContentAction::Approve,
            ContentStatus::PendingReview
        ));
        assert!(!ContentPolicy::can_perform(
            Role::ContentReviewer,
            ContentAction::Submit,
            ContentStatus::Draft
        ));
    }

    #[test]
    fn test_edit_blocked_once_submitted() {
        assert!(ContentPolicy::can_perform(
            Role::ContentManager,
            ContentAction::Edit,
            ContentStatus::Draft
        ));
        for status in [
            ContentStatus::PendingReview,
            ContentStatus::Published,
            ContentStatus::Archived,
        ] {
            assert!(!ContentPolicy::can_perform(Role::Admin, ContentAction::Edit, status));
        }
    }

    #[test]
    fn test_featuring_is_limited_to_drafts() {
        assert!(ContentPolicy::can_perform(
            Role::ContentManager,
            ContentAction::Feature,
            ContentStatus::Draft
        ));

        let manager = Actor::new(Uuid::new_v4(), Role::ContentManager);
        let result = ContentPolicy::authorize(
            &manager,
            ContentAction::Feature,
            ContentStatus::PendingReview,
        );

        assert!(matches!(result, Err(DomainError::InvalidTransition { .. })));
        assert!(!ContentPolicy::can_perform(
            Role::Admin,
            ContentAction::Feature,
            ContentStatus::Published
        ));
    }

    #[test]
    fn test_archive_from_draft_or_published() {
        assert_eq!(
            ContentPolicy::outcome(ContentAction::Archive, ContentStatus::Published),
            Some(Outcome::MoveTo(ContentStatus::Archived))
        );
        assert_eq!(
            ContentPolicy::outcome(ContentAction::Archive, ContentStatus::PendingReview),
            None
        );
    }

    #[test]
    fn test_regular_users_have_no_content_actions() {
        for status in ALL_STATUSES {
            for action in [
                ContentAction::Edit,
                ContentAction::Submit,
                ContentAction::Approve,
                ContentAction::Reject,
                ContentAction::Archive,
                ContentAction::Feature,
                ContentAction::Delete,
            ] {
                assert!(!ContentPolicy::can_perform(Role::User, action, status));
            }
        }
    }
}
