//! The content item and its workflow operations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillpoint_core::actor::Actor;
use stillpoint_core::clock::Clock;
use stillpoint_core::error::DomainError;
use stillpoint_core::policy::{Outcome, TransitionPolicy};
use stillpoint_core::repository::Document;
use uuid::Uuid;

use super::body::{ContentBody, ContentType};
use super::policy::{AUTHORS, ContentAction, ContentPolicy};

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Workflow status of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    PendingReview,
    Published,
    Archived,
}

impl ContentStatus {
    /// Every status.
    pub const ALL: [ContentStatus; 4] = [
        ContentStatus::Draft,
        ContentStatus::PendingReview,
        ContentStatus::Published,
        ContentStatus::Archived,
    ];

    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::PendingReview => "pending_review",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown content status: {s}")))
    }
}

/// Changes applied by an edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ContentChanges {
    /// New title.
    pub title: Option<String>,
    /// New body; must keep the content type.
    pub body: Option<ContentBody>,
    /// New featured flag.
    pub featured: Option<bool>,
}

/// A piece of site content moving through the review workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Document identifier.
    pub id: Uuid,
    pub(crate) title: String,
    pub(crate) body: ContentBody,
    pub(crate) status: ContentStatus,
    pub(crate) featured: bool,
    pub(crate) created_by: Uuid,
    #[serde(default)]
    pub(crate) rejection_reason: Option<String>,
    #[serde(default)]
    pub(crate) reviewed_by: Option<Uuid>,
    #[serde(default)]
    pub(crate) reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) published_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Document for Content {
    const COLLECTION: &'static str = "content";
    const KIND: &'static str = "content";

    fn document_id(&self) -> Uuid {
        self.id
    }
}

impl Content {
    /// Creates a new draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` if the actor may not author content,
    /// and `DomainError::Validation` if the title or body is incomplete.
    pub fn create(
        id: Uuid,
        title: &str,
        body: ContentBody,
        featured: bool,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        actor.require_any(AUTHORS, "create")?;
        let title = validate_title(title)?;
        body.validate()?;

        let now = clock.now();
        Ok(Self {
            id,
            title,
            body,
            status: ContentStatus::Draft,
            featured,
            created_by: actor.user_id,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            published_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &ContentBody {
        &self.body
    }

    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.body.content_type()
    }

    #[must_use]
    pub fn status(&self) -> ContentStatus {
        self.status
    }

    #[must_use]
    pub fn featured(&self) -> bool {
        self.featured
    }

    #[must_use]
    pub fn created_by(&self) -> Uuid {
        self.created_by
    }

    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    #[must_use]
    pub fn reviewed_by(&self) -> Option<Uuid> {
        self.reviewed_by
    }

    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn authorize(
        &self,
        action: ContentAction,
        actor: &Actor,
    ) -> Result<ContentStatus, DomainError> {
        match ContentPolicy::authorize(actor, action, self.status)? {
            Outcome::MoveTo(next) => Ok(next),
            Outcome::Remove => Ok(self.status),
        }
    }

    /// Edits a draft. The content type cannot change.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy, and
    /// `Validation` if the new title or body is invalid or the body changes
    /// type.
    pub fn edit(
        &mut self,
        changes: ContentChanges,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let next = self.authorize(ContentAction::Edit, actor)?;

        let title = changes.title.as_deref().map(validate_title).transpose()?;
        if let Some(body) = &changes.body {
            if body.content_type() != self.content_type() {
                return Err(DomainError::Validation(format!(
                    "content type is fixed at {}; got {}",
                    self.content_type(),
                    body.content_type()
                )));
            }
            body.validate()?;
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(featured) = changes.featured {
            self.featured = featured;
        }
        self.status = next;
        self.updated_at = clock.now();
        Ok(())
    }

    /// Submits a draft for review.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy.
    pub fn submit(&mut self, actor: &Actor, clock: &dyn Clock) -> Result<(), DomainError> {
        let next = self.authorize(ContentAction::Submit, actor)?;
        self.status = next;
        self.rejection_reason = None;
        self.updated_at = clock.now();
        Ok(())
    }

    /// Approves and publishes a submitted item.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy.
    pub fn approve(&mut self, actor: &Actor, clock: &dyn Clock) -> Result<(), DomainError> {
        let next = self.authorize(ContentAction::Approve, actor)?;
        let now = clock.now();
        self.status = next;
        self.rejection_reason = None;
        self.reviewed_by = Some(actor.user_id);
        self.reviewed_at = Some(now);
        self.published_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Sends a submitted item back to draft with a reason.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy, and
    /// `Validation` if the reason is missing or blank.
    pub fn reject(
        &mut self,
        reason: Option<&str>,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let next = self.authorize(ContentAction::Reject, actor)?;
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| DomainError::Validation("a rejection reason is required".to_owned()))?;

        let now = clock.now();
        self.status = next;
        self.rejection_reason = Some(reason.to_owned());
        self.reviewed_by = Some(actor.user_id);
        self.reviewed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Archives a draft or published item.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy.
    pub fn archive(&mut self, actor: &Actor, clock: &dyn Clock) -> Result<(), DomainError> {
        let next = self.authorize(ContentAction::Archive, actor)?;
        self.status = next;
        self.updated_at = clock.now();
        Ok(())
    }

    /// Sets the featured flag of a draft.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy.
    pub fn set_featured(
        &mut self,
        featured: bool,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.authorize(ContentAction::Feature, actor)?;
        self.featured = featured;
        self.updated_at = clock.now();
        Ok(())
    }

    /// Checks that the actor may delete this item.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` unless the actor is an admin.
    pub fn ensure_deletable(&self, actor: &Actor) -> Result<(), DomainError> {
        self.authorize(ContentAction::Delete, actor).map(|_| ())
    }
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation("title is required".to_owned()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_owned())
}
