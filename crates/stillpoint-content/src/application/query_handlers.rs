//! Query handlers for the content context.
//!
//! Admin views return whole documents; public views only ever expose
//! published items and omit moderation details.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillpoint_core::actor::{Actor, Role};
use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{Criteria, DocumentRepository, load_existing};
use uuid::Uuid;

use crate::domain::aggregates::{Content, ContentStatus};
use crate::domain::body::{ContentBody, ContentType};
use crate::domain::policy::STAFF;

/// Status selection for admin listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StatusFilter {
    /// Every status.
    All,
    /// A single status.
    Only(ContentStatus),
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Filters for the admin content listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentFilter {
    /// Explicit status selection. Reviewers default to `pending_review`
    /// when this is absent.
    pub status: Option<StatusFilter>,
    /// Restrict to one content type.
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    /// Restrict by featured flag.
    pub featured: Option<bool>,
}

/// The status a listing actually filters on for `role`.
#[must_use]
pub fn effective_status(role: Role, requested: Option<StatusFilter>) -> Option<ContentStatus> {
    match requested {
        Some(StatusFilter::All) => None,
        Some(StatusFilter::Only(status)) => Some(status),
        None if role == Role::ContentReviewer => Some(ContentStatus::PendingReview),
        None => None,
    }
}

/// Lists content for the admin panel, newest changes first.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` for non-staff actors, or any repository
/// error.
pub async fn list_content(
    filter: &ContentFilter,
    actor: &Actor,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Vec<Content>, DomainError> {
    actor.require_any(STAFF, "list_content")?;

    let criteria = Criteria::new()
        .eq_opt(
            "status",
            effective_status(actor.role, filter.status).map(ContentStatus::as_str),
        )
        .eq_opt("body.type", filter.content_type.map(ContentType::as_str))
        .eq_opt("featured", filter.featured);

    let mut items = repo.find_matching(&criteria).await?;
    items.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
    Ok(items)
}

/// Retrieves one content item for the admin panel.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` for non-staff actors and
/// `DomainError::NotFound` if the item does not exist.
pub async fn get_content(
    content_id: Uuid,
    actor: &Actor,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Content, DomainError> {
    actor.require_any(STAFF, "view_content")?;
    load_existing(repo, content_id).await
}

/// Read-only public view of a published item.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedContentView {
    /// The content identifier.
    pub id: Uuid,
    /// Title of the item.
    pub title: String,
    /// Type-specific payload.
    pub body: ContentBody,
    /// Whether the item is featured.
    pub featured: bool,
    /// When the item was published.
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Content> for PublishedContentView {
    fn from(content: Content) -> Self {
        Self {
            id: content.id,
            title: content.title,
            body: content.body,
            featured: content.featured,
            published_at: content.published_at,
        }
    }
}

/// Filters for the public content listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishedContentFilter {
    /// Restrict to one content type.
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    /// Restrict by featured flag.
    pub featured: Option<bool>,
}

/// Lists published content, most recently published first.
///
/// # Errors
///
/// Returns any repository error.
pub async fn list_published_content(
    filter: &PublishedContentFilter,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Vec<PublishedContentView>, DomainError> {
    let criteria = Criteria::new()
        .eq("status", ContentStatus::Published.as_str())
        .eq_opt("body.type", filter.content_type.map(ContentType::as_str))
        .eq_opt("featured", filter.featured);

    let mut items = repo.find_matching(&criteria).await?;
    items.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
    Ok(items.into_iter().map(PublishedContentView::from).collect())
}

/// Retrieves a published item. Unpublished items are reported as not found.
///
/// # Errors
///
/// Returns `DomainError::NotFound` unless the item exists and is published.
pub async fn get_published_content(
    content_id: Uuid,
    repo: &dyn DocumentRepository<Content>,
) -> Result<PublishedContentView, DomainError> {
    match repo.find_by_id(content_id).await? {
        Some(content) if content.status() == ContentStatus::Published => Ok(content.into()),
        _ => Err(DomainError::NotFound {
            kind: "content",
            id: content_id,
        }),
    }
}
