//! Query handlers for the feedback context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillpoint_core::actor::{Actor, Role};
use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{Criteria, DocumentRepository, load_existing};
use uuid::Uuid;

use crate::domain::aggregates::{
    Event, EventFeedback, FeedbackBody, FeedbackKind, FeedbackStatus,
};

/// Lists the event catalog, soonest first.
///
/// # Errors
///
/// Returns any repository error.
pub async fn list_events(repo: &dyn DocumentRepository<Event>) -> Result<Vec<Event>, DomainError> {
    let mut events = repo.find_matching(&Criteria::new()).await?;
    events.sort_by_key(Event::starts_at);
    Ok(events)
}

/// Retrieves an event by its ID.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no event exists for the ID.
pub async fn get_event(
    event_id: Uuid,
    repo: &dyn DocumentRepository<Event>,
) -> Result<Event, DomainError> {
    load_existing(repo, event_id).await
}

/// Filters for the moderation listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackFilter {
    /// Restrict to one status.
    pub status: Option<FeedbackStatus>,
    /// Restrict to one event.
    pub event_id: Option<Uuid>,
    /// Restrict to one kind.
    pub kind: Option<FeedbackKind>,
}

/// Lists feedback for moderators, most recently submitted first.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` for non-moderators, or any repository
/// error.
pub async fn list_feedback(
    filter: &FeedbackFilter,
    actor: &Actor,
    repo: &dyn DocumentRepository<EventFeedback>,
) -> Result<Vec<EventFeedback>, DomainError> {
    actor.require_any(&Role::MODERATORS, "list_feedback")?;

    let criteria = Criteria::new()
        .eq_opt("status", filter.status.map(FeedbackStatus::as_str))
        .eq_opt("event_id", filter.event_id.map(|id| id.to_string()))
        .eq_opt("body.type", filter.kind.map(FeedbackKind::as_str));

    let mut items = repo.find_matching(&criteria).await?;
    items.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));
    Ok(items)
}

/// Retrieves one feedback item for a moderator.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` for non-moderators and
/// `DomainError::NotFound` if the item does not exist.
pub async fn get_feedback(
    feedback_id: Uuid,
    actor: &Actor,
    repo: &dyn DocumentRepository<EventFeedback>,
) -> Result<EventFeedback, DomainError> {
    actor.require_any(&Role::MODERATORS, "view_feedback")?;
    load_existing(repo, feedback_id).await
}

/// Public view of approved feedback. Moderation details are left out.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedFeedbackView {
    pub id: Uuid,
    pub author_name: String,
    #[serde(flatten)]
    pub body: FeedbackBody,
    pub submitted_at: DateTime<Utc>,
}

impl From<EventFeedback> for PublishedFeedbackView {
    fn from(item: EventFeedback) -> Self {
        Self {
            id: item.id,
            author_name: item.author_name,
            body: item.body,
            submitted_at: item.submitted_at,
        }
    }
}

/// Lists approved feedback for an event, oldest first.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the event does not exist, or any
/// repository error.
pub async fn list_approved_feedback(
    event_id: Uuid,
    events: &dyn DocumentRepository<Event>,
    feedback: &dyn DocumentRepository<EventFeedback>,
) -> Result<Vec<PublishedFeedbackView>, DomainError> {
    load_existing(events, event_id).await?;

    let criteria = Criteria::new()
        .eq("event_id", event_id.to_string())
        .eq("status", FeedbackStatus::Approved.as_str());
    let mut items = feedback.find_matching(&criteria).await?;
    items.sort_by_key(EventFeedback::submitted_at);
    Ok(items.into_iter().map(PublishedFeedbackView::from).collect())
}
