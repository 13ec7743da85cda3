//! Events and the feedback attendees leave on them.

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

use super::policy::{FeedbackAction, FeedbackPolicy, ORGANIZERS};

/// A scheduled event that attendees can give feedback on once it is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Document identifier.
    pub id: Uuid,
    pub(crate) title: String,
    pub(crate) location: String,
    pub(crate) starts_at: DateTime<Utc>,
    pub(crate) ends_at: DateTime<Utc>,
    pub(crate) created_by: Uuid,
    pub(crate) created_at: DateTime<Utc>,
}

impl Document for Event {
    const COLLECTION: &'static str = "events";
    const KIND: &'static str = "event";

    fn document_id(&self) -> Uuid {
        self.id
    }
}

impl Event {
    /// Adds an event to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` unless the actor is an admin or
    /// content manager, and `DomainError::Validation` for a blank title or
    /// an `ends_at` that is not after `starts_at`.
    pub fn create(
        id: Uuid,
        title: &str,
        location: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        actor.require_any(ORGANIZERS, "create_event")?;

        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("title is required".to_owned()));
        }
        if ends_at <= starts_at {
            return Err(DomainError::Validation(
                "event must end after it starts".to_owned(),
            ));
        }

        Ok(Self {
            id,
            title: title.to_owned(),
            location: location.trim().to_owned(),
            starts_at,
            ends_at,
            created_by: actor.user_id,
            created_at: clock.now(),
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    #[must_use]
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Whether the event is over at `now`.
    #[must_use]
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.ends_at
    }
}

/// The three kinds of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Video,
    Comment,
    Photo,
}

impl FeedbackKind {
    /// Every kind.
    pub const ALL: [FeedbackKind; 3] = [
        FeedbackKind::Video,
        FeedbackKind::Comment,
        FeedbackKind::Photo,
    ];

    /// Returns the wire name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Video => "video",
            FeedbackKind::Comment => "comment",
            FeedbackKind::Photo => "photo",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedbackKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown feedback kind: {s}")))
    }
}

/// Kind-specific payload. The tag makes exactly one payload present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackBody {
    Video { video_url: String },
    Comment { comment: String },
    Photo { photo_url: String },
}

impl FeedbackBody {
    #[must_use]
    pub fn kind(&self) -> FeedbackKind {
        match self {
            FeedbackBody::Video { .. } => FeedbackKind::Video,
            FeedbackBody::Comment { .. } => FeedbackKind::Comment,
            FeedbackBody::Photo { .. } => FeedbackKind::Photo,
        }
    }

    fn payload(&self) -> &str {
        match self {
            FeedbackBody::Video { video_url } => video_url,
            FeedbackBody::Comment { comment } => comment,
            FeedbackBody::Photo { photo_url } => photo_url,
        }
    }

    /// Checks that the payload is not blank.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if it is.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.payload().trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "{} feedback needs a non-empty payload",
                self.kind()
            )));
        }
        Ok(())
    }
}

/// Moderation status of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Pending,
    Approved,
    Rejected,
}

impl FeedbackStatus {
    /// Every status.
    pub const ALL: [FeedbackStatus; 3] = [
        FeedbackStatus::Pending,
        FeedbackStatus::Approved,
        FeedbackStatus::Rejected,
    ];

    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::Approved => "approved",
            FeedbackStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedbackStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown feedback status: {s}")))
    }
}

/// Feedback an attendee left on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFeedback {
    /// Document identifier.
    pub id: Uuid,
    pub(crate) event_id: Uuid,
    pub(crate) author_id: Uuid,
    pub(crate) author_name: String,
    pub(crate) body: FeedbackBody,
    pub(crate) status: FeedbackStatus,
    #[serde(default)]
    pub(crate) moderator_notes: Option<String>,
    #[serde(default)]
    pub(crate) reviewed_by: Option<Uuid>,
    #[serde(default)]
    pub(crate) reviewed_at: Option<DateTime<Utc>>,
    pub(crate) submitted_at: DateTime<Utc>,
}

impl Document for EventFeedback {
    const COLLECTION: &'static str = "event_feedback";
    const KIND: &'static str = "feedback";

    fn document_id(&self) -> Uuid {
        self.id
    }
}

impl EventFeedback {
    /// Records feedback from `actor` on a finished event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the event has not ended yet, the
    /// author name is blank, or the payload is empty.
    pub fn submit(
        id: Uuid,
        event: &Event,
        author_name: &str,
        body: FeedbackBody,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        let now = clock.now();
        if !event.has_ended(now) {
            return Err(DomainError::Validation(format!(
                "feedback opens when event {} ends",
                event.id
            )));
        }
        let author_name = author_name.trim();
        if author_name.is_empty() {
            return Err(DomainError::Validation("author name is required".to_owned()));
        }
        body.validate()?;

        Ok(Self {
            id,
            event_id: event.id,
            author_id: actor.user_id,
            author_name: author_name.to_owned(),
            body,
            status: FeedbackStatus::Pending,
            moderator_notes: None,
            reviewed_by: None,
            reviewed_at: None,
            submitted_at: now,
        })
    }

    #[must_use]
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    #[must_use]
    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    #[must_use]
    pub fn body(&self) -> &FeedbackBody {
        &self.body
    }

    #[must_use]
    pub fn status(&self) -> FeedbackStatus {
        self.status
    }

    #[must_use]
    pub fn moderator_notes(&self) -> Option<&str> {
        self.moderator_notes.as_deref()
    }

    #[must_use]
    pub fn reviewed_by(&self) -> Option<Uuid> {
        self.reviewed_by
    }

    #[must_use]
    pub fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.reviewed_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    fn review(
        &mut self,
        next: FeedbackStatus,
        notes: Option<&str>,
        actor: &Actor,
        clock: &dyn Clock,
    ) {
        let notes = notes.map(str::trim).filter(|n| !n.is_empty());
        self.status = next;
        self.moderator_notes = notes.map(str::to_owned);
        self.reviewed_by = Some(actor.user_id);
        self.reviewed_at = Some(clock.now());
    }

    /// Approves pending feedback.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy.
    pub fn approve(
        &mut self,
        notes: Option<&str>,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if let Outcome::MoveTo(next) =
            FeedbackPolicy::authorize(actor, FeedbackAction::Approve, self.status)?
        {
            self.review(next, notes, actor, clock);
        }
        Ok(())
    }

    /// Rejects pending feedback. Notes are required.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy, and
    /// `Validation` if the notes are missing or blank.
    pub fn reject(
        &mut self,
        notes: Option<&str>,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let outcome = FeedbackPolicy::authorize(actor, FeedbackAction::Reject, self.status)?;
        if notes.is_none_or(|n| n.trim().is_empty()) {
            return Err(DomainError::Validation(
                "rejection notes are required".to_owned(),
            ));
        }
        if let Outcome::MoveTo(next) = outcome {
            self.review(next, notes, actor, clock);
        }
        Ok(())
    }

    /// Checks that the actor may delete this feedback.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` unless the actor is an admin.
    pub fn ensure_deletable(&self, actor: &Actor) -> Result<(), DomainError> {
        FeedbackPolicy::authorize(actor, FeedbackAction::Delete, self.status).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use stillpoint_test_support::{
        FixedClock, admin, content_manager, content_reviewer, fixed_now, member,
    };

    fn finished_event() -> Event {
        Event::create(
            Uuid::new_v4(),
            "Silent weekend",
            "Main hall",
            fixed_now() - Duration::days(2),
            fixed_now() - Duration::days(1),
            &admin(),
            &FixedClock(fixed_now() - Duration::days(10)),
        )
        .unwrap()
    }

    fn comment(text: &str) -> FeedbackBody {
        FeedbackBody::Comment {
            comment: text.to_owned(),
        }
    }

    fn pending_comment() -> EventFeedback {
        EventFeedback::submit(
            Uuid::new_v4(),
            &finished_event(),
            "Mira",
            comment("Deeply calming"),
            &member(),
            &FixedClock(fixed_now()),
        )
        .unwrap()
    }

    #[test]
    fn test_event_must_end_after_start() {
        let result = Event::create(
            Uuid::new_v4(),
            "Evening sit",
            "",
            fixed_now(),
            fixed_now(),
            &content_manager(),
            &FixedClock(fixed_now()),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_event_creation_forbidden_for_reviewer() {
        let result = Event::create(
            Uuid::new_v4(),
            "Evening sit",
            "",
            fixed_now(),
            fixed_now() + Duration::hours(1),
            &content_reviewer(),
            &FixedClock(fixed_now()),
        );

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[test]
    fn test_submit_records_author_and_starts_pending() {
        // Arrange
        let event = finished_event();
        let author = member();

        // Act
        let feedback = EventFeedback::submit(
            Uuid::new_v4(),
            &event,
            "  Mira ",
            comment("Deeply calming"),
            &author,
            &FixedClock(fixed_now()),
        )
        .unwrap();

        // Assert
        assert_eq!(feedback.status(), FeedbackStatus::Pending);
        assert_eq!(feedback.event_id(), event.id);
        assert_eq!(feedback.author_id(), author.user_id);
        assert_eq!(feedback.author_name, "Mira");
        assert_eq!(feedback.body().kind(), FeedbackKind::Comment);
    }

    #[test]
    fn test_submit_before_event_end_is_rejected() {
        let event = finished_event();
        let before_end = FixedClock(event.ends_at() - Duration::minutes(1));

        let result = EventFeedback::submit(
            Uuid::new_v4(),
            &event,
            "Mira",
            comment("Early"),
            &member(),
            &before_end,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_submit_exactly_at_event_end_is_allowed() {
        let event = finished_event();

        let result = EventFeedback::submit(
            Uuid::new_v4(),
            &event,
            "Mira",
            comment("Right on time"),
            &member(),
            &FixedClock(event.ends_at()),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_submit_rejects_blank_payload() {
        let result = EventFeedback::submit(
            Uuid::new_v4(),
            &finished_event(),
            "Mira",
            FeedbackBody::Photo {
                photo_url: "   ".to_owned(),
            },
            &member(),
            &FixedClock(fixed_now()),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_approve_by_content_manager_sets_reviewer() {
        // Arrange
        let mut feedback = pending_comment();
        let manager = content_manager();
        let later = fixed_now() + Duration::hours(3);

        // Act
        feedback.approve(None, &manager, &FixedClock(later)).unwrap();

        // Assert
        assert_eq!(feedback.status(), FeedbackStatus::Approved);
        assert_eq!(feedback.reviewed_by(), Some(manager.user_id));
        assert_eq!(feedback.reviewed_at(), Some(later));
    }

    #[test]
    fn test_reject_requires_notes_and_keeps_pending() {
        let mut feedback = pending_comment();

        let result = feedback.reject(Some(" "), &content_reviewer(), &FixedClock(fixed_now()));

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(feedback.status(), FeedbackStatus::Pending);
        assert_eq!(feedback.reviewed_by(), None);
    }

    #[test]
    fn test_reject_by_member_is_forbidden_before_notes_are_checked() {
        let mut feedback = pending_comment();

        let result = feedback.reject(None, &member(), &FixedClock(fixed_now()));

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[test]
    fn test_approve_after_reject_is_invalid_transition() {
        let mut feedback = pending_comment();
        let clock = FixedClock(fixed_now());
        feedback
            .reject(Some("Off topic"), &content_reviewer(), &clock)
            .unwrap();

        let result = feedback.approve(None, &admin(), &clock);

        assert!(matches!(result, Err(DomainError::InvalidTransition { .. })));
        assert_eq!(feedback.moderator_notes(), Some("Off topic"));
    }

    #[test]
    fn test_body_serializes_with_type_tag() {
        let json = serde_json::to_value(FeedbackBody::Video {
            video_url: "https://video.example.org/v".to_owned(),
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "video", "video_url": "https://video.example.org/v"})
        );
    }
}
