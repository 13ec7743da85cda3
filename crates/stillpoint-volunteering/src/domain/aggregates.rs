//! Volunteer opportunities and applications.

use std::collections::{BTreeMap, HashSet};
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

use super::policy::{ApplicationAction, ApplicationPolicy, ORGANIZERS};

/// A question an opportunity asks its applicants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomQuestion {
    /// Stable key that answers refer to.
    pub id: String,
    /// The question text.
    pub prompt: String,
    /// Whether an answer is mandatory.
    #[serde(default)]
    pub required: bool,
}

/// A volunteering role applicants can apply for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerOpportunity {
    /// Document identifier.
    pub id: Uuid,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) is_active: bool,
    pub(crate) questions: Vec<CustomQuestion>,
    pub(crate) created_by: Uuid,
    pub(crate) created_at: DateTime<Utc>,
}

impl Document for VolunteerOpportunity {
    const COLLECTION: &'static str = "volunteer_opportunities";
    const KIND: &'static str = "volunteer opportunity";

    fn document_id(&self) -> Uuid {
        self.id
    }
}

impl VolunteerOpportunity {
    /// Creates a new opportunity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` unless the actor is an admin or
    /// content manager, and `DomainError::Validation` for a blank title or
    /// malformed questions.
    pub fn create(
        id: Uuid,
        title: &str,
        description: &str,
        is_active: bool,
        questions: Vec<CustomQuestion>,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        actor.require_any(ORGANIZERS, "create_opportunity")?;

        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("title is required".to_owned()));
        }
        let mut seen = HashSet::new();
        for question in &questions {
            if question.id.trim().is_empty() || question.prompt.trim().is_empty() {
                return Err(DomainError::Validation(
                    "every question needs an id and a prompt".to_owned(),
                ));
            }
            if !seen.insert(question.id.as_str()) {
                return Err(DomainError::Validation(format!(
                    "duplicate question id: {}",
                    question.id
                )));
            }
        }

        Ok(Self {
            id,
            title: title.to_owned(),
            description: description.trim().to_owned(),
            is_active,
            questions,
            created_by: actor.user_id,
            created_at: clock.now(),
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn questions(&self) -> &[CustomQuestion] {
        &self.questions
    }

    /// Checks a set of answers against this opportunity's questions.
    fn check_answers(&self, answers: &BTreeMap<String, String>) -> Result<(), DomainError> {
        if let Some(unknown) = answers
            .keys()
            .find(|key| !self.questions.iter().any(|q| &q.id == *key))
        {
            return Err(DomainError::Validation(format!(
                "answer to unknown question: {unknown}"
            )));
        }
        if let Some(missing) = self.questions.iter().find(|q| {
            q.required && answers.get(&q.id).is_none_or(|a| a.trim().is_empty())
        }) {
            return Err(DomainError::Validation(format!(
                "question {} requires an answer",
                missing.id
            )));
        }
        Ok(())
    }
}

/// Moderation status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Contacted,
}

impl ApplicationStatus {
    /// Every status.
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Contacted,
    ];

    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Contacted => "contacted",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown application status: {s}")))
    }
}

/// Contact details of an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    /// Full name.
    pub name: String,
    /// Contact address; must contain `@`.
    pub email: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Applicant {
    fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("applicant name is required".to_owned()));
        }
        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid_email {
            return Err(DomainError::Validation(format!(
                "invalid email address: {email}"
            )));
        }
        Ok(())
    }
}

/// One entry of an application's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Status the application moved to.
    pub status: ApplicationStatus,
    /// Moderator who made the change.
    pub changed_by: Uuid,
    /// When the change happened.
    pub changed_at: DateTime<Utc>,
    /// Moderator notes, required for rejections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// An application to a volunteer opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerApplication {
    /// Document identifier.
    pub id: Uuid,
    pub(crate) opportunity_id: Uuid,
    pub(crate) applicant: Applicant,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) answers: BTreeMap<String, String>,
    pub(crate) status: ApplicationStatus,
    /// Append-only; one entry per transition.
    #[serde(default)]
    pub(crate) history: Vec<StatusChange>,
    pub(crate) submitted_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Document for VolunteerApplication {
    const COLLECTION: &'static str = "volunteer_applications";
    const KIND: &'static str = "volunteer application";

    fn document_id(&self) -> Uuid {
        self.id
    }
}

impl VolunteerApplication {
    /// Submits a new application. Always starts `pending` with an empty
    /// history.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the opportunity is closed, the
    /// applicant details are incomplete, or the answers do not fit the
    /// opportunity's questions.
    pub fn submit(
        id: Uuid,
        opportunity: &VolunteerOpportunity,
        applicant: Applicant,
        message: Option<String>,
        answers: BTreeMap<String, String>,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        if !opportunity.is_active() {
            return Err(DomainError::Validation(format!(
                "opportunity {} is not accepting applications",
                opportunity.id
            )));
        }
        applicant.validate()?;
        opportunity.check_answers(&answers)?;

        let now = clock.now();
        Ok(Self {
            id,
            opportunity_id: opportunity.id,
            applicant: Applicant {
                name: applicant.name.trim().to_owned(),
                email: applicant.email.trim().to_owned(),
                phone: applicant.phone,
            },
            message: message.filter(|m| !m.trim().is_empty()),
            answers,
            status: ApplicationStatus::Pending,
            history: Vec::new(),
            submitted_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub fn opportunity_id(&self) -> Uuid {
        self.opportunity_id
    }

    #[must_use]
    pub fn applicant(&self) -> &Applicant {
        &self.applicant
    }

    #[must_use]
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    #[must_use]
    pub fn history(&self) -> &[StatusChange] {
        &self.history
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Authorizes `action` and, if it moves the application, records the new
    /// status with exactly one history entry.
    fn transition(
        &mut self,
        action: ApplicationAction,
        notes: Option<&str>,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let Outcome::MoveTo(next) = ApplicationPolicy::authorize(actor, action, self.status)?
        else {
            return Ok(());
        };
        let now = clock.now();
        self.status = next;
        self.updated_at = now;
        self.history.push(StatusChange {
            status: next,
            changed_by: actor.user_id,
            changed_at: now,
            notes: notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
        });
        Ok(())
    }

    /// Approves a pending application.
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
        self.transition(ApplicationAction::Approve, notes, actor, clock)
    }

    /// Rejects a pending application. Notes are required.
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
        ApplicationPolicy::authorize(actor, ApplicationAction::Reject, self.status)?;
        if notes.is_none_or(|n| n.trim().is_empty()) {
            return Err(DomainError::Validation(
                "rejection notes are required".to_owned(),
            ));
        }
        self.transition(ApplicationAction::Reject, notes, actor, clock)
    }

    /// Marks an approved applicant as contacted.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`/`InvalidTransition` per the policy.
    pub fn mark_contacted(
        &mut self,
        notes: Option<&str>,
        actor: &Actor,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.transition(ApplicationAction::Contact, notes, actor, clock)
    }

    /// Checks that the actor may delete this application.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` unless the actor is an admin.
    pub fn ensure_deletable(&self, actor: &Actor) -> Result<(), DomainError> {
        ApplicationPolicy::authorize(actor, ApplicationAction::Delete, self.status).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use stillpoint_test_support::{
        FixedClock, admin, content_manager, content_reviewer, fixed_now, member,
    };

    fn opportunity(active: bool) -> VolunteerOpportunity {
        VolunteerOpportunity::create(
            Uuid::new_v4(),
            "Kitchen helper",
            "Help prepare retreat meals",
            active,
            vec![
                CustomQuestion {
                    id: "availability".to_owned(),
                    prompt: "Which weekends are you free?".to_owned(),
                    required: true,
                },
                CustomQuestion {
                    id: "experience".to_owned(),
                    prompt: "Any kitchen experience?".to_owned(),
                    required: false,
                },
            ],
            &content_manager(),
            &FixedClock(fixed_now()),
        )
        .unwrap()
    }

    fn applicant() -> Applicant {
        Applicant {
            name: "Mira Sen".to_owned(),
            email: "mira@example.org".to_owned(),
            phone: None,
        }
    }

    fn answers() -> BTreeMap<String, String> {
        BTreeMap::from([("availability".to_owned(), "First weekend".to_owned())])
    }

    fn pending() -> VolunteerApplication {
        VolunteerApplication::submit(
            Uuid::new_v4(),
            &opportunity(true),
            applicant(),
            None,
            answers(),
            &FixedClock(fixed_now()),
        )
        .unwrap()
    }

    #[test]
    fn test_submit_starts_pending_with_empty_history() {
        let application = pending();

        assert_eq!(application.status(), ApplicationStatus::Pending);
        assert!(application.history().is_empty());
        assert_eq!(application.submitted_at(), fixed_now());
    }

    #[test]
    fn test_submit_requires_required_answers() {
        let result = VolunteerApplication::submit(
            Uuid::new_v4(),
            &opportunity(true),
            applicant(),
            None,
            BTreeMap::from([("experience".to_owned(), "Some".to_owned())]),
            &FixedClock(fixed_now()),
        );

        match result.unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("availability")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_rejects_unknown_answers() {
        let mut answers = answers();
        answers.insert("shoe_size".to_owned(), "42".to_owned());

        let result = VolunteerApplication::submit(
            Uuid::new_v4(),
            &opportunity(true),
            applicant(),
            None,
            answers,
            &FixedClock(fixed_now()),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_submit_to_closed_opportunity_fails() {
        let result = VolunteerApplication::submit(
            Uuid::new_v4(),
            &opportunity(false),
            applicant(),
            None,
            answers(),
            &FixedClock(fixed_now()),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_submit_validates_email() {
        let result = VolunteerApplication::submit(
            Uuid::new_v4(),
            &opportunity(true),
            Applicant {
                email: "not-an-email".to_owned(),
                ..applicant()
            },
            None,
            answers(),
            &FixedClock(fixed_now()),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_email_needs_text_on_both_sides_of_at() {
        let submit = |email: &str| {
            VolunteerApplication::submit(
                Uuid::new_v4(),
                &opportunity(true),
                Applicant {
                    email: email.to_owned(),
                    ..applicant()
                },
                None,
                answers(),
                &FixedClock(fixed_now()),
            )
        };

        assert!(submit("a@localhost").is_ok());
        assert!(matches!(submit("@localhost"), Err(DomainError::Validation(_))));
        assert!(matches!(submit("a@"), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_each_transition_appends_one_history_entry() {
        // Arrange
        let mut application = pending();
        let reviewer = content_reviewer();
        let manager = content_manager();
        let later = fixed_now() + Duration::days(1);

        // Act
        application
            .approve(Some("Great fit"), &reviewer, &FixedClock(fixed_now()))
            .unwrap();
        application
            .mark_contacted(None, &manager, &FixedClock(later))
            .unwrap();

        // Assert
        assert_eq!(application.status(), ApplicationStatus::Contacted);
        let history = application.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, ApplicationStatus::Approved);
        assert_eq!(history[0].changed_by, reviewer.user_id);
        assert_eq!(history[0].notes.as_deref(), Some("Great fit"));
        assert_eq!(history[1].status, ApplicationStatus::Contacted);
        assert_eq!(history[1].changed_by, manager.user_id);
        assert_eq!(history[1].changed_at, later);
    }

    #[test]
    fn test_approving_twice_is_invalid_transition() {
        let mut application = pending();
        let clock = FixedClock(fixed_now());
        application.approve(None, &admin(), &clock).unwrap();

        let result = application.approve(None, &admin(), &clock);

        assert!(matches!(result, Err(DomainError::InvalidTransition { .. })));
        assert_eq!(application.history().len(), 1);
    }

    #[test]
    fn test_reject_requires_notes() {
        let mut application = pending();
        let clock = FixedClock(fixed_now());

        let result = application.reject(Some(" "), &content_reviewer(), &clock);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(application.history().is_empty());
        assert_eq!(application.status(), ApplicationStatus::Pending);
    }

    #[test]
    fn test_member_cannot_approve() {
        let mut application = pending();

        let result = application.approve(None, &member(), &FixedClock(fixed_now()));

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[test]
    fn test_opportunity_rejects_duplicate_question_ids() {
        let question = CustomQuestion {
            id: "q1".to_owned(),
            prompt: "Why?".to_owned(),
            required: false,
        };

        let result = VolunteerOpportunity::create(
            Uuid::new_v4(),
            "Gardener",
            "",
            true,
            vec![question.clone(), question],
            &admin(),
            &FixedClock(fixed_now()),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
