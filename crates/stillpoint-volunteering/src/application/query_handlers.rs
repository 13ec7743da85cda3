//! Query handlers for the volunteering context.

use serde::{Deserialize, Serialize};
use stillpoint_core::actor::{Actor, Role};
use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{Criteria, DocumentRepository, load_existing};
use uuid::Uuid;

use crate::domain::aggregates::{
    ApplicationStatus, CustomQuestion, VolunteerApplication, VolunteerOpportunity,
};

/// Public view of an opportunity.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityView {
    /// The opportunity identifier.
    pub id: Uuid,
    /// Title of the opportunity.
    pub title: String,
    /// What the volunteer will do.
    pub description: String,
    /// Whether applications are accepted.
    pub is_active: bool,
    /// Questions the application form asks.
    pub questions: Vec<CustomQuestion>,
}

impl From<VolunteerOpportunity> for OpportunityView {
    fn from(opportunity: VolunteerOpportunity) -> Self {
        Self {
            id: opportunity.id,
            title: opportunity.title,
            description: opportunity.description,
            is_active: opportunity.is_active,
            questions: opportunity.questions,
        }
    }
}

/// Lists opportunities currently accepting applications, by title.
///
/// # Errors
///
/// Returns any repository error.
pub async fn list_active_opportunities(
    repo: &dyn DocumentRepository<VolunteerOpportunity>,
) -> Result<Vec<OpportunityView>, DomainError> {
    let mut opportunities = repo
        .find_matching(&Criteria::new().eq("is_active", true))
        .await?;
    opportunities.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(opportunities.into_iter().map(OpportunityView::from).collect())
}

/// Retrieves an opportunity by its ID.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no opportunity exists for the ID.
pub async fn get_opportunity(
    opportunity_id: Uuid,
    repo: &dyn DocumentRepository<VolunteerOpportunity>,
) -> Result<OpportunityView, DomainError> {
    load_existing(repo, opportunity_id).await.map(OpportunityView::from)
}

/// Filters for the application listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    /// Restrict to one status.
    pub status: Option<ApplicationStatus>,
    /// Restrict to one opportunity.
    pub opportunity_id: Option<Uuid>,
}

/// Lists applications for moderators, most recently submitted first.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` for non-moderators, or any repository
/// error.
pub async fn list_applications(
    filter: &ApplicationFilter,
    actor: &Actor,
    repo: &dyn DocumentRepository<VolunteerApplication>,
) -> Result<Vec<VolunteerApplication>, DomainError> {
    actor.require_any(&Role::MODERATORS, "list_applications")?;

    let criteria = Criteria::new()
        .eq_opt("status", filter.status.map(ApplicationStatus::as_str))
        .eq_opt(
            "opportunity_id",
            filter.opportunity_id.map(|id| id.to_string()),
        );

    let mut applications = repo.find_matching(&criteria).await?;
    applications.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(applications)
}

/// Retrieves one application for a moderator.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` for non-moderators and
/// `DomainError::NotFound` if the application does not exist.
pub async fn get_application(
    application_id: Uuid,
    actor: &Actor,
    repo: &dyn DocumentRepository<VolunteerApplication>,
) -> Result<VolunteerApplication, DomainError> {
    actor.require_any(&Role::MODERATORS, "view_application")?;
    load_existing(repo, application_id).await
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Duration;
    use stillpoint_core::repository::DocumentRepository;
    use stillpoint_test_support::{
        FixedClock, MemoryDocumentStore, admin, content_reviewer, fixed_now, member,
    };

    use super::*;
    use crate::domain::aggregates::Applicant;

    async fn seed_opportunity(
        store: &MemoryDocumentStore,
        title: &str,
        active: bool,
    ) -> VolunteerOpportunity {
        let opportunity = VolunteerOpportunity::create(
            Uuid::new_v4(),
            title,
            "",
            active,
            vec![],
            &admin(),
            &FixedClock(fixed_now()),
        )
        .unwrap();
        store.save(&opportunity).await.unwrap();
        opportunity
    }

    async fn seed_application(
        store: &MemoryDocumentStore,
        opportunity: &VolunteerOpportunity,
        hours_later: i64,
    ) -> VolunteerApplication {
        let application = VolunteerApplication::submit(
            Uuid::new_v4(),
            opportunity,
            Applicant {
                name: "Ana".to_owned(),
                email: "ana@example.org".to_owned(),
                phone: None,
            },
            None,
            BTreeMap::new(),
            &FixedClock(fixed_now() + Duration::hours(hours_later)),
        )
        .unwrap();
        store.save(&application).await.unwrap();
        application
    }

    #[tokio::test]
    async fn test_list_active_opportunities_hides_inactive() {
        let store = MemoryDocumentStore::new();
        seed_opportunity(&store, "Gardening", true).await;
        seed_opportunity(&store, "Archived role", false).await;
        seed_opportunity(&store, "Cooking", true).await;

        let views = list_active_opportunities(&store).await.unwrap();

        let titles: Vec<&str> = views.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Cooking", "Gardening"]);
    }

    #[tokio::test]
    async fn test_list_applications_filters_by_opportunity_and_status() {
        // Arrange
        let store = MemoryDocumentStore::new();
        let kitchen = seed_opportunity(&store, "Kitchen", true).await;
        let garden = seed_opportunity(&store, "Garden", true).await;
        let older = seed_application(&store, &kitchen, 0).await;
        let newer = seed_application(&store, &kitchen, 1).await;
        seed_application(&store, &garden, 2).await;
        let filter = ApplicationFilter {
            status: Some(ApplicationStatus::Pending),
            opportunity_id: Some(kitchen.id),
        };

        // Act
        let applications = list_applications(&filter, &content_reviewer(), &store)
            .await
            .unwrap();

        // Assert
        let ids: Vec<Uuid> = applications.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_list_applications_forbidden_for_members() {
        let store = MemoryDocumentStore::new();

        let result = list_applications(&ApplicationFilter::default(), &member(), &store).await;

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_get_application_not_found() {
        let store = MemoryDocumentStore::new();

        let result = get_application(Uuid::new_v4(), &admin(), &store).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
