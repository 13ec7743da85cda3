//! Command handlers for the volunteering context.

use stillpoint_core::clock::Clock;
use stillpoint_core::command::Command;
use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{DocumentRepository, load_existing};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{VolunteerApplication, VolunteerOpportunity};
use crate::domain::commands::{
    ApproveApplication, ContactApplicant, CreateOpportunity, DeleteApplication, RejectApplication,
    SubmitApplication,
};

/// Handles the `CreateOpportunity` command.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` or `DomainError::Validation` from the
/// domain, or any persistence error.
pub async fn handle_create_opportunity(
    command: &CreateOpportunity,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<VolunteerOpportunity>,
) -> Result<VolunteerOpportunity, DomainError> {
    let opportunity = VolunteerOpportunity::create(
        Uuid::new_v4(),
        &command.title,
        &command.description,
        command.is_active,
        command.questions.clone(),
        &command.actor,
        clock,
    )?;
    repo.save(&opportunity).await?;

    info!(
        correlation_id = %command.correlation_id,
        opportunity_id = %opportunity.id,
        "volunteer opportunity created"
    );
    Ok(opportunity)
}

/// Handles the `SubmitApplication` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the opportunity does not exist and
/// `DomainError::Validation` if the application does not fit it.
pub async fn handle_submit_application(
    command: &SubmitApplication,
    clock: &dyn Clock,
    opportunities: &dyn DocumentRepository<VolunteerOpportunity>,
    applications: &dyn DocumentRepository<VolunteerApplication>,
) -> Result<VolunteerApplication, DomainError> {
    let opportunity = load_existing(opportunities, command.opportunity_id).await?;
    let application = VolunteerApplication::submit(
        Uuid::new_v4(),
        &opportunity,
        command.applicant.clone(),
        command.message.clone(),
        command.answers.clone(),
        clock,
    )?;
    applications.save(&application).await?;

    info!(
        correlation_id = %command.correlation_id,
        application_id = %application.id,
        opportunity_id = %opportunity.id,
        "volunteer application submitted"
    );
    Ok(application)
}

async fn update<C: Command>(
    command: &C,
    application_id: Uuid,
    repo: &dyn DocumentRepository<VolunteerApplication>,
    mutate: impl FnOnce(&mut VolunteerApplication) -> Result<(), DomainError> + Send,
) -> Result<VolunteerApplication, DomainError> {
    let mut application = load_existing(repo, application_id).await?;
    let from = application.status();

    mutate(&mut application)?;
    repo.save(&application).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        %application_id,
        %from,
        to = %application.status(),
        "volunteer application updated"
    );
    Ok(application)
}

/// Handles the `ApproveApplication` command.
///
/// # Errors
///
/// Returns `DomainError` if the application is missing or the transition is
/// refused.
pub async fn handle_approve_application(
    command: &ApproveApplication,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<VolunteerApplication>,
) -> Result<VolunteerApplication, DomainError> {
    update(command, command.application_id, repo, |application| {
        application.approve(command.notes.as_deref(), &command.actor, clock)
    })
    .await
}

/// Handles the `RejectApplication` command.
///
/// # Errors
///
/// Returns `DomainError` if the application is missing, the transition is
/// refused, or notes are missing.
pub async fn handle_reject_application(
    command: &RejectApplication,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<VolunteerApplication>,
) -> Result<VolunteerApplication, DomainError> {
    update(command, command.application_id, repo, |application| {
        application.reject(command.notes.as_deref(), &command.actor, clock)
    })
    .await
}

/// Handles the `ContactApplicant` command.
///
/// # Errors
///
/// Returns `DomainError` if the application is missing or not yet approved.
pub async fn handle_contact_applicant(
    command: &ContactApplicant,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<VolunteerApplication>,
) -> Result<VolunteerApplication, DomainError> {
    update(command, command.application_id, repo, |application| {
        application.mark_contacted(command.notes.as_deref(), &command.actor, clock)
    })
    .await
}

/// Handles the `DeleteApplication` command. Returns the deleted identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the application is missing and
/// `DomainError::Forbidden` unless the actor is an admin.
pub async fn handle_delete_application(
    command: &DeleteApplication,
    repo: &dyn DocumentRepository<VolunteerApplication>,
) -> Result<Uuid, DomainError> {
    let application = load_existing(repo, command.application_id).await?;
    application.ensure_deletable(&command.actor)?;

    if !repo.delete(command.application_id).await? {
        return Err(DomainError::NotFound {
            kind: "volunteer application",
            id: command.application_id,
        });
    }

    info!(
        correlation_id = %command.correlation_id,
        application_id = %command.application_id,
        "volunteer application deleted"
    );
    Ok(command.application_id)
}
