//! Command handlers for the feedback context.

use stillpoint_core::clock::Clock;
use stillpoint_core::command::Command;
use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{DocumentRepository, load_existing};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{Event, EventFeedback};
use crate::domain::commands::{
    ApproveFeedback, CreateEvent, DeleteFeedback, RejectFeedback, SubmitFeedback,
};

/// Handles the `CreateEvent` command.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` or `DomainError::Validation` from the
/// domain, or any persistence error.
pub async fn handle_create_event(
    command: &CreateEvent,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<Event>,
) -> Result<Event, DomainError> {
    let event = Event::create(
        Uuid::new_v4(),
        &command.title,
        &command.location,
        command.starts_at,
        command.ends_at,
        &command.actor,
        clock,
    )?;
    repo.save(&event).await?;

    info!(
        correlation_id = %command.correlation_id,
        event_id = %event.id,
        "event created"
    );
    Ok(event)
}

/// Handles the `SubmitFeedback` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the event does not exist and
/// `DomainError::Validation` if it has not ended or the feedback is
/// incomplete.
pub async fn handle_submit_feedback(
    command: &SubmitFeedback,
    clock: &dyn Clock,
    events: &dyn DocumentRepository<Event>,
    feedback: &dyn DocumentRepository<EventFeedback>,
) -> Result<EventFeedback, DomainError> {
    let event = load_existing(events, command.event_id).await?;
    let item = EventFeedback::submit(
        Uuid::new_v4(),
        &event,
        &command.author_name,
        command.body.clone(),
        &command.actor,
        clock,
    )?;
    feedback.save(&item).await?;

    info!(
        correlation_id = %command.correlation_id,
        feedback_id = %item.id,
        event_id = %event.id,
        kind = %item.body().kind(),
        "feedback submitted"
    );
    Ok(item)
}

async fn review<C: Command>(
    command: &C,
    feedback_id: Uuid,
    repo: &dyn DocumentRepository<EventFeedback>,
    mutate: impl FnOnce(&mut EventFeedback) -> Result<(), DomainError> + Send,
) -> Result<EventFeedback, DomainError> {
    let mut item = load_existing(repo, feedback_id).await?;
    let from = item.status();

    mutate(&mut item)?;
    repo.save(&item).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        %feedback_id,
        %from,
        to = %item.status(),
        "feedback reviewed"
    );
    Ok(item)
}

/// Handles the `ApproveFeedback` command.
///
/// # Errors
///
/// Returns `DomainError` if the feedback is missing or the transition is
/// refused.
pub async fn handle_approve_feedback(
    command: &ApproveFeedback,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<EventFeedback>,
) -> Result<EventFeedback, DomainError> {
    review(command, command.feedback_id, repo, |item| {
        item.approve(command.notes.as_deref(), &command.actor, clock)
    })
    .await
}

/// Handles the `RejectFeedback` command.
///
/// # Errors
///
/// Returns `DomainError` if the feedback is missing, the transition is
/// refused, or notes are missing.
pub async fn handle_reject_feedback(
    command: &RejectFeedback,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<EventFeedback>,
) -> Result<EventFeedback, DomainError> {
    review(command, command.feedback_id, repo, |item| {
        item.reject(command.notes.as_deref(), &command.actor, clock)
    })
    .await
}

/// Handles the `DeleteFeedback` command. Returns the deleted identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the feedback is missing and
/// `DomainError::Forbidden` unless the actor is an admin.
pub async fn handle_delete_feedback(
    command: &DeleteFeedback,
    repo: &dyn DocumentRepository<EventFeedback>,
) -> Result<Uuid, DomainError> {
    let item = load_existing(repo, command.feedback_id).await?;
    item.ensure_deletable(&command.actor)?;

    if !repo.delete(command.feedback_id).await? {
        return Err(DomainError::NotFound {
            kind: "feedback",
            id: command.feedback_id,
        });
    }

    info!(
        correlation_id = %command.correlation_id,
        feedback_id = %command.feedback_id,
        "feedback deleted"
    );
    Ok(command.feedback_id)
}
