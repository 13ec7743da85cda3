//! Command handlers for the content context.
//!
//! Each handler loads the document, applies the workflow operation (which
//! authorizes the actor against `ContentPolicy`) and persists the result in a
//! single write.

use stillpoint_core::clock::Clock;
use stillpoint_core::command::Command;
use stillpoint_core::error::DomainError;
use stillpoint_core::repository::{DocumentRepository, load_existing};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::Content;
use crate::domain::commands::{
    ApproveContent, ArchiveContent, CreateContent, DeleteContent, EditContent, RejectContent,
    SetContentFeatured, SubmitContent,
};

/// Loads a content item, applies `mutate`, and saves it.
async fn update<C: Command>(
    command: &C,
    content_id: Uuid,
    repo: &dyn DocumentRepository<Content>,
    mutate: impl FnOnce(&mut Content) -> Result<(), DomainError> + Send,
) -> Result<Content, DomainError> {
    let mut content = load_existing(repo, content_id).await?;
    let from = content.status();

    mutate(&mut content)?;
    repo.save(&content).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        %content_id,
        %from,
        to = %content.status(),
        "content updated"
    );
    Ok(content)
}

/// Handles the `CreateContent` command: builds a new draft and persists it.
///
/// This is a CREATION command: the handler generates the `content_id`.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` for non-authors, `DomainError::Validation`
/// for incomplete input, or any persistence error.
pub async fn handle_create_content(
    command: &CreateContent,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Content, DomainError> {
    let content = Content::create(
        Uuid::new_v4(),
        &command.title,
        command.body.clone(),
        command.featured,
        &command.actor,
        clock,
    )?;
    repo.save(&content).await?;

    info!(
        correlation_id = %command.correlation_id,
        content_id = %content.id,
        content_type = %content.content_type(),
        "content created"
    );
    Ok(content)
}

/// Handles the `EditContent` command.
///
/// # Errors
///
/// Returns `DomainError` if the item is missing, the actor or status does not
/// allow editing, or the changes are invalid.
pub async fn handle_edit_content(
    command: &EditContent,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Content, DomainError> {
    update(command, command.content_id, repo, |content| {
        content.edit(command.changes.clone(), &command.actor, clock)
    })
    .await
}

/// Handles the `SubmitContent` command.
///
/// # Errors
///
/// Returns `DomainError` if the item is missing or the transition is refused.
pub async fn handle_submit_content(
    command: &SubmitContent,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Content, DomainError> {
    update(command, command.content_id, repo, |content| {
        content.submit(&command.actor, clock)
    })
    .await
}

/// Handles the `ApproveContent` command.
///
/// # Errors
///
/// Returns `DomainError` if the item is missing or the transition is refused.
pub async fn handle_approve_content(
    command: &ApproveContent,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Content, DomainError> {
    update(command, command.content_id, repo, |content| {
        content.approve(&command.actor, clock)
    })
    .await
}

/// Handles the `RejectContent` command.
///
/// # Errors
///
/// Returns `DomainError` if the item is missing, the transition is refused,
/// or no reason was given.
pub async fn handle_reject_content(
    command: &RejectContent,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Content, DomainError> {
    update(command, command.content_id, repo, |content| {
        content.reject(command.reason.as_deref(), &command.actor, clock)
    })
    .await
}

/// Handles the `ArchiveContent` command.
///
/// # Errors
///
/// Returns `DomainError` if the item is missing or the transition is refused.
pub async fn handle_archive_content(
    command: &ArchiveContent,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Content, DomainError> {
    update(command, command.content_id, repo, |content| {
        content.archive(&command.actor, clock)
    })
    .await
}

/// Handles the `SetContentFeatured` command.
///
/// # Errors
///
/// Returns `DomainError` if the item is missing, the actor may not feature
/// content, or the item is no longer a draft.
pub async fn handle_set_content_featured(
    command: &SetContentFeatured,
    clock: &dyn Clock,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Content, DomainError> {
    update(command, command.content_id, repo, |content| {
        content.set_featured(command.featured, &command.actor, clock)
    })
    .await
}

/// Handles the `DeleteContent` command. Returns the deleted identifier.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the item is missing and
/// `DomainError::Forbidden` unless the actor is an admin.
pub async fn handle_delete_content(
    command: &DeleteContent,
    repo: &dyn DocumentRepository<Content>,
) -> Result<Uuid, DomainError> {
    let content = load_existing(repo, command.content_id).await?;
    content.ensure_deletable(&command.actor)?;

    if !repo.delete(command.content_id).await? {
        return Err(DomainError::NotFound {
            kind: "content",
            id: command.content_id,
        });
    }

    info!(
        correlation_id = %command.correlation_id,
        content_id = %command.content_id,
        status = %content.status(),
        "content deleted"
    );
    Ok(command.content_id)
}
