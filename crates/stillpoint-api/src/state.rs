//! Shared application state.

use std::sync::Arc;

use stillpoint_content::domain::aggregates::Content;
use stillpoint_core::clock::Clock;
use stillpoint_core::repository::DocumentRepository;
use stillpoint_feedback::domain::aggregates::{Event, EventFeedback};
use stillpoint_volunteering::domain::aggregates::{VolunteerApplication, VolunteerOpportunity};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp transitions.
    pub clock: Arc<dyn Clock>,
    /// Content items.
    pub content: Arc<dyn DocumentRepository<Content>>,
    /// Volunteer opportunities.
    pub opportunities: Arc<dyn DocumentRepository<VolunteerOpportunity>>,
    /// Volunteer applications.
    pub applications: Arc<dyn DocumentRepository<VolunteerApplication>>,
    /// Event catalog.
    pub events: Arc<dyn DocumentRepository<Event>>,
    /// Event feedback.
    pub feedback: Arc<dyn DocumentRepository<EventFeedback>>,
}

impl AppState {
    /// Create application state with every collection backed by `store`.
    #[must_use]
    pub fn new<S>(clock: Arc<dyn Clock>, store: S) -> Self
    where
        S: DocumentRepository<Content>
            + DocumentRepository<VolunteerOpportunity>
            + DocumentRepository<VolunteerApplication>
            + DocumentRepository<Event>
            + DocumentRepository<EventFeedback>
            + Clone
            + 'static,
    {
        Self {
            clock,
            content: Arc::new(store.clone()),
            opportunities: Arc::new(store.clone()),
            applications: Arc::new(store.clone()),
            events: Arc::new(store.clone()),
            feedback: Arc::new(store),
        }
    }
}
