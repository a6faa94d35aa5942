//! Event repository trait definition.

use usergraph_types::error::RepositoryError;
use usergraph_types::event::{Event, NewEvent};
use usergraph_types::id::{EventId, UserId};

/// Repository trait for event persistence.
pub trait EventRepository: Send + Sync {
    /// Insert the event and its related skill links in one transaction.
    fn create(
        &self,
        event: &NewEvent,
    ) -> impl std::future::Future<Output = Result<Event, RepositoryError>> + Send;

    /// Get an event by id.
    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl std::future::Future<Output = Result<Option<Event>, RepositoryError>> + Send;

    /// All events, or only those owned by `owner_id`.
    fn list(
        &self,
        owner_id: Option<UserId>,
    ) -> impl std::future::Future<Output = Result<Vec<Event>, RepositoryError>> + Send;
}
