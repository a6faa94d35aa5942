//! Event service.

use usergraph_types::error::{EventError, RepositoryError};
use usergraph_types::event::{CreateEventRequest, Event};
use usergraph_types::id::{EventId, UserId};

use crate::repository::event::EventRepository;
use crate::repository::skill::SkillRepository;
use crate::repository::user::UserRepository;
use crate::service::skill::all_skills_exist;

pub struct EventService<E: EventRepository, U: UserRepository, S: SkillRepository> {
    event_repo: E,
    user_repo: U,
    skill_repo: S,
}

impl<E: EventRepository, U: UserRepository, S: SkillRepository> EventService<E, U, S> {
    pub fn new(event_repo: E, user_repo: U, skill_repo: S) -> Self {
        Self {
            event_repo,
            user_repo,
            skill_repo,
        }
    }

    /// Validate and store an event. Related skills must all exist.
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event, EventError> {
        let event = request.validate().map_err(EventError::Invalid)?;

        let owner_exists = self
            .user_repo
            .exists(event.owner_id)
            .await
            .map_err(storage)?;
        if !owner_exists {
            return Err(EventError::OwnerNotFound(event.owner_id));
        }

        let skills_exist = all_skills_exist(&self.skill_repo, &event.related_skill_ids)
            .await
            .map_err(storage)?;
        if !skills_exist {
            return Err(EventError::Invalid(
                "event references unknown skills".to_string(),
            ));
        }

        let created = self.event_repo.create(&event).await.map_err(storage)?;
        tracing::info!(
            event_id = %created.id,
            owner_id = %created.owner_id,
            event_type = %created.event_type,
            "event created"
        );
        Ok(created)
    }

    pub async fn get_event(&self, id: EventId) -> Result<Event, EventError> {
        self.event_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(EventError::NotFound(id))
    }

    /// Events in id order, optionally restricted to one owner.
    pub async fn list_events(&self, owner_id: Option<UserId>) -> Result<Vec<Event>, EventError> {
        self.event_repo.list(owner_id).await.map_err(storage)
    }
}

fn storage(e: RepositoryError) -> EventError {
    EventError::StorageError(e.to_string())
}
