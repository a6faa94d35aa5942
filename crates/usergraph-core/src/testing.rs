//! In-memory repository implementations shared by the service tests.
//!
//! One `InMemoryStore` implements every repository trait so a test can hand
//! clones of the same store to a service for each of its ports.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use usergraph_types::error::RepositoryError;
use usergraph_types::event::{Event, NewEvent};
use usergraph_types::id::{
    EventId, MentorshipRequestId, PremiumId, RecommendationId, RecommendationRequestId, SkillId,
    SkillOfferId, UserId,
};
use usergraph_types::mentorship::{CreateMentorshipRequest, MentorshipRequest};
use usergraph_types::premium::Premium;
use usergraph_types::recommendation::{
    CreateRecommendation, CreateRecommendationRequest, Recommendation, RecommendationRequest,
    SkillOffer,
};
use usergraph_types::request::RequestStatus;
use usergraph_types::skill::{AcquiredSkill, Skill};
use usergraph_types::user::{CreateUserRequest, User};

use crate::repository::event::EventRepository;
use crate::repository::mentorship::MentorshipRequestRepository;
use crate::repository::premium::PremiumRepository;
use crate::repository::recommendation::{
    RecommendationRepository, RecommendationRequestRepository,
};
use crate::repository::skill::SkillRepository;
use crate::repository::skill_offer::SkillOfferRepository;
use crate::repository::user::UserRepository;

#[derive(Default)]
struct Counters {
    user: i64,
    skill: i64,
    recommendation: i64,
    offer: i64,
    recommendation_request: i64,
    mentorship: i64,
    event: i64,
    premium: i64,
}

fn bump(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// A grant that happens between the service's lookup and its own `grant`.
pub(crate) enum GrantRace {
    /// Another caller stores the skill with these guarantors first.
    Winner(Vec<UserId>),
    /// The store reports a conflict but no association is readable.
    Phantom,
}

struct Grant {
    guarantor_ids: Vec<UserId>,
    acquired_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    ids: Counters,
    users: BTreeMap<UserId, User>,
    skills: BTreeMap<SkillId, Skill>,
    grants: BTreeMap<(UserId, SkillId), Grant>,
    grant_calls: usize,
    grant_race: Option<GrantRace>,
    recommendations: BTreeMap<RecommendationId, Recommendation>,
    recommendation_requests: BTreeMap<RecommendationRequestId, RecommendationRequest>,
    mentorship: BTreeMap<MentorshipRequestId, MentorshipRequest>,
    events: BTreeMap<EventId, Event>,
    premiums: BTreeMap<UserId, Premium>,
}

impl State {
    fn acquired(&self, skill_id: SkillId, user_id: UserId) -> Option<AcquiredSkill> {
        let grant = self.grants.get(&(user_id, skill_id))?;
        let skill = self.skills.get(&skill_id)?;
        Some(AcquiredSkill {
            skill: skill.clone(),
            user_id,
            guarantor_ids: grant.guarantor_ids.clone(),
            acquired_at: grant.acquired_at,
        })
    }

    fn grant(
        &mut self,
        skill_id: SkillId,
        user_id: UserId,
        guarantor_ids: &[UserId],
    ) -> Result<AcquiredSkill, RepositoryError> {
        if self.grants.contains_key(&(user_id, skill_id)) {
            return Err(RepositoryError::Conflict(format!(
                "user {user_id} already has skill {skill_id}"
            )));
        }
        if !self.skills.contains_key(&skill_id) {
            return Err(RepositoryError::NotFound);
        }
        self.grants.insert(
            (user_id, skill_id),
            Grant {
                guarantor_ids: guarantor_ids.to_vec(),
                acquired_at: Utc::now(),
            },
        );
        self.acquired(skill_id, user_id)
            .ok_or(RepositoryError::NotFound)
    }

    fn insert_user(&mut self, request: &CreateUserRequest) -> Result<User, RepositoryError> {
        let taken = self
            .users
            .values()
            .any(|u| u.username == request.username || u.email == request.email);
        if taken {
            return Err(RepositoryError::Conflict(format!(
                "username or email already taken: {}",
                request.username
            )));
        }
        let user = User {
            id: UserId(bump(&mut self.ids.user)),
            username: request.username.clone(),
            email: request.email.clone(),
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn insert_skill(&mut self, title: &str) -> Result<Skill, RepositoryError> {
        if self.skills.values().any(|s| s.title == title) {
            return Err(RepositoryError::Conflict(format!("skill '{title}' exists")));
        }
        let skill = Skill {
            id: SkillId(bump(&mut self.ids.skill)),
            title: title.to_string(),
            created_at: Utc::now(),
        };
        self.skills.insert(skill.id, skill.clone());
        Ok(skill)
    }

    fn insert_recommendation(&mut self, rec: &CreateRecommendation) -> Recommendation {
        let id = RecommendationId(bump(&mut self.ids.recommendation));
        let mut skill_offers = Vec::with_capacity(rec.skill_ids.len());
        for skill_id in &rec.skill_ids {
            skill_offers.push(SkillOffer {
                id: SkillOfferId(bump(&mut self.ids.offer)),
                skill_id: *skill_id,
                recommendation_id: id,
                author_id: rec.author_id,
                receiver_id: rec.receiver_id,
            });
        }
        let recommendation = Recommendation {
            id,
            author_id: rec.author_id,
            receiver_id: rec.receiver_id,
            content: rec.content.clone(),
            skill_offers,
            created_at: Utc::now(),
        };
        self.recommendations.insert(id, recommendation.clone());
        recommendation
    }

    fn offers(&self) -> impl Iterator<Item = &SkillOffer> {
        self.recommendations
            .values()
            .flat_map(|r| r.skill_offers.iter())
    }
}

/// Shared in-memory store. Clones see the same data.
#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Insert a user named `name` with a derived email.
    pub(crate) fn add_user(&self, name: &str) -> UserId {
        self.lock()
            .insert_user(&CreateUserRequest {
                username: name.to_string(),
                email: format!("{name}@example.com"),
            })
            .unwrap()
            .id
    }

    pub(crate) fn add_skill(&self, title: &str) -> SkillId {
        self.lock().insert_skill(title).unwrap().id
    }

    /// Store a recommendation offering `skills`, one offer each.
    pub(crate) fn add_recommendation(
        &self,
        author_id: UserId,
        receiver_id: UserId,
        skills: &[SkillId],
    ) -> RecommendationId {
        self.lock()
            .insert_recommendation(&CreateRecommendation {
                author_id,
                receiver_id,
                content: "recommended".to_string(),
                skill_ids: skills.to_vec(),
            })
            .id
    }

    pub(crate) fn find_user_skill_sync(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> Option<AcquiredSkill> {
        self.lock().acquired(skill_id, user_id)
    }

    /// Grant directly, bypassing the acquisition rule and the call counter.
    pub(crate) fn grant_sync(&self, skill_id: SkillId, user_id: UserId, guarantors: &[UserId]) {
        self.lock().grant(skill_id, user_id, guarantors).unwrap();
    }

    /// Arm a race for the next `SkillRepository::grant` call.
    pub(crate) fn race_next_grant(&self, race: GrantRace) {
        self.lock().grant_race = Some(race);
    }

    /// Number of times `SkillRepository::grant` was invoked.
    pub(crate) fn grant_calls(&self) -> usize {
        self.lock().grant_calls
    }
}

impl UserRepository for InMemoryStore {
    async fn create(&self, request: &CreateUserRequest) -> Result<User, RepositoryError> {
        self.lock().insert_user(request)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        Ok(self.lock().users.contains_key(&id))
    }
}

impl SkillRepository for InMemoryStore {
    async fn create(&self, title: &str) -> Result<Skill, RepositoryError> {
        self.lock().insert_skill(title)
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool, RepositoryError> {
        Ok(self.lock().skills.values().any(|s| s.title == title))
    }

    async fn get_by_id(&self, id: SkillId) -> Result<Option<Skill>, RepositoryError> {
        Ok(self.lock().skills.get(&id).cloned())
    }

    async fn count_existing(&self, ids: &[SkillId]) -> Result<usize, RepositoryError> {
        let state = self.lock();
        Ok(ids.iter().filter(|id| state.skills.contains_key(id)).count())
    }

    async fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Skill>, RepositoryError> {
        let state = self.lock();
        let mut skills: Vec<Skill> = state
            .grants
            .keys()
            .filter(|(holder, _)| *holder == user_id)
            .filter_map(|(_, skill_id)| state.skills.get(skill_id).cloned())
            .collect();
        skills.sort_by_key(|s| s.id);
        Ok(skills)
    }

    async fn find_offered_to_user(&self, user_id: UserId) -> Result<Vec<Skill>, RepositoryError> {
        let state = self.lock();
        Ok(state
            .offers()
            .filter(|o| o.receiver_id == user_id)
            .filter_map(|o| state.skills.get(&o.skill_id).cloned())
            .collect())
    }

    async fn find_user_skill(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> Result<Option<AcquiredSkill>, RepositoryError> {
        Ok(self.lock().acquired(skill_id, user_id))
    }

    async fn grant(
        &self,
        skill_id: SkillId,
        user_id: UserId,
        guarantor_ids: &[UserId],
    ) -> Result<AcquiredSkill, RepositoryError> {
        let mut state = self.lock();
        state.grant_calls += 1;
        match state.grant_race.take() {
            Some(GrantRace::Winner(winners)) => {
                state.grant(skill_id, user_id, &winners)?;
            }
            Some(GrantRace::Phantom) => {
                return Err(RepositoryError::Conflict(format!(
                    "user {user_id} already has skill {skill_id}"
                )));
            }
            None => {}
        }
        state.grant(skill_id, user_id, guarantor_ids)
    }
}

impl SkillOfferRepository for InMemoryStore {
    async fn find_all_offers_of_skill(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> Result<Vec<SkillOffer>, RepositoryError> {
        let state = self.lock();
        let mut offers: Vec<SkillOffer> = state
            .offers()
            .filter(|o| o.skill_id == skill_id && o.receiver_id == user_id)
            .cloned()
            .collect();
        offers.sort_by_key(|o| o.id);
        Ok(offers)
    }
}

impl RecommendationRepository for InMemoryStore {
    async fn create(
        &self,
        recommendation: &CreateRecommendation,
    ) -> Result<Recommendation, RepositoryError> {
        Ok(self.lock().insert_recommendation(recommendation))
    }

    async fn get_by_id(
        &self,
        id: RecommendationId,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        Ok(self.lock().recommendations.get(&id).cloned())
    }

    async fn list_by_receiver(
        &self,
        receiver_id: UserId,
    ) -> Result<Vec<Recommendation>, RepositoryError> {
        Ok(self
            .lock()
            .recommendations
            .values()
            .filter(|r| r.receiver_id == receiver_id)
            .cloned()
            .collect())
    }
}

impl RecommendationRequestRepository for InMemoryStore {
    async fn create(
        &self,
        request: &CreateRecommendationRequest,
    ) -> Result<RecommendationRequest, RepositoryError> {
        let mut state = self.lock();
        let now = Utc::now();
        let created = RecommendationRequest {
            id: RecommendationRequestId(bump(&mut state.ids.recommendation_request)),
            requester_id: request.requester_id,
            receiver_id: request.receiver_id,
            message: request.message.clone(),
            status: RequestStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };
        state.recommendation_requests.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(
        &self,
        id: RecommendationRequestId,
    ) -> Result<Option<RecommendationRequest>, RepositoryError> {
        Ok(self.lock().recommendation_requests.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<RecommendationRequest>, RepositoryError> {
        Ok(self
            .lock()
            .recommendation_requests
            .values()
            .cloned()
            .collect())
    }

    async fn transition(
        &self,
        id: RecommendationRequestId,
        from: RequestStatus,
        to: RequestStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<RecommendationRequest>, RepositoryError> {
        let mut state = self.lock();
        let Some(request) = state.recommendation_requests.get_mut(&id) else {
            return Ok(None);
        };
        if request.status != from {
            return Ok(None);
        }
        request.status = to;
        request.rejection_reason = rejection_reason.map(str::to_string);
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }
}

impl MentorshipRequestRepository for InMemoryStore {
    async fn create(
        &self,
        request: &CreateMentorshipRequest,
    ) -> Result<MentorshipRequest, RepositoryError> {
        let mut state = self.lock();
        let now = Utc::now();
        let created = MentorshipRequest {
            id: MentorshipRequestId(bump(&mut state.ids.mentorship)),
            requester_id: request.requester_id,
            receiver_id: request.receiver_id,
            description: request.description.clone(),
            status: RequestStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };
        state.mentorship.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(
        &self,
        id: MentorshipRequestId,
    ) -> Result<Option<MentorshipRequest>, RepositoryError> {
        Ok(self.lock().mentorship.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<MentorshipRequest>, RepositoryError> {
        Ok(self.lock().mentorship.values().cloned().collect())
    }

    async fn transition(
        &self,
        id: MentorshipRequestId,
        from: RequestStatus,
        to: RequestStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<MentorshipRequest>, RepositoryError> {
        let mut state = self.lock();
        let Some(request) = state.mentorship.get_mut(&id) else {
            return Ok(None);
        };
        if request.status != from {
            return Ok(None);
        }
        request.status = to;
        request.rejection_reason = rejection_reason.map(str::to_string);
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }
}

impl EventRepository for InMemoryStore {
    async fn create(&self, event: &NewEvent) -> Result<Event, RepositoryError> {
        let mut state = self.lock();
        let created = Event {
            id: EventId(bump(&mut state.ids.event)),
            title: event.title.clone(),
            description: event.description.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            location: event.location.clone(),
            max_attendees: event.max_attendees,
            owner_id: event.owner_id,
            related_skill_ids: event.related_skill_ids.clone(),
            event_type: event.event_type,
            status: event.status,
            created_at: Utc::now(),
        };
        state.events.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, RepositoryError> {
        Ok(self.lock().events.get(&id).cloned())
    }

    async fn list(&self, owner_id: Option<UserId>) -> Result<Vec<Event>, RepositoryError> {
        Ok(self
            .lock()
            .events
            .values()
            .filter(|e| owner_id.is_none_or(|owner| e.owner_id == owner))
            .cloned()
            .collect())
    }
}

impl PremiumRepository for InMemoryStore {
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Premium>, RepositoryError> {
        Ok(self.lock().premiums.get(&user_id).cloned())
    }

    async fn upsert(
        &self,
        user_id: UserId,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Premium, RepositoryError> {
        let mut state = self.lock();
        let existing = state.premiums.get(&user_id).map(|p| p.id);
        let id = match existing {
            Some(id) => id,
            None => PremiumId(bump(&mut state.ids.premium)),
        };
        let premium = Premium {
            id,
            user_id,
            start_date,
            end_date,
        };
        state.premiums.insert(user_id, premium.clone());
        Ok(premium)
    }
}
