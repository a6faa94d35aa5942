//! Skill catalogue and skill acquisition.
//!
//! A user acquires a skill once at least [`MIN_SKILL_OFFERS`] distinct
//! recommendation authors have offered it to them. The grant and the
//! guarantor records are written in one repository call so they either both
//! land or neither does.

use std::collections::{BTreeMap, HashSet};

use usergraph_types::error::{RepositoryError, SkillError};
use usergraph_types::id::{SkillId, UserId};
use usergraph_types::page::Page;
use usergraph_types::recommendation::SkillOffer;
use usergraph_types::skill::{
    AcquiredSkill, CreateSkillRequest, MIN_SKILL_OFFERS, Skill, SkillCandidate,
};

use crate::repository::skill::SkillRepository;
use crate::repository::skill_offer::SkillOfferRepository;
use crate::repository::user::UserRepository;

/// Service for the skill catalogue and the acquisition rule.
pub struct SkillService<S: SkillRepository, O: SkillOfferRepository, U: UserRepository> {
    skill_repo: S,
    offer_repo: O,
    user_repo: U,
}

impl<S: SkillRepository, O: SkillOfferRepository, U: UserRepository> SkillService<S, O, U> {
    pub fn new(skill_repo: S, offer_repo: O, user_repo: U) -> Self {
        Self {
            skill_repo,
            offer_repo,
            user_repo,
        }
    }

    /// Create a skill with a unique, non-blank title.
    pub async fn create(&self, request: CreateSkillRequest) -> Result<Skill, SkillError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(SkillError::InvalidTitle("title cannot be empty".to_string()));
        }

        let exists = self
            .skill_repo
            .exists_by_title(title)
            .await
            .map_err(storage)?;
        if exists {
            tracing::warn!(title, "rejected duplicate skill");
            return Err(SkillError::AlreadyExists(title.to_string()));
        }

        // The unique index still guards against a concurrent insert.
        let skill = self.skill_repo.create(title).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => SkillError::AlreadyExists(title.to_string()),
            other => storage(other),
        })?;

        tracing::info!(skill_id = %skill.id, title = %skill.title, "skill created");
        Ok(skill)
    }

    /// One page of the skills a user holds, in skill id order.
    pub async fn get_user_skills(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Skill>, SkillError> {
        self.ensure_user(user_id).await?;
        let skills = self
            .skill_repo
            .find_all_by_user(user_id)
            .await
            .map_err(storage)?;
        Ok(page.apply(skills))
    }

    /// One page of the skills offered to a user, grouped per skill with the
    /// number of offers naming it, in skill id order.
    pub async fn get_offered_skills(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<SkillCandidate>, SkillError> {
        self.ensure_user(user_id).await?;
        let offered = self
            .skill_repo
            .find_offered_to_user(user_id)
            .await
            .map_err(storage)?;
        Ok(page.apply(group_offers(offered)))
    }

    /// True when every id references a stored skill. An empty list is true.
    pub async fn are_existing_skills(&self, ids: &[SkillId]) -> Result<bool, SkillError> {
        all_skills_exist(&self.skill_repo, ids)
            .await
            .map_err(storage)
    }

    /// Return the user's existing association with the skill, or try to
    /// acquire it from the offers the user has received.
    ///
    /// Calling this again after a successful acquisition returns the stored
    /// association without touching the guarantors.
    pub async fn acquire_skill_from_offers(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> Result<AcquiredSkill, SkillError> {
        let existing = self
            .skill_repo
            .find_user_skill(skill_id, user_id)
            .await
            .map_err(storage)?;
        if let Some(acquired) = existing {
            tracing::debug!(%skill_id, %user_id, "skill already held");
            return Ok(acquired);
        }
        self.acquire_skill(skill_id, user_id).await
    }

    /// Grant the skill if enough distinct authors have offered it.
    pub async fn acquire_skill(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> Result<AcquiredSkill, SkillError> {
        self.skill_repo
            .get_by_id(skill_id)
            .await
            .map_err(storage)?
            .ok_or(SkillError::NotFound(skill_id))?;
        self.ensure_user(user_id).await?;

        let offers = self
            .offer_repo
            .find_all_offers_of_skill(skill_id, user_id)
            .await
            .map_err(storage)?;
        let guarantors = distinct_authors(&offers);

        if guarantors.len() < MIN_SKILL_OFFERS {
            tracing::warn!(
                %skill_id,
                %user_id,
                endorsers = guarantors.len(),
                "not enough skill offers to acquire skill"
            );
            return Err(SkillError::NotEnoughOffers {
                required: MIN_SKILL_OFFERS,
                actual: guarantors.len(),
            });
        }

        match self.skill_repo.grant(skill_id, user_id, &guarantors).await {
            Ok(acquired) => {
                tracing::info!(
                    %skill_id,
                    %user_id,
                    guarantors = acquired.guarantor_ids.len(),
                    "skill acquired"
                );
                Ok(acquired)
            }
            // Lost a race with a concurrent grant: the stored association wins.
            Err(RepositoryError::Conflict(_)) => self
                .skill_repo
                .find_user_skill(skill_id, user_id)
                .await
                .map_err(storage)?
                .ok_or_else(|| {
                    SkillError::StorageError(format!(
                        "grant of skill {skill_id} to user {user_id} conflicted but no association exists"
                    ))
                }),
            Err(e) => Err(storage(e)),
        }
    }

    async fn ensure_user(&self, user_id: UserId) -> Result<(), SkillError> {
        let exists = self.user_repo.exists(user_id).await.map_err(storage)?;
        if exists {
            Ok(())
        } else {
            Err(SkillError::UserNotFound(user_id))
        }
    }
}

/// True when every distinct id in `ids` references a stored skill.
pub(crate) async fn all_skills_exist<S: SkillRepository>(
    repo: &S,
    ids: &[SkillId],
) -> Result<bool, RepositoryError> {
    let distinct = dedup_ids(ids);
    if distinct.is_empty() {
        return Ok(true);
    }
    let found = repo.count_existing(&distinct).await?;
    Ok(found == distinct.len())
}

/// Remove repeated ids, keeping the first occurrence.
pub(crate) fn dedup_ids(ids: &[SkillId]) -> Vec<SkillId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Distinct recommendation authors, in the order of their first offer.
fn distinct_authors(offers: &[SkillOffer]) -> Vec<UserId> {
    let mut seen = HashSet::with_capacity(offers.len());
    offers
        .iter()
        .map(|offer| offer.author_id)
        .filter(|author| seen.insert(*author))
        .collect()
}

/// Count repeated skills, sorted by skill id.
fn group_offers(offered: Vec<Skill>) -> Vec<SkillCandidate> {
    let mut groups: BTreeMap<SkillId, SkillCandidate> = BTreeMap::new();
    for skill in offered {
        groups
            .entry(skill.id)
            .or_insert_with(|| SkillCandidate {
                skill,
                offers_count: 0,
            })
            .offers_count += 1;
    }
    groups.into_values().collect()
}

fn storage(e: RepositoryError) -> SkillError {
    SkillError::StorageError(e.to_string())
}
