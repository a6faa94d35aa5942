//! Skill repository trait definition.

use usergraph_types::error::RepositoryError;
use usergraph_types::id::{SkillId, UserId};
use usergraph_types::skill::{AcquiredSkill, Skill};

/// Repository trait for skills and the user-skill association.
pub trait SkillRepository: Send + Sync {
    /// Insert a skill. A duplicate title yields `RepositoryError::Conflict`.
    fn create(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Skill, RepositoryError>> + Send;

    /// True if a skill with exactly this title exists.
    fn exists_by_title(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Get a skill by id.
    fn get_by_id(
        &self,
        id: SkillId,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    /// Count how many of the given (distinct) ids reference stored skills.
    fn count_existing(
        &self,
        ids: &[SkillId],
    ) -> impl std::future::Future<Output = Result<usize, RepositoryError>> + Send;

    /// All skills held by a user.
    fn find_all_by_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Skill>, RepositoryError>> + Send;

    /// One entry per skill offer made to the user, so a skill offered
    /// three times appears three times.
    fn find_offered_to_user(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Skill>, RepositoryError>> + Send;

    /// The user's association with a skill, including its guarantors.
    fn find_user_skill(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<AcquiredSkill>, RepositoryError>> + Send;

    /// Attach the skill to the user and record the guarantors, atomically.
    ///
    /// If the user already holds the skill, returns `RepositoryError::Conflict`
    /// and writes nothing.
    fn grant(
        &self,
        skill_id: SkillId,
        user_id: UserId,
        guarantor_ids: &[UserId],
    ) -> impl std::future::Future<Output = Result<AcquiredSkill, RepositoryError>> + Send;
}
