//! Skill offer repository trait definition.

use usergraph_types::error::RepositoryError;
use usergraph_types::id::{SkillId, UserId};
use usergraph_types::recommendation::SkillOffer;

/// Read access to the skill offers embedded in recommendations.
pub trait SkillOfferRepository: Send + Sync {
    /// Every offer of `skill_id` inside recommendations received by `user_id`,
    /// in offer id order.
    fn find_all_offers_of_skill(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<SkillOffer>, RepositoryError>> + Send;
}
