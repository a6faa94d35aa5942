//! SQLite skill offer repository implementation.
//!
//! Offers carry no author or receiver columns of their own; both come from
//! the recommendation the offer belongs to.

use sqlx::Row;
use usergraph_core::repository::skill_offer::SkillOfferRepository;
use usergraph_types::error::RepositoryError;
use usergraph_types::id::{RecommendationId, SkillId, SkillOfferId, UserId};
use usergraph_types::recommendation::SkillOffer;

use super::pool::DatabasePool;
use super::query_err;

pub struct SqliteSkillOfferRepository {
    pool: DatabasePool,
}

impl SqliteSkillOfferRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Columns: id, skill_id, recommendation_id, author_id, receiver_id.
pub(crate) const OFFER_COLUMNS: &str =
    "o.id, o.skill_id, o.recommendation_id, r.author_id, r.receiver_id";

pub(crate) fn offer_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<SkillOffer, RepositoryError> {
    Ok(SkillOffer {
        id: SkillOfferId(row.try_get("id").map_err(query_err)?),
        skill_id: SkillId(row.try_get("skill_id").map_err(query_err)?),
        recommendation_id: RecommendationId(row.try_get("recommendation_id").map_err(query_err)?),
        author_id: UserId(row.try_get("author_id").map_err(query_err)?),
        receiver_id: UserId(row.try_get("receiver_id").map_err(query_err)?),
    })
}

impl SkillOfferRepository for SqliteSkillOfferRepository {
    async fn find_all_offers_of_skill(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> Result<Vec<SkillOffer>, RepositoryError> {
        let sql = format!(
            "SELECT {OFFER_COLUMNS}
             FROM skill_offers o JOIN recommendations r ON r.id = o.recommendation_id
             WHERE o.skill_id = ? AND r.receiver_id = ?
             ORDER BY o.id"
        );
        let rows = sqlx::query(&sql)
            .bind(skill_id.get())
            .bind(user_id.get())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(offer_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::recommendation::SqliteRecommendationRepository;
    use crate::sqlite::test_support::{insert_skill, insert_user, test_pool};
    use usergraph_core::repository::recommendation::RecommendationRepository;
    use usergraph_types::recommendation::CreateRecommendation;

    #[tokio::test]
    async fn test_offers_scoped_to_skill_and_receiver() {
        let pool = test_pool().await;
        let receiver = insert_user(&pool, "receiver").await;
        let other = insert_user(&pool, "other").await;
        let author = insert_user(&pool, "author").await;
        let rust = insert_skill(&pool, "Rust").await;
        let go = insert_skill(&pool, "Go").await;

        let recs = SqliteRecommendationRepository::new(pool.clone());
        for (to, skills) in [(receiver, vec![rust, go]), (other, vec![rust]), (receiver, vec![rust])] {
            recs.create(&CreateRecommendation {
                author_id: author,
                receiver_id: to,
                content: "solid work".to_string(),
                skill_ids: skills,
            })
            .await
            .unwrap();
        }

        let repo = SqliteSkillOfferRepository::new(pool);
        let offers = repo.find_all_offers_of_skill(rust, receiver).await.unwrap();
        assert_eq!(offers.len(), 2);
        assert!(offers.iter().all(|o| o.skill_id == rust));
        assert!(offers.iter().all(|o| o.receiver_id == receiver && o.author_id == author));
        assert!(offers[0].id < offers[1].id);

        assert_eq!(repo.find_all_offers_of_skill(go, other).await.unwrap().len(), 0);
    }
}
