//! SQLite recommendation and recommendation request repositories.

use std::collections::BTreeMap;

use sqlx::Row;
use usergraph_core::repository::recommendation::{
    RecommendationRepository, RecommendationRequestRepository,
};
use usergraph_types::error::RepositoryError;
use usergraph_types::id::{RecommendationId, RecommendationRequestId, UserId};
use usergraph_types::recommendation::{
    CreateRecommendation, CreateRecommendationRequest, Recommendation, RecommendationRequest,
    SkillOffer,
};
use usergraph_types::request::RequestStatus;

use super::pool::DatabasePool;
use super::skill_offer::{OFFER_COLUMNS, offer_from_row};
use super::{format_datetime, parse_datetime, query_err};

pub struct SqliteRecommendationRepository {
    pool: DatabasePool,
}

impl SqliteRecommendationRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Load the offers of the given recommendations, grouped by recommendation.
    async fn offers_for(
        &self,
        ids: &[RecommendationId],
    ) -> Result<BTreeMap<RecommendationId, Vec<SkillOffer>>, RepositoryError> {
        let mut grouped: BTreeMap<RecommendationId, Vec<SkillOffer>> = BTreeMap::new();
        if ids.is_empty() {
            return Ok(grouped);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT {OFFER_COLUMNS}
             FROM skill_offers o JOIN recommendations r ON r.id = o.recommendation_id
             WHERE o.recommendation_id IN ({placeholders})
             ORDER BY o.id"
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.get());
        }
        let rows = query.fetch_all(&self.pool.reader).await.map_err(query_err)?;
        for row in &rows {
            let offer = offer_from_row(row)?;
            grouped.entry(offer.recommendation_id).or_default().push(offer);
        }
        Ok(grouped)
    }

    async fn load(
        &self,
        rows: Vec<sqlx::sqlite::SqliteRow>,
    ) -> Result<Vec<Recommendation>, RepositoryError> {
        let mut recs = Vec::with_capacity(rows.len());
        for row in &rows {
            recs.push(RecommendationRow::from_row(row).map_err(query_err)?);
        }
        let ids: Vec<RecommendationId> = recs.iter().map(|r| RecommendationId(r.id)).collect();
        let mut offers = self.offers_for(&ids).await?;

        recs.into_iter()
            .map(|r| {
                let skill_offers = offers.remove(&RecommendationId(r.id)).unwrap_or_default();
                r.into_recommendation(skill_offers)
            })
            .collect()
    }
}

struct RecommendationRow {
    id: i64,
    author_id: i64,
    receiver_id: i64,
    content: String,
    created_at: String,
}

impl RecommendationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            author_id: row.try_get("author_id")?,
            receiver_id: row.try_get("receiver_id")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_recommendation(
        self,
        skill_offers: Vec<SkillOffer>,
    ) -> Result<Recommendation, RepositoryError> {
        Ok(Recommendation {
            id: RecommendationId(self.id),
            author_id: UserId(self.author_id),
            receiver_id: UserId(self.receiver_id),
            content: self.content,
            skill_offers,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl RecommendationRepository for SqliteRecommendationRepository {
    async fn create(
        &self,
        recommendation: &CreateRecommendation,
    ) -> Result<Recommendation, RepositoryError> {
        let created_at = chrono::Utc::now();
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO recommendations (author_id, receiver_id, content, created_at)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(recommendation.author_id.get())
        .bind(recommendation.receiver_id.get())
        .bind(&recommendation.content)
        .bind(format_datetime(&created_at))
        .fetch_one(&mut *tx)
        .await
        .map_err(query_err)?;
        let id = RecommendationId(id);

        let mut skill_offers = Vec::with_capacity(recommendation.skill_ids.len());
        for skill_id in &recommendation.skill_ids {
            let (offer_id,): (i64,) = sqlx::query_as(
                "INSERT INTO skill_offers (skill_id, recommendation_id) VALUES (?, ?) RETURNING id",
            )
            .bind(skill_id.get())
            .bind(id.get())
            .fetch_one(&mut *tx)
            .await
            .map_err(query_err)?;
            skill_offers.push(SkillOffer {
                id: usergraph_types::id::SkillOfferId(offer_id),
                skill_id: *skill_id,
                recommendation_id: id,
                author_id: recommendation.author_id,
                receiver_id: recommendation.receiver_id,
            });
        }

        tx.commit().await.map_err(query_err)?;

        Ok(Recommendation {
            id,
            author_id: recommendation.author_id,
            receiver_id: recommendation.receiver_id,
            content: recommendation.content.clone(),
            skill_offers,
            created_at,
        })
    }

    async fn get_by_id(
        &self,
        id: RecommendationId,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, author_id, receiver_id, content, created_at FROM recommendations WHERE id = ?",
        )
        .bind(id.get())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        match row {
            Some(row) => Ok(self.load(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_by_receiver(
        &self,
        receiver_id: UserId,
    ) -> Result<Vec<Recommendation>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, author_id, receiver_id, content, created_at
             FROM recommendations WHERE receiver_id = ? ORDER BY id",
        )
        .bind(receiver_id.get())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        self.load(rows).await
    }
}

pub struct SqliteRecommendationRequestRepository {
    pool: DatabasePool,
}

impl SqliteRecommendationRequestRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct RequestRow {
    id: i64,
    requester_id: i64,
    receiver_id: i64,
    message: String,
    status: String,
    rejection_reason: Option<String>,
    created_at: String,
    updated_at: String,
}

impl RequestRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            requester_id: row.try_get("requester_id")?,
            receiver_id: row.try_get("receiver_id")?,
            message: row.try_get("message")?,
            status: row.try_get("status")?,
            rejection_reason: row.try_get("rejection_reason")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_request(self) -> Result<RecommendationRequest, RepositoryError> {
        let status: RequestStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        Ok(RecommendationRequest {
            id: RecommendationRequestId(self.id),
            requester_id: UserId(self.requester_id),
            receiver_id: UserId(self.receiver_id),
            message: self.message,
            status,
            rejection_reason: self.rejection_reason,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

const REQUEST_COLUMNS: &str =
    "id, requester_id, receiver_id, message, status, rejection_reason, created_at, updated_at";

impl RecommendationRequestRepository for SqliteRecommendationRequestRepository {
    async fn create(
        &self,
        request: &CreateRecommendationRequest,
    ) -> Result<RecommendationRequest, RepositoryError> {
        let now = format_datetime(&chrono::Utc::now());
        let sql = format!(
            "INSERT INTO recommendation_requests (requester_id, receiver_id, message, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {REQUEST_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(request.requester_id.get())
            .bind(request.receiver_id.get())
            .bind(&request.message)
            .bind(RequestStatus::Pending.to_string())
            .bind(&now)
            .bind(&now)
            .fetch_one(&self.pool.writer)
            .await
            .map_err(query_err)?;

        RequestRow::from_row(&row).map_err(query_err)?.into_request()
    }

    async fn get_by_id(
        &self,
        id: RecommendationRequestId,
    ) -> Result<Option<RecommendationRequest>, RepositoryError> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM recommendation_requests WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        match row {
            Some(row) => Ok(Some(RequestRow::from_row(&row).map_err(query_err)?.into_request()?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<RecommendationRequest>, RepositoryError> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM recommendation_requests ORDER BY id");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        let mut requests = Vec::with_capacity(rows.len());
        for row in &rows {
            requests.push(RequestRow::from_row(row).map_err(query_err)?.into_request()?);
        }
        Ok(requests)
    }

    async fn transition(
        &self,
        id: RecommendationRequestId,
        from: RequestStatus,
        to: RequestStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<RecommendationRequest>, RepositoryError> {
        let sql = format!(
            "UPDATE recommendation_requests
             SET status = ?, rejection_reason = ?, updated_at = ?
             WHERE id = ? AND status = ?
             RETURNING {REQUEST_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(to.to_string())
            .bind(rejection_reason)
            .bind(format_datetime(&chrono::Utc::now()))
            .bind(id.get())
            .bind(from.to_string())
            .fetch_optional(&self.pool.writer)
            .await
            .map_err(query_err)?;

        match row {
            Some(row) => Ok(Some(RequestRow::from_row(&row).map_err(query_err)?.into_request()?)),
            None => Ok(None),
        }
    }
}
