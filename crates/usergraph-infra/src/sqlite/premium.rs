//! SQLite premium repository implementation.

use chrono::{DateTime, Utc};
use sqlx::Row;
use usergraph_core::repository::premium::PremiumRepository;
use usergraph_types::error::RepositoryError;
use usergraph_types::id::{PremiumId, UserId};
use usergraph_types::premium::Premium;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_err};

pub struct SqlitePremiumRepository {
    pool: DatabasePool,
}

impl SqlitePremiumRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<Premium, RepositoryError> {
    let start_date: String = row.try_get("start_date").map_err(query_err)?;
    let end_date: String = row.try_get("end_date").map_err(query_err)?;
    Ok(Premium {
        id: PremiumId(row.try_get("id").map_err(query_err)?),
        user_id: UserId(row.try_get("user_id").map_err(query_err)?),
        start_date: parse_datetime(&start_date)?,
        end_date: parse_datetime(&end_date)?,
    })
}

impl PremiumRepository for SqlitePremiumRepository {
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Premium>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, user_id, start_date, end_date FROM premiums WHERE user_id = ?",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        row.as_ref().map(decode).transpose()
    }

    /// One row per user: a repeat purchase overwrites the period in place.
    async fn upsert(
        &self,
        user_id: UserId,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Premium, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO premiums (user_id, start_date, end_date) VALUES (?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET start_date = excluded.start_date, end_date = excluded.end_date
             RETURNING id, user_id, start_date, end_date",
        )
        .bind(user_id.get())
        .bind(format_datetime(&start_date))
        .bind(format_datetime(&end_date))
        .fetch_one(&self.pool.writer)
        .await
        .map_err(query_err)?;

        decode(&row)
    }
}
