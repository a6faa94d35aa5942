//! SQLite mentorship request repository implementation.
//!
//! Status changes are a single conditional UPDATE, so two concurrent
//! decisions on the same pending request cannot both succeed.

use sqlx::Row;
use usergraph_core::repository::mentorship::MentorshipRequestRepository;
use usergraph_types::error::RepositoryError;
use usergraph_types::id::{MentorshipRequestId, UserId};
use usergraph_types::mentorship::{CreateMentorshipRequest, MentorshipRequest};
use usergraph_types::request::RequestStatus;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_err};

pub struct SqliteMentorshipRequestRepository {
    pool: DatabasePool,
}

impl SqliteMentorshipRequestRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str =
    "id, requester_id, receiver_id, description, status, rejection_reason, created_at, updated_at";

struct MentorshipRow {
    id: i64,
    requester_id: i64,
    receiver_id: i64,
    description: String,
    status: String,
    rejection_reason: Option<String>,
    created_at: String,
    updated_at: String,
}

impl MentorshipRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            requester_id: row.try_get("requester_id")?,
            receiver_id: row.try_get("receiver_id")?,
            description: row.try_get("description")?,
            status: row.try_get("status")?,
            rejection_reason: row.try_get("rejection_reason")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_request(self) -> Result<MentorshipRequest, RepositoryError> {
        let status: RequestStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        Ok(MentorshipRequest {
            id: MentorshipRequestId(self.id),
            requester_id: UserId(self.requester_id),
            receiver_id: UserId(self.receiver_id),
            description: self.description,
            status,
            rejection_reason: self.rejection_reason,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<MentorshipRequest, RepositoryError> {
    MentorshipRow::from_row(row).map_err(query_err)?.into_request()
}

impl MentorshipRequestRepository for SqliteMentorshipRequestRepository {
    async fn create(
        &self,
        request: &CreateMentorshipRequest,
    ) -> Result<MentorshipRequest, RepositoryError> {
        let now = format_datetime(&chrono::Utc::now());
        let sql = format!(
            "INSERT INTO mentorship_requests (requester_id, receiver_id, description, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(request.requester_id.get())
            .bind(request.receiver_id.get())
            .bind(&request.description)
            .bind(RequestStatus::Pending.to_string())
            .bind(&now)
            .bind(&now)
            .fetch_one(&self.pool.writer)
            .await
            .map_err(query_err)?;

        decode(&row)
    }

    async fn get_by_id(
        &self,
        id: MentorshipRequestId,
    ) -> Result<Option<MentorshipRequest>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM mentorship_requests WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(decode).transpose()
    }

    async fn list_all(&self) -> Result<Vec<MentorshipRequest>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM mentorship_requests ORDER BY id");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(decode).collect()
    }

    async fn transition(
        &self,
        id: MentorshipRequestId,
        from: RequestStatus,
        to: RequestStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<MentorshipRequest>, RepositoryError> {
        let sql = format!(
            "UPDATE mentorship_requests
             SET status = ?, rejection_reason = ?, updated_at = ?
             WHERE id = ? AND status = ?
             RETURNING {COLUMNS}"
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

        row.as_ref().map(decode).transpose()
    }
}
