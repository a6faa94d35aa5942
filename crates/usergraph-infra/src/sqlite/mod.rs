//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod event;
pub mod mentorship;
pub mod pool;
pub mod premium;
pub mod recommendation;
pub mod skill;
pub mod skill_offer;
pub mod user;

use chrono::{DateTime, Utc};
use usergraph_types::error::RepositoryError;

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

/// Map a UNIQUE or PRIMARY KEY violation to `Conflict`, anything else to `Query`.
pub(crate) fn conflict_or_query(e: sqlx::Error, conflict: impl FnOnce() -> String) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.message().contains("UNIQUE") {
            return RepositoryError::Conflict(conflict());
        }
    }
    query_err(e)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::pool::DatabasePool;

    pub(crate) async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    /// Insert a user directly and return its id.
    pub(crate) async fn insert_user(pool: &DatabasePool, name: &str) -> usergraph_types::id::UserId {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (username, email, created_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(format!("{name}@example.com"))
        .bind(chrono::Utc::now().to_rfc3339())
        .fetch_one(&pool.writer)
        .await
        .unwrap();
        usergraph_types::id::UserId(id)
    }

    pub(crate) async fn insert_skill(pool: &DatabasePool, title: &str) -> usergraph_types::id::SkillId {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO skills (title, created_at) VALUES (?, ?) RETURNING id",
        )
        .bind(title)
        .bind(chrono::Utc::now().to_rfc3339())
        .fetch_one(&pool.writer)
        .await
        .unwrap();
        usergraph_types::id::SkillId(id)
    }
}
