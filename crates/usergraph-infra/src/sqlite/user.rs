//! SQLite user repository implementation.

use sqlx::Row;
use usergraph_core::repository::user::UserRepository;
use usergraph_types::error::RepositoryError;
use usergraph_types::id::UserId;
use usergraph_types::user::{CreateUserRequest, User};

use super::pool::DatabasePool;
use super::{conflict_or_query, format_datetime, parse_datetime, query_err};

pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct UserRow {
    id: i64,
    username: String,
    email: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        Ok(User {
            id: UserId(self.id),
            username: self.username,
            email: self.email,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, request: &CreateUserRequest) -> Result<User, RepositoryError> {
        let created_at = chrono::Utc::now();
        let row = sqlx::query(
            "INSERT INTO users (username, email, created_at) VALUES (?, ?, ?)
             RETURNING id, username, email, created_at",
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(format_datetime(&created_at))
        .fetch_one(&self.pool.writer)
        .await
        .map_err(|e| {
            conflict_or_query(e, || {
                format!(
                    "username '{}' or email '{}' already taken",
                    request.username, request.email
                )
            })
        })?;

        UserRow::from_row(&row).map_err(query_err)?.into_user()
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT id, username, email, created_at FROM users WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        match row {
            Some(row) => Ok(Some(UserRow::from_row(&row).map_err(query_err)?.into_user()?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        let (found,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id.get())
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_err)?;
        Ok(found)
    }
}
