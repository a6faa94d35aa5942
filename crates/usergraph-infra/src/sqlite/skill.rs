//! SQLite skill repository implementation.
//!
//! Acquired skills live in `user_skills` keyed by (user, skill); the authors
//! that vouched for an acquisition live in `user_skill_guarantees`.

use sqlx::Row;
use usergraph_core::repository::skill::SkillRepository;
use usergraph_types::error::RepositoryError;
use usergraph_types::id::{SkillId, UserId};
use usergraph_types::skill::{AcquiredSkill, Skill};

use super::pool::DatabasePool;
use super::{conflict_or_query, format_datetime, parse_datetime, query_err};

pub struct SqliteSkillRepository {
    pool: DatabasePool,
}

impl SqliteSkillRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct SkillRow {
    id: i64,
    title: String,
    created_at: String,
}

impl SkillRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_skill(self) -> Result<Skill, RepositoryError> {
        Ok(Skill {
            id: SkillId(self.id),
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

pub(crate) fn skills_from_rows(
    rows: &[sqlx::sqlite::SqliteRow],
) -> Result<Vec<Skill>, RepositoryError> {
    let mut skills = Vec::with_capacity(rows.len());
    for row in rows {
        skills.push(SkillRow::from_row(row).map_err(query_err)?.into_skill()?);
    }
    Ok(skills)
}

impl SkillRepository for SqliteSkillRepository {
    async fn create(&self, title: &str) -> Result<Skill, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO skills (title, created_at) VALUES (?, ?) RETURNING id, title, created_at",
        )
        .bind(title)
        .bind(format_datetime(&chrono::Utc::now()))
        .fetch_one(&self.pool.writer)
        .await
        .map_err(|e| conflict_or_query(e, || format!("skill '{title}' already exists")))?;

        SkillRow::from_row(&row).map_err(query_err)?.into_skill()
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool, RepositoryError> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM skills WHERE title = ?)")
                .bind(title)
                .fetch_one(&self.pool.reader)
                .await
                .map_err(query_err)?;
        Ok(found)
    }

    async fn get_by_id(&self, id: SkillId) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query("SELECT id, title, created_at FROM skills WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        match row {
            Some(row) => Ok(Some(SkillRow::from_row(&row).map_err(query_err)?.into_skill()?)),
            None => Ok(None),
        }
    }

    async fn count_existing(&self, ids: &[SkillId]) -> Result<usize, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT COUNT(*) FROM skills WHERE id IN ({placeholders})");

        let mut query = sqlx::query_as::<_, (i64,)>(&sql);
        for id in ids {
            query = query.bind(id.get());
        }
        let (count,) = query.fetch_one(&self.pool.reader).await.map_err(query_err)?;
        usize::try_from(count).map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Skill>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT s.id, s.title, s.created_at
             FROM skills s JOIN user_skills us ON us.skill_id = s.id
             WHERE us.user_id = ?
             ORDER BY s.id",
        )
        .bind(user_id.get())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        skills_from_rows(&rows)
    }

    async fn find_offered_to_user(&self, user_id: UserId) -> Result<Vec<Skill>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT s.id, s.title, s.created_at
             FROM skill_offers o
             JOIN recommendations r ON r.id = o.recommendation_id
             JOIN skills s ON s.id = o.skill_id
             WHERE r.receiver_id = ?
             ORDER BY o.id",
        )
        .bind(user_id.get())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        skills_from_rows(&rows)
    }

    async fn find_user_skill(
        &self,
        skill_id: SkillId,
        user_id: UserId,
    ) -> Result<Option<AcquiredSkill>, RepositoryError> {
        let row = sqlx::query(
            "SELECT s.id, s.title, s.created_at, us.acquired_at
             FROM user_skills us JOIN skills s ON s.id = us.skill_id
             WHERE us.user_id = ? AND us.skill_id = ?",
        )
        .bind(user_id.get())
        .bind(skill_id.get())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let acquired_at: String = row.try_get("acquired_at").map_err(query_err)?;
        let skill = SkillRow::from_row(&row).map_err(query_err)?.into_skill()?;

        let guarantors: Vec<(i64,)> = sqlx::query_as(
            "SELECT guarantor_id FROM user_skill_guarantees
             WHERE user_id = ? AND skill_id = ?
             ORDER BY id",
        )
        .bind(user_id.get())
        .bind(skill_id.get())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        Ok(Some(AcquiredSkill {
            skill,
            user_id,
            guarantor_ids: guarantors.into_iter().map(|(id,)| UserId(id)).collect(),
            acquired_at: parse_datetime(&acquired_at)?,
        }))
    }

    async fn grant(
        &self,
        skill_id: SkillId,
        user_id: UserId,
        guarantor_ids: &[UserId],
    ) -> Result<AcquiredSkill, RepositoryError> {
        let acquired_at = chrono::Utc::now();
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        sqlx::query("INSERT INTO user_skills (user_id, skill_id, acquired_at) VALUES (?, ?, ?)")
            .bind(user_id.get())
            .bind(skill_id.get())
            .bind(format_datetime(&acquired_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                conflict_or_query(e, || format!("user {user_id} already has skill {skill_id}"))
            })?;

        for guarantor in guarantor_ids {
            sqlx::query(
                "INSERT INTO user_skill_guarantees (user_id, skill_id, guarantor_id) VALUES (?, ?, ?)",
            )
            .bind(user_id.get())
            .bind(skill_id.get())
            .bind(guarantor.get())
            .execute(&mut *tx)
            .await
            .map_err(query_err)?;
        }

        let row = sqlx::query("SELECT id, title, created_at FROM skills WHERE id = ?")
            .bind(skill_id.get())
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_err)?
            .ok_or(RepositoryError::NotFound)?;
        let skill = SkillRow::from_row(&row).map_err(query_err)?.into_skill()?;

        tx.commit().await.map_err(query_err)?;

        Ok(AcquiredSkill {
            skill,
            user_id,
            guarantor_ids: guarantor_ids.to_vec(),
            acquired_at,
        })
    }
}
