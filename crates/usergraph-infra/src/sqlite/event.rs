//! SQLite event repository implementation.
//!
//! Related skills are stored in `event_skills` and written in the same
//! transaction as the event row.

use std::collections::BTreeMap;

use sqlx::Row;
use usergraph_core::repository::event::EventRepository;
use usergraph_types::error::RepositoryError;
use usergraph_types::event::{Event, EventStatus, EventType, NewEvent};
use usergraph_types::id::{EventId, SkillId, UserId};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_err};

pub struct SqliteEventRepository {
    pool: DatabasePool,
}

impl SqliteEventRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn related_skills(
        &self,
        ids: &[EventId],
    ) -> Result<BTreeMap<EventId, Vec<SkillId>>, RepositoryError> {
        let mut grouped: BTreeMap<EventId, Vec<SkillId>> = BTreeMap::new();
        if ids.is_empty() {
            return Ok(grouped);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT event_id, skill_id FROM event_skills
             WHERE event_id IN ({placeholders})
             ORDER BY event_id, rowid"
        );
        let mut query = sqlx::query_as::<_, (i64, i64)>(&sql);
        for id in ids {
            query = query.bind(id.get());
        }
        for (event_id, skill_id) in query.fetch_all(&self.pool.reader).await.map_err(query_err)? {
            grouped
                .entry(EventId(event_id))
                .or_default()
                .push(SkillId(skill_id));
        }
        Ok(grouped)
    }

    async fn load(&self, rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<Vec<Event>, RepositoryError> {
        let mut events = Vec::with_capacity(rows.len());
        for row in &rows {
            events.push(EventRow::from_row(row).map_err(query_err)?);
        }
        let ids: Vec<EventId> = events.iter().map(|e| EventId(e.id)).collect();
        let mut skills = self.related_skills(&ids).await?;

        events
            .into_iter()
            .map(|e| {
                let related = skills.remove(&EventId(e.id)).unwrap_or_default();
                e.into_event(related)
            })
            .collect()
    }
}

const COLUMNS: &str = "id, title, description, start_date, end_date, location, max_attendees, \
                       owner_id, event_type, status, created_at";

struct EventRow {
    id: i64,
    title: String,
    description: Option<String>,
    start_date: String,
    end_date: Option<String>,
    location: Option<String>,
    max_attendees: i32,
    owner_id: i64,
    event_type: String,
    status: String,
    created_at: String,
}

impl EventRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            location: row.try_get("location")?,
            max_attendees: row.try_get("max_attendees")?,
            owner_id: row.try_get("owner_id")?,
            event_type: row.try_get("event_type")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_event(self, related_skill_ids: Vec<SkillId>) -> Result<Event, RepositoryError> {
        let event_type: EventType = self
            .event_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let status: EventStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Event {
            id: EventId(self.id),
            title: self.title,
            description: self.description,
            start_date: parse_datetime(&self.start_date)?,
            end_date: self.end_date.as_deref().map(parse_datetime).transpose()?,
            location: self.location,
            max_attendees: self.max_attendees,
            owner_id: UserId(self.owner_id),
            related_skill_ids,
            event_type,
            status,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: &NewEvent) -> Result<Event, RepositoryError> {
        let created_at = chrono::Utc::now();
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO events (title, description, start_date, end_date, location, max_attendees, owner_id, event_type, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(format_datetime(&event.start_date))
        .bind(event.end_date.as_ref().map(format_datetime))
        .bind(&event.location)
        .bind(event.max_attendees)
        .bind(event.owner_id.get())
        .bind(event.event_type.to_string())
        .bind(event.status.to_string())
        .bind(format_datetime(&created_at))
        .fetch_one(&mut *tx)
        .await
        .map_err(query_err)?;

        for skill_id in &event.related_skill_ids {
            sqlx::query("INSERT INTO event_skills (event_id, skill_id) VALUES (?, ?)")
                .bind(id)
                .bind(skill_id.get())
                .execute(&mut *tx)
                .await
                .map_err(query_err)?;
        }

        tx.commit().await.map_err(query_err)?;

        Ok(Event {
            id: EventId(id),
            title: event.title.clone(),
            description: event.description.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            location: event.location.clone(),
            max_attendees: event.max_attendees,
            owner_id: event.owner_id,
            related_skill_ids: event.related_skill_ids.clone(),
            event_type: event.event_type,
            status: event.status,
            created_at,
        })
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM events WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        match row {
            Some(row) => Ok(self.load(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, owner_id: Option<UserId>) -> Result<Vec<Event>, RepositoryError> {
        let rows = match owner_id {
            Some(owner) => {
                let sql = format!("SELECT {COLUMNS} FROM events WHERE owner_id = ? ORDER BY id");
                sqlx::query(&sql)
                    .bind(owner.get())
                    .fetch_all(&self.pool.reader)
                    .await
            }
            None => {
                let sql = format!("SELECT {COLUMNS} FROM events ORDER BY id");
                sqlx::query(&sql).fetch_all(&self.pool.reader).await
            }
        }
        .map_err(query_err)?;

        self.load(rows).await
    }
}
