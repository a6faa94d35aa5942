//! Event domain types.
//!
//! Events are organized by a user, may relate to catalogue skills, and move
//! through a planned -> in progress -> completed/canceled lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::{EventId, SkillId, UserId};

/// Kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Giveaway,
    Webinar,
    Presentation,
    Meeting,
    Workshop,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Giveaway => write!(f, "giveaway"),
            EventType::Webinar => write!(f, "webinar"),
            EventType::Presentation => write!(f, "presentation"),
            EventType::Meeting => write!(f, "meeting"),
            EventType::Workshop => write!(f, "workshop"),
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "giveaway" => Ok(EventType::Giveaway),
            "webinar" => Ok(EventType::Webinar),
            "presentation" => Ok(EventType::Presentation),
            "meeting" => Ok(EventType::Meeting),
            "workshop" => Ok(EventType::Workshop),
            other => Err(format!("invalid event type: '{other}'")),
        }
    }
}

/// Event lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Planned,
    InProgress,
    Canceled,
    Completed,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Planned => write!(f, "planned"),
            EventStatus::InProgress => write!(f, "in_progress"),
            EventStatus::Canceled => write!(f, "canceled"),
            EventStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(EventStatus::Planned),
            "in_progress" => Ok(EventStatus::InProgress),
            "canceled" => Ok(EventStatus::Canceled),
            "completed" => Ok(EventStatus::Completed),
            other => Err(format!("invalid event status: '{other}'")),
        }
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Planned
    }
}

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_attendees: i32,
    pub owner_id: UserId,
    pub related_skill_ids: Vec<SkillId>,
    pub event_type: EventType,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /events`. Optional fields are checked by [`validate`](Self::validate).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    #[serde(default)]
    pub max_attendees: i32,
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub related_skill_ids: Vec<SkillId>,
    pub event_type: Option<EventType>,
    pub status: Option<EventStatus>,
}

/// A validated event ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_attendees: i32,
    pub owner_id: UserId,
    pub related_skill_ids: Vec<SkillId>,
    pub event_type: EventType,
    pub status: EventStatus,
}

impl CreateEventRequest {
    /// Check required fields and date ordering.
    ///
    /// Related skill ids are deduplicated, keeping the first occurrence.
    pub fn validate(&self) -> Result<NewEvent, String> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "event title cannot be empty".to_string())?;
        let start_date = self
            .start_date
            .ok_or_else(|| "event start date is required".to_string())?;
        if let Some(end_date) = self.end_date {
            if end_date < start_date {
                return Err("event end date cannot be before its start date".to_string());
            }
        }
        let owner_id = self
            .owner_id
            .ok_or_else(|| "event owner id is required".to_string())?;
        let event_type = self
            .event_type
            .ok_or_else(|| "event type is required".to_string())?;
        if self.max_attendees < 0 {
            return Err(format!(
                "max attendees cannot be negative (got {})",
                self.max_attendees
            ));
        }

        let mut related_skill_ids = Vec::with_capacity(self.related_skill_ids.len());
        for id in &self.related_skill_ids {
            if !related_skill_ids.contains(id) {
                related_skill_ids.push(*id);
            }
        }

        Ok(NewEvent {
            title: title.to_string(),
            description: self.description.clone(),
            start_date,
            end_date: self.end_date,
            location: self.location.clone(),
            max_attendees: self.max_attendees,
            owner_id,
            related_skill_ids,
            event_type,
            status: self.status.unwrap_or_default(),
        })
    }
}
