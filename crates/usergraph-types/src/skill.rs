//! Skill domain types.
//!
//! A skill is a globally unique title. Users acquire skills once enough
//! distinct recommendation authors have offered the skill to them; those
//! authors become the permanent guarantors of the acquisition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{SkillId, UserId};

/// Number of distinct endorsing authors required before a skill is granted.
pub const MIN_SKILL_OFFERS: usize = 3;

/// A skill in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    /// Unique title.
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A skill held by a user, with the guarantors recorded when it was granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquiredSkill {
    pub skill: Skill,
    pub user_id: UserId,
    /// Distinct endorsing authors, in the order of their first offer.
    pub guarantor_ids: Vec<UserId>,
    pub acquired_at: DateTime<Utc>,
}

/// A skill offered to a user, with the number of offers naming it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCandidate {
    pub skill: Skill,
    pub offers_count: u64,
}

/// Request to create a new skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillRequest {
    pub title: String,
}
