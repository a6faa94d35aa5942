use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::id::{PremiumId, UserId};

/// Purchasable premium durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumPeriod {
    Month,
    ThreeMonths,
    Year,
}

impl PremiumPeriod {
    /// Length of the period in days.
    pub fn days(self) -> i64 {
        match self {
            PremiumPeriod::Month => 30,
            PremiumPeriod::ThreeMonths => 90,
            PremiumPeriod::Year => 365,
        }
    }

    /// Subscription end when started at `start`.
    pub fn end_from(self, start: DateTime<Utc>) -> DateTime<Utc> {
        start + Duration::days(self.days())
    }
}

impl fmt::Display for PremiumPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PremiumPeriod::Month => write!(f, "month"),
            PremiumPeriod::ThreeMonths => write!(f, "three_months"),
            PremiumPeriod::Year => write!(f, "year"),
        }
    }
}

/// A user's premium subscription. A user has at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Premium {
    pub id: PremiumId,
    pub user_id: UserId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Premium {
    /// True while `now` falls before the end date.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.end_date
    }
}

/// Body of `POST /users/{id}/premium`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyPremiumRequest {
    pub period: PremiumPeriod,
}
