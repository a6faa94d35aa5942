//! Store-assigned entity identifiers.
//!
//! Every table uses an integer primary key. Each entity gets its own newtype
//! so a `UserId` can never be passed where a `SkillId` is expected.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw integer value as stored in the database.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`User`](crate::user::User).
    UserId
);
entity_id!(
    /// Identifier of a [`Skill`](crate::skill::Skill).
    SkillId
);
entity_id!(
    /// Identifier of a [`Recommendation`](crate::recommendation::Recommendation).
    RecommendationId
);
entity_id!(
    /// Identifier of a [`SkillOffer`](crate::recommendation::SkillOffer).
    SkillOfferId
);
entity_id!(
    /// Identifier of a [`RecommendationRequest`](crate::recommendation::RecommendationRequest).
    RecommendationRequestId
);
entity_id!(
    /// Identifier of a [`MentorshipRequest`](crate::mentorship::MentorshipRequest).
    MentorshipRequestId
);
entity_id!(
    /// Identifier of an [`Event`](crate::event::Event).
    EventId
);
entity_id!(
    /// Identifier of a [`Premium`](crate::premium::Premium) subscription.
    PremiumId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_parse() {
        let id = UserId(42);
        assert_eq!(id.to_string(), "42");
        let parsed: UserId = " 42 ".parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!("abc".parse::<SkillId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&MentorshipRequestId(7)).unwrap();
        assert_eq!(json, "7");
        let back: MentorshipRequestId = serde_json::from_str("7").unwrap();
        assert_eq!(back.get(), 7);
    }
}
