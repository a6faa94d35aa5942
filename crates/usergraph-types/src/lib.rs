//! Shared domain types for usergraph.
//!
//! Users, skills, recommendations, mentorship requests, events and premium
//! subscriptions, together with their request bodies, error enums,
//! pagination and configuration types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod id;
pub mod mentorship;
pub mod page;
pub mod premium;
pub mod recommendation;
pub mod request;
pub mod skill;
pub mod user;
