//! HTTP request handlers for the REST API.

pub mod events;
pub mod mentorship;
pub mod premium;
pub mod recommendations;
pub mod skills;
pub mod users;
