//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (usergraph-infra) implements. The core crate never depends on any
//! specific storage technology.
//!
//! Every list method returns rows sorted by ascending id so that paging and
//! filtering are deterministic.

pub mod event;
pub mod mentorship;
pub mod premium;
pub mod recommendation;
pub mod skill;
pub mod skill_offer;
pub mod user;
