//! Business rules, the request filter chain, and repository trait
//! definitions for usergraph.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `usergraph-types` -- never on
//! `usergraph-infra` or any database/IO crate.

pub mod filter;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
