//! Infrastructure layer for usergraph.
//!
//! Contains the SQLite implementations of the repository traits defined in
//! `usergraph-core`, plus data directory and `config.toml` handling.

pub mod config;
pub mod sqlite;
