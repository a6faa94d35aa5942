//! Global configuration types for usergraph.
//!
//! `GlobalConfig` represents the `config.toml` in the data directory that
//! controls pagination defaults and telemetry export.

use serde::{Deserialize, Serialize};

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Page size used when a list request omits `pageSize`.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Upper bound applied to any requested `pageSize`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub enable_otel: bool,
}

fn default_page_size() -> u32 {
    20
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            enable_otel: false,
        }
    }
}
