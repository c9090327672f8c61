//! Descriptor configuration
//!
//! Loaded from a JSON file. Every key is optional:
//!
//! ```text
//! {
//!   "duplicate_names": "permit" | "warn" | "reject",
//!   "log_level": "trace" | "info" | "warn" | "error" | "fatal"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// How `TupleDesc::combine_with` treats a name present in both inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateNamePolicy {
    /// Keep both fields; lookups resolve to the left one
    #[default]
    Permit,
    /// Keep both fields and log each collision
    Warn,
    /// Fail the combine
    Reject,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Descriptor subsystem configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Duplicate-name policy for configured combines (default: permit)
    #[serde(default)]
    pub duplicate_names: DuplicateNamePolicy,

    /// Minimum severity the logger emits (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            duplicate_names: DuplicateNamePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl SchemaConfig {
    /// Create config with the given duplicate-name policy
    pub fn with_duplicate_names(policy: DuplicateNamePolicy) -> Self {
        Self {
            duplicate_names: policy,
            ..Self::default()
        }
    }

    /// Parse configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::from_json(&content)?;

        let path = path.display().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            Severity::Info,
            &[
                ("path", path.as_str()),
                ("duplicate_names", config.duplicate_names.as_str()),
                ("log_level", config.log_level.as_str()),
            ],
        );

        Ok(config)
    }

    /// Install this configuration's log threshold
    pub fn apply(&self) {
        Logger::set_min_severity(self.log_level);
    }
}

impl DuplicateNamePolicy {
    /// Returns the lower-case name used in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateNamePolicy::Permit => "permit",
            DuplicateNamePolicy::Warn => "warn",
            DuplicateNamePolicy::Reject => "reject",
        }
    }
}
