//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; every section falls back to its defaults.

mod events;
mod ingress;
mod rest;

pub use events::FileEventsConfig;
pub use ingress::FileIngressConfig;
pub use rest::FileRestConfig;

use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configured value cannot work; a fallback is used.
    Error,
    /// The configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `ingress.queue_capacity`.
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// REST transport settings
    pub rest: FileRestConfig,
    /// Ingress worker pool settings
    pub ingress: FileIngressConfig,
    /// Event manager settings
    pub events: FileEventsConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let base_url = self.rest.base_url.trim();
        if base_url.is_empty() {
            issues.push(ConfigIssue::error(
                "rest.base_url",
                "rest.base_url is empty; REST replies are disabled",
            ));
        } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            issues.push(ConfigIssue::warning(
                "rest.base_url",
                format!("rest.base_url '{}' is not an http(s) URL", base_url),
            ));
        }

        if self.rest.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "rest.timeout_secs",
                "rest.timeout_secs is 0; requests will not time out",
            ));
        }

        if self.ingress.queue_capacity == 0 {
            issues.push(ConfigIssue::error(
                "ingress.queue_capacity",
                "ingress.queue_capacity cannot be 0, falling back to 1",
            ));
        }

        issues
    }
}
