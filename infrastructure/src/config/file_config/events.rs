//! Event manager configuration from TOML (`[events]` section)

use serde::{Deserialize, Serialize};

/// Raw event manager configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEventsConfig {
    /// Run each listener on its own spawned task instead of awaiting them in
    /// turn.
    pub async_listeners: bool,
}

impl Default for FileEventsConfig {
    fn default() -> Self {
        Self {
            async_listeners: true,
        }
    }
}
