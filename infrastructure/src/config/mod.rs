//! Configuration file loading for interaction-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `RELAY_<SECTION>__<KEY>` (e.g. `RELAY_INGRESS__WORKERS=8`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./relay.toml` or `./.relay.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/interaction-relay/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileEventsConfig, FileIngressConfig, FileRestConfig, Severity,
};
pub use loader::{ConfigError, ConfigLoader};
