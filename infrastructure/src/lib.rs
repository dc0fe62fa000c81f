//! Infrastructure layer for interaction-relay
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, the host-side concurrency pieces (subscriber registry,
//! ingress worker pool) and configuration file loading.

pub mod cache;
pub mod config;
pub mod events;
pub mod ingress;
pub mod responder;
pub mod rest;

// Re-export commonly used types
pub use cache::InMemoryGuildCache;
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileConfig, FileEventsConfig, FileIngressConfig,
    FileRestConfig, Severity,
};
pub use events::{EventListener, EventManager, ListenerId};
pub use ingress::{Delivery, IngressError, IngressHandle, IngressOptions, IngressPool};
pub use responder::{OneshotResponder, WebhookReply};
pub use rest::OfflineRequestClient;
#[cfg(feature = "rest")]
pub use rest::RestRequestClient;
