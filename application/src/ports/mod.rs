//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod diagnostics;
pub mod direct_responder;
pub mod event_broadcaster;
pub mod guild_cache;
pub mod request_client;
