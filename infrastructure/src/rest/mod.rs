//! Request client adapters.
//!
//! - [`RestRequestClient`]: HTTPS client for the REST API (feature `rest`)
//! - [`OfflineRequestClient`]: fails every call; for hosts without REST access

#[cfg(feature = "rest")]
mod client;
mod offline;
pub mod routes;

#[cfg(feature = "rest")]
pub use client::RestRequestClient;
pub use offline::OfflineRequestClient;
