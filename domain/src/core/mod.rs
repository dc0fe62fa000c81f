//! Core domain concepts shared across all subdomains.
//!
//! - [`id::Snowflake`]: protocol-assigned identifiers
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod id;
