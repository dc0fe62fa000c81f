//! Entity cache adapters.

mod memory;

pub use memory::InMemoryGuildCache;
