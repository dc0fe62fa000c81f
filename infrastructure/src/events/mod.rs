//! Subscriber registry.

mod listener;
mod manager;

pub use listener::EventListener;
pub use manager::{EventManager, ListenerId};
