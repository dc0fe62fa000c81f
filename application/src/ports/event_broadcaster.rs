//! Event broadcaster port
//!
//! The subscriber registry, as seen by the dispatcher: a fire-and-forget
//! fan-out of one event to every subscriber registered for its category.

use crate::events::InteractionEvent;
use async_trait::async_trait;

/// Delivers an event to all currently registered subscribers of its
/// [`category`](InteractionEvent::category).
///
/// Implementations invoke each subscriber at most once per event. Whether the
/// subscribers run inline or on spawned tasks is the implementation's choice;
/// the dispatcher observes no result either way.
#[async_trait]
pub trait EventBroadcaster: Send + Sync {
    async fn broadcast(&self, event: InteractionEvent);
}
