//! Subscriber trait for interaction notifications.

use async_trait::async_trait;
use relay_application::events::{
    AutocompleteInteractionCreate, CommandInteractionCreate, ComponentInteractionCreate,
    InteractionCreate, InteractionEvent, ModalSubmitInteractionCreate,
};

/// A subscriber. Every method defaults to doing nothing, so a listener only
/// overrides the categories it cares about.
#[async_trait]
pub trait EventListener: Send + Sync {
    async fn on_interaction_create(&self, _event: InteractionCreate) {}

    async fn on_command(&self, _event: CommandInteractionCreate) {}

    async fn on_component(&self, _event: ComponentInteractionCreate) {}

    async fn on_autocomplete(&self, _event: AutocompleteInteractionCreate) {}

    async fn on_modal_submit(&self, _event: ModalSubmitInteractionCreate) {}
}

/// Route one notification to the listener method for its category.
pub(crate) async fn deliver(listener: &dyn EventListener, event: InteractionEvent) {
    match event {
        InteractionEvent::InteractionCreate(e) => listener.on_interaction_create(e).await,
        InteractionEvent::Command(e) => listener.on_command(e).await,
        InteractionEvent::Component(e) => listener.on_component(e).await,
        InteractionEvent::Autocomplete(e) => listener.on_autocomplete(e).await,
        InteractionEvent::ModalSubmit(e) => listener.on_modal_submit(e).await,
    }
}
