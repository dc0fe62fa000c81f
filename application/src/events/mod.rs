//! Notifications delivered to subscribers and the context they carry.

pub mod context;
pub mod envelope;
pub mod notifications;

pub use context::{
    Acknowledge, EventContext, Followups, InteractionContext, MessageReplies, UpdateReplies,
};
pub use envelope::{EventEnvelope, SequenceCounter};
pub use notifications::{
    AutocompleteInteractionCreate, CommandInteractionCreate, ComponentInteractionCreate,
    EventCategory, InteractionCreate, InteractionEvent, ModalSubmitInteractionCreate,
};
