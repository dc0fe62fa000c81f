//! Application layer for interaction-relay
//!
//! This crate contains the reply channel, the notifications delivered to
//! subscribers, the dispatch use case and the port definitions the
//! infrastructure layer implements. It depends only on the domain layer.

pub mod client;
pub mod events;
pub mod ports;
pub mod reply;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use client::Client;
pub use events::{
    Acknowledge, AutocompleteInteractionCreate, CommandInteractionCreate,
    ComponentInteractionCreate, EventCategory, EventContext, EventEnvelope, Followups,
    InteractionContext, InteractionCreate, InteractionEvent, MessageReplies,
    ModalSubmitInteractionCreate, SequenceCounter, UpdateReplies,
};
pub use ports::{
    diagnostics::{DiagnosticSink, DispatchDiagnostic, LogDiagnostics},
    direct_responder::DirectResponder,
    event_broadcaster::EventBroadcaster,
    guild_cache::{GuildCache, NoGuildCache},
    request_client::{RequestClient, RequestOptions, TransportError},
};
pub use reply::{ReplyChannel, ReplyError, ReplyTransport};
pub use use_cases::dispatch_interaction::{DispatchOutcome, InteractionDispatcher};
