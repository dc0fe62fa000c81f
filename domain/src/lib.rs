//! Domain layer for interaction-relay
//!
//! This crate contains the interaction model, the reply vocabulary and the
//! first-reply guard. It has no dependencies on transport, runtime or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Interaction
//!
//! An [`Interaction`] is one inbound request that must receive **at most one**
//! initial reply, optionally followed by any number of follow-up messages.
//! Its payload is a closed sum over four variants (command, component,
//! autocomplete, modal submit) plus an `Unknown` catch-all.
//!
//! ## Reply lifecycle
//!
//! - [`ReplyKind`]: the legal shapes of a first reply
//! - [`InteractionResponse`]: kind + payload, serialized as the callback body
//! - [`ReplyGuard`]: per-interaction commit-once record of the first reply,
//!   built on [`sync::CommitOnce`]

pub mod core;
pub mod entities;
pub mod interaction;
pub mod reply;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{error::DomainError, id::Snowflake};
pub use entities::{Guild, Message};
pub use interaction::{
    AutocompleteData, AutocompleteInteraction, CommandData, CommandInteraction, CommandKind,
    CommandOption, ComponentData, ComponentInteraction, Interaction, InteractionData,
    InteractionInfo, InteractionKind, InteractionVariant, ModalSubmitData, ModalSubmitInteraction,
    TypedInteraction,
};
pub use reply::{
    AutocompleteChoice, AutocompleteResult, InteractionResponse, MessageCreate, MessageFlags,
    MessageUpdate, ModalCreate, ReplyGuard, ReplyKind, ReplyPayload,
};
