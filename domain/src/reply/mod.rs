//! Reply lifecycle domain: reply kinds, payloads, and the first-reply guard.

pub mod guard;
pub mod kind;
pub mod payload;

pub use guard::ReplyGuard;
pub use kind::ReplyKind;
pub use payload::{
    AutocompleteChoice, AutocompleteResult, InteractionResponse, MAX_AUTOCOMPLETE_CHOICES,
    MessageCreate, MessageFlags, MessageUpdate, ModalCreate, ReplyPayload,
};
