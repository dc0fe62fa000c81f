//! Reply sending bound to one interaction.

pub mod channel;

pub use channel::{ReplyChannel, ReplyError, ReplyTransport};
