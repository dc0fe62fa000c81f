//! Direct (webhook) responder adapters.

mod oneshot;

pub use oneshot::{OneshotResponder, WebhookReply};
