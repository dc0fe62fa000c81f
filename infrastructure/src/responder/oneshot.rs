//! Webhook responder backed by a tokio oneshot channel.
//!
//! The HTTP handler that received the interaction keeps the receiver and
//! awaits it to build its response; the dispatcher gets the responder.

use async_trait::async_trait;
use relay_application::ports::direct_responder::DirectResponder;
use relay_application::ports::request_client::TransportError;
use relay_domain::{InteractionResponse, ReplyKind};
use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;
use tracing::debug;

/// What the webhook handler should answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookReply {
    /// `202 Accepted`, no body. The answer to an acknowledge.
    Accepted,
    /// `200 OK` with the interaction callback body.
    Json(serde_json::Value),
}

impl WebhookReply {
    pub fn status(&self) -> u16 {
        match self {
            WebhookReply::Accepted => 202,
            WebhookReply::Json(_) => 200,
        }
    }

    pub fn body(&self) -> Option<String> {
        match self {
            WebhookReply::Accepted => None,
            WebhookReply::Json(value) => Some(value.to_string()),
        }
    }
}

/// One-shot [`DirectResponder`]. The first `respond` resolves the paired
/// receiver; later calls fail with [`TransportError::ResponderUsed`].
pub struct OneshotResponder {
    sender: Mutex<Option<oneshot::Sender<WebhookReply>>>,
}

impl OneshotResponder {
    /// Create a responder and the receiver the HTTP handler awaits.
    pub fn channel() -> (Self, oneshot::Receiver<WebhookReply>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    pub fn is_used(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

#[async_trait]
impl DirectResponder for OneshotResponder {
    async fn respond(&self, response: InteractionResponse) -> Result<(), TransportError> {
        let reply = match response.kind {
            ReplyKind::Acknowledge => WebhookReply::Accepted,
            _ => WebhookReply::Json(
                serde_json::to_value(&response)
                    .map_err(|e| TransportError::Serialization(e.to_string()))?,
            ),
        };

        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(TransportError::ResponderUsed)?;

        debug!("Writing webhook reply (status {})", reply.status());
        sender
            .send(reply)
            .map_err(|_| TransportError::ResponderClosed)
    }
}
