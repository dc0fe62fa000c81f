//! Direct responder port
//!
//! Interactions delivered over an inbound HTTP webhook carry their own
//! response writer: the first reply must be written as the HTTP response body
//! instead of being sent through the request client. The transport hands such
//! a writer to the dispatcher through this port.

use super::request_client::TransportError;
use async_trait::async_trait;
use relay_domain::InteractionResponse;

/// One-shot writer for the HTTP response of a webhook-delivered interaction.
#[async_trait]
pub trait DirectResponder: Send + Sync {
    /// Write `response` as the webhook's HTTP response.
    ///
    /// Implementations fail with [`TransportError::ResponderUsed`] when another
    /// reply already claimed the writer, and with
    /// [`TransportError::ResponderClosed`] when the HTTP request went away.
    async fn respond(&self, response: InteractionResponse) -> Result<(), TransportError>;
}
