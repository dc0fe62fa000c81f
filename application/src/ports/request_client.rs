//! Request client port
//!
//! Defines the outbound calls the reply lifecycle needs from the protocol's
//! REST API: the initial interaction callback plus the initial-reply and
//! follow-up message endpoints. Implementations (adapters) live in the
//! infrastructure layer.

use async_trait::async_trait;
use relay_domain::{InteractionResponse, Message, MessageCreate, MessageUpdate, Snowflake};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the remote peer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Another reply already claimed the direct responder.
    #[error("Direct responder already used")]
    ResponderUsed,

    /// The webhook request went away before the reply was written.
    #[error("Direct responder closed")]
    ResponderClosed,

    /// The reply kind cannot be expressed on this transport; nothing was sent.
    #[error("Not supported by this transport: {0}")]
    Unsupported(String),

    #[error("No request transport available: {0}")]
    Unavailable(String),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Per-request knobs forwarded to the request client.
///
/// The direct (webhook) responder ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Audit log reason attached to the request.
    pub reason: Option<String>,
    /// Overrides the client's default request timeout.
    pub timeout: Option<Duration>,
    /// Extra headers sent verbatim.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Outbound request client for interaction replies and follow-ups.
///
/// The initial callback is addressed by interaction id + token; everything
/// after it is addressed by application id + token (+ message id).
#[async_trait]
pub trait RequestClient: Send + Sync {
    /// Send the initial reply to an interaction.
    async fn create_interaction_response(
        &self,
        interaction_id: Snowflake,
        token: &str,
        response: &InteractionResponse,
        opts: &RequestOptions,
    ) -> Result<(), TransportError>;

    /// Fetch the message created by the initial reply.
    async fn get_interaction_response(
        &self,
        application_id: Snowflake,
        token: &str,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError>;

    /// Edit the message created by the initial reply.
    async fn update_interaction_response(
        &self,
        application_id: Snowflake,
        token: &str,
        update: &MessageUpdate,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError>;

    async fn delete_interaction_response(
        &self,
        application_id: Snowflake,
        token: &str,
        opts: &RequestOptions,
    ) -> Result<(), TransportError>;

    async fn get_followup_message(
        &self,
        application_id: Snowflake,
        token: &str,
        message_id: Snowflake,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError>;

    async fn create_followup_message(
        &self,
        application_id: Snowflake,
        token: &str,
        message: &MessageCreate,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError>;

    async fn update_followup_message(
        &self,
        application_id: Snowflake,
        token: &str,
        message_id: Snowflake,
        update: &MessageUpdate,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError>;

    async fn delete_followup_message(
        &self,
        application_id: Snowflake,
        token: &str,
        message_id: Snowflake,
        opts: &RequestOptions,
    ) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder_accumulates() {
        let opts = RequestOptions::new()
            .with_reason("cleanup")
            .with_timeout(Duration::from_secs(2))
            .with_header("X-Trace", "abc");
        assert_eq!(opts.reason.as_deref(), Some("cleanup"));
        assert_eq!(opts.timeout, Some(Duration::from_secs(2)));
        assert_eq!(opts.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
    }

    #[test]
    fn transport_error_display() {
        let error = TransportError::Http {
            status: 404,
            message: "Unknown interaction".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 404: Unknown interaction");
    }
}
