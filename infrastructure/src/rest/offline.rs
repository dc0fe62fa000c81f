//! Request client used when no REST transport is configured.

use async_trait::async_trait;
use relay_application::ports::request_client::{RequestClient, RequestOptions, TransportError};
use relay_domain::{InteractionResponse, Message, MessageCreate, MessageUpdate, Snowflake};
use tracing::debug;

/// [`RequestClient`] that fails every call with
/// [`TransportError::Unavailable`].
///
/// Webhook-only hosts use it: their first replies go through the direct
/// responder, and follow-ups are reported as unavailable instead of silently
/// dropped.
#[derive(Debug, Clone)]
pub struct OfflineRequestClient {
    reason: String,
}

impl OfflineRequestClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self, call: &str) -> Result<T, TransportError> {
        debug!("Offline request client rejected {}", call);
        Err(TransportError::Unavailable(self.reason.clone()))
    }
}

impl Default for OfflineRequestClient {
    fn default() -> Self {
        Self::new("no REST transport configured")
    }
}

#[async_trait]
impl RequestClient for OfflineRequestClient {
    async fn create_interaction_response(
        &self,
        _interaction_id: Snowflake,
        _token: &str,
        _response: &InteractionResponse,
        _opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        self.unavailable("create_interaction_response")
    }

    async fn get_interaction_response(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.unavailable("get_interaction_response")
    }

    async fn update_interaction_response(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _update: &MessageUpdate,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.unavailable("update_interaction_response")
    }

    async fn delete_interaction_response(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        self.unavailable("delete_interaction_response")
    }

    async fn get_followup_message(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _message_id: Snowflake,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.unavailable("get_followup_message")
    }

    async fn create_followup_message(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _message: &MessageCreate,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.unavailable("create_followup_message")
    }

    async fn update_followup_message(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _message_id: Snowflake,
        _update: &MessageUpdate,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.unavailable("update_followup_message")
    }

    async fn delete_followup_message(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _message_id: Snowflake,
        _opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        self.unavailable("delete_followup_message")
    }
}
