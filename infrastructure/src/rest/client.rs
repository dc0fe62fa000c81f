//! reqwest-backed request client.

use super::routes;
use crate::config::FileRestConfig;
use async_trait::async_trait;
use relay_application::ports::request_client::{RequestClient, RequestOptions, TransportError};
use relay_domain::{
    InteractionResponse, Message, MessageCreate, MessageUpdate, Snowflake,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("interaction-relay/", env!("CARGO_PKG_VERSION"));

/// [`RequestClient`] talking to the protocol's REST API over HTTPS.
///
/// No retries and no rate limiting: a failed call is returned to the caller
/// as is.
#[derive(Debug, Clone)]
pub struct RestRequestClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestRequestClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Build a client from the `[rest]` section, reading the token from the
    /// configured environment variable.
    pub fn from_config(config: &FileRestConfig) -> Result<Self, TransportError> {
        let token = config.token();
        if token.is_none() {
            warn!(
                "{} is not set; REST calls will be sent without authorization",
                config.token_env
            );
        }
        Self::new(
            config.base_url.clone(),
            token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, opts: &RequestOptions) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bot {}", token));
        }
        if let Some(reason) = &opts.reason {
            builder = builder.header("X-Audit-Log-Reason", encode_reason(reason));
        }
        if let Some(timeout) = opts.timeout {
            builder = builder.timeout(timeout);
        }
        for (name, value) in &opts.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, TransportError> {
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown").to_string());
        debug!("REST call failed: HTTP {} {}", status.as_u16(), message);
        Err(TransportError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
        response
            .json()
            .await
            .map_err(|e| TransportError::Serialization(e.to_string()))
    }
}

/// Percent-encode an audit log reason; the header only carries ASCII.
fn encode_reason(reason: &str) -> String {
    let mut encoded = String::with_capacity(reason.len());
    for byte in reason.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[async_trait]
impl RequestClient for RestRequestClient {
    async fn create_interaction_response(
        &self,
        interaction_id: Snowflake,
        token: &str,
        response: &InteractionResponse,
        opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        if response.kind.callback_code().is_none() {
            debug!(
                "Interaction {}: {} has no callback type",
                interaction_id, response.kind
            );
            return Err(TransportError::Unsupported(format!(
                "{} has no interaction callback type",
                response.kind
            )));
        }

        let builder = self
            .request(
                Method::POST,
                &routes::interaction_callback(interaction_id, token),
                opts,
            )
            .json(response);
        self.execute(builder).await?;
        Ok(())
    }

    async fn get_interaction_response(
        &self,
        application_id: Snowflake,
        token: &str,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        let builder = self.request(
            Method::GET,
            &routes::original_response(application_id, token),
            opts,
        );
        Self::json(self.execute(builder).await?).await
    }

    async fn update_interaction_response(
        &self,
        application_id: Snowflake,
        token: &str,
        update: &MessageUpdate,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        let builder = self
            .request(
                Method::PATCH,
                &routes::original_response(application_id, token),
                opts,
            )
            .json(update);
        Self::json(self.execute(builder).await?).await
    }

    async fn delete_interaction_response(
        &self,
        application_id: Snowflake,
        token: &str,
        opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        let builder = self.request(
            Method::DELETE,
            &routes::original_response(application_id, token),
            opts,
        );
        self.execute(builder).await?;
        Ok(())
    }

    async fn get_followup_message(
        &self,
        application_id: Snowflake,
        token: &str,
        message_id: Snowflake,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        let builder = self.request(
            Method::GET,
            &routes::followup(application_id, token, message_id),
            opts,
        );
        Self::json(self.execute(builder).await?).await
    }

    async fn create_followup_message(
        &self,
        application_id: Snowflake,
        token: &str,
        message: &MessageCreate,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        // `wait=true` makes the API return the created message.
        let builder = self
            .request(
                Method::POST,
                &routes::followups(application_id, token),
                opts,
            )
            .query(&[("wait", "true")])
            .json(message);
        Self::json(self.execute(builder).await?).await
    }

    async fn update_followup_message(
        &self,
        application_id: Snowflake,
        token: &str,
        message_id: Snowflake,
        update: &MessageUpdate,
        opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        let builder = self
            .request(
                Method::PATCH,
                &routes::followup(application_id, token, message_id),
                opts,
            )
            .json(update);
        Self::json(self.execute(builder).await?).await
    }

    async fn delete_followup_message(
        &self,
        application_id: Snowflake,
        token: &str,
        message_id: Snowflake,
        opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        let builder = self.request(
            Method::DELETE,
            &routes::followup(application_id, token, message_id),
            opts,
        );
        self.execute(builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::{ReplyKind, ReplyPayload};

    fn unreachable_client() -> RestRequestClient {
        // Port 9 (discard) on localhost is not expected to accept connections.
        RestRequestClient::new("http://127.0.0.1:9/api/", None, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        assert_eq!(unreachable_client().base_url(), "http://127.0.0.1:9/api");
    }

    #[test]
    fn audit_reason_is_percent_encoded() {
        assert_eq!(encode_reason("spam cleanup"), "spam%20cleanup");
        assert_eq!(encode_reason("ok-1.2_~"), "ok-1.2_~");
        assert_eq!(encode_reason("é"), "%C3%A9");
    }

    #[tokio::test]
    async fn acknowledge_is_unsupported_and_sends_nothing() {
        let client = unreachable_client();
        let response = InteractionResponse::new(ReplyKind::Acknowledge, ReplyPayload::Empty);

        // An attempted request would surface as a network error instead.
        let result = client
            .create_interaction_response(Snowflake(1), "tok", &response, &RequestOptions::default())
            .await;
        assert!(matches!(result, Err(TransportError::Unsupported(_))));
    }

    #[tokio::test]
    async fn acknowledge_over_rest_leaves_the_reply_open() {
        use relay_application::{ReplyChannel, ReplyError, ReplyTransport};
        use relay_domain::{CommandData, Interaction, InteractionInfo, ReplyGuard};
        use std::sync::Arc;

        let interaction = Interaction::new(
            InteractionInfo::new(Snowflake(1), Snowflake(2), "tok"),
            CommandData::chat_input(Snowflake(3), "ping").into(),
        );
        let channel = ReplyChannel::new(
            &interaction,
            Arc::new(ReplyGuard::new()),
            ReplyTransport::Rest(Arc::new(unreachable_client())),
        );

        let result = channel
            .send(ReplyKind::Acknowledge, ReplyPayload::Empty, RequestOptions::default())
            .await;
        assert!(matches!(
            result,
            Err(ReplyError::Transport(TransportError::Unsupported(_)))
        ));
        assert_eq!(channel.reply_kind(), None);
    }

    #[tokio::test]
    async fn connection_failure_is_a_network_error() {
        let client = unreachable_client();
        let response = InteractionResponse::new(ReplyKind::DeferredUpdateMessage, ReplyPayload::Empty);

        let result = client
            .create_interaction_response(Snowflake(1), "tok", &response, &RequestOptions::default())
            .await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    #[test]
    fn from_config_uses_section_values() {
        let config = FileRestConfig {
            base_url: "https://example.test/api/v10/".to_string(),
            token_env: "RELAY_TEST_UNSET_TOKEN_VARIABLE".to_string(),
            timeout_secs: 1,
        };
        let client = RestRequestClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://example.test/api/v10");
    }
}
