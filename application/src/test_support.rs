//! Shared test doubles for the application layer.

use crate::client::Client;
use crate::events::InteractionEvent;
use crate::ports::diagnostics::{DiagnosticSink, DispatchDiagnostic};
use crate::ports::direct_responder::DirectResponder;
use crate::ports::event_broadcaster::EventBroadcaster;
use crate::ports::guild_cache::GuildCache;
use crate::ports::request_client::{RequestClient, RequestOptions, TransportError};
use async_trait::async_trait;
use relay_domain::{
    Guild, InteractionResponse, Message, MessageCreate, MessageFlags, MessageUpdate, Snowflake,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request client call, as recorded by [`MockRequestClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    CreateResponse {
        interaction_id: Snowflake,
        token: String,
        response: InteractionResponse,
    },
    GetResponse,
    UpdateResponse(MessageUpdate),
    DeleteResponse,
    GetFollowup(Snowflake),
    CreateFollowup(MessageCreate),
    UpdateFollowup(Snowflake, MessageUpdate),
    DeleteFollowup(Snowflake),
}

/// Request client that records calls and can be scripted to fail the next
/// `create_interaction_response` calls or to stall before answering.
#[derive(Default)]
pub struct MockRequestClient {
    pub calls: Mutex<Vec<RecordedCall>>,
    failures: Mutex<VecDeque<TransportError>>,
    delay: Option<Duration>,
}

impl MockRequestClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail_next(&self, error: TransportError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_response_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RecordedCall::CreateResponse { .. }))
            .count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn message(id: u64) -> Message {
        Message {
            id: Snowflake(id),
            channel_id: Snowflake(1),
            content: String::new(),
            flags: MessageFlags::NONE,
            embeds: Vec::new(),
            components: Vec::new(),
        }
    }
}

#[async_trait]
impl RequestClient for MockRequestClient {
    async fn create_interaction_response(
        &self,
        interaction_id: Snowflake,
        token: &str,
        response: &InteractionResponse,
        _opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failures.lock().unwrap().pop_front();
        if let Some(error) = failure {
            return Err(error);
        }
        self.record(RecordedCall::CreateResponse {
            interaction_id,
            token: token.to_string(),
            response: response.clone(),
        });
        Ok(())
    }

    async fn get_interaction_response(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.record(RecordedCall::GetResponse);
        Ok(Self::message(100))
    }

    async fn update_interaction_response(
        &self,
        _application_id: Snowflake,
        _token: &str,
        update: &MessageUpdate,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.record(RecordedCall::UpdateResponse(update.clone()));
        Ok(Self::message(100))
    }

    async fn delete_interaction_response(
        &self,
        _application_id: Snowflake,
        _token: &str,
        _opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        self.record(RecordedCall::DeleteResponse);
        Ok(())
    }

    async fn get_followup_message(
        &self,
        _application_id: Snowflake,
        _token: &str,
        message_id: Snowflake,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.record(RecordedCall::GetFollowup(message_id));
        Ok(Self::message(message_id.get()))
    }

    async fn create_followup_message(
        &self,
        _application_id: Snowflake,
        _token: &str,
        message: &MessageCreate,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.record(RecordedCall::CreateFollowup(message.clone()));
        Ok(Self::message(200))
    }

    async fn update_followup_message(
        &self,
        _application_id: Snowflake,
        _token: &str,
        message_id: Snowflake,
        update: &MessageUpdate,
        _opts: &RequestOptions,
    ) -> Result<Message, TransportError> {
        self.record(RecordedCall::UpdateFollowup(message_id, update.clone()));
        Ok(Self::message(message_id.get()))
    }

    async fn delete_followup_message(
        &self,
        _application_id: Snowflake,
        _token: &str,
        message_id: Snowflake,
        _opts: &RequestOptions,
    ) -> Result<(), TransportError> {
        self.record(RecordedCall::DeleteFollowup(message_id));
        Ok(())
    }
}

/// Direct responder that records every response it is asked to write.
#[derive(Default)]
pub struct RecordingResponder {
    pub responses: Mutex<Vec<InteractionResponse>>,
}

#[async_trait]
impl DirectResponder for RecordingResponder {
    async fn respond(&self, response: InteractionResponse) -> Result<(), TransportError> {
        self.responses.lock().unwrap().push(response);
        Ok(())
    }
}

/// Broadcaster that keeps every event it receives.
#[derive(Default)]
pub struct RecordingBroadcaster {
    pub events: Mutex<Vec<InteractionEvent>>,
}

impl RecordingBroadcaster {
    pub fn events(&self) -> Vec<InteractionEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventBroadcaster for RecordingBroadcaster {
    async fn broadcast(&self, event: InteractionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub reports: Mutex<Vec<DispatchDiagnostic>>,
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&self, diagnostic: DispatchDiagnostic) {
        self.reports.lock().unwrap().push(diagnostic);
    }
}

#[derive(Default)]
pub struct MapGuildCache {
    pub guilds: HashMap<Snowflake, Guild>,
}

impl GuildCache for MapGuildCache {
    fn guild(&self, guild_id: Snowflake) -> Option<Guild> {
        self.guilds.get(&guild_id).cloned()
    }
}

pub fn client_with(rest: Arc<MockRequestClient>) -> Arc<Client> {
    Arc::new(Client::new(rest))
}
