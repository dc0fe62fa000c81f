//! Shared interaction context and the capability traits built on it.
//!
//! Every notification embeds one [`InteractionContext`]. Behaviour common to
//! several notifications is written once, as default methods on small
//! capability traits, and each notification opts into the capabilities its
//! variant allows:
//!
//! | Trait | Operations |
//! |-------|------------|
//! | [`EventContext`] | envelope, client, sequence, shard, reply state, guild lookup |
//! | [`Acknowledge`] | `acknowledge` |
//! | [`MessageReplies`] | `defer_reply`, `reply`, `open_modal`, `launch_activity` |
//! | [`UpdateReplies`] | `update_message`, `defer_update` |
//! | [`Followups`] | initial reply and follow-up message calls |
//!
//! An operation a variant does not support is simply not implemented for its
//! notification type.

use super::envelope::EventEnvelope;
use crate::client::Client;
use crate::ports::request_client::{RequestOptions, TransportError};
use crate::reply::{ReplyChannel, ReplyError};
use async_trait::async_trait;
use relay_domain::{
    Guild, InteractionInfo, Message, MessageCreate, MessageUpdate, ModalCreate, ReplyGuard,
    ReplyKind, ReplyPayload, Snowflake,
};
use std::sync::Arc;

/// Read-only handles shared by all notifications of one interaction.
#[derive(Debug, Clone)]
pub struct InteractionContext {
    envelope: EventEnvelope,
    info: InteractionInfo,
    guard: Arc<ReplyGuard>,
    channel: ReplyChannel,
}

impl InteractionContext {
    pub fn new(
        envelope: EventEnvelope,
        info: InteractionInfo,
        guard: Arc<ReplyGuard>,
        channel: ReplyChannel,
    ) -> Self {
        Self {
            envelope,
            info,
            guard,
            channel,
        }
    }

    pub fn envelope(&self) -> &EventEnvelope {
        &self.envelope
    }

    pub fn info(&self) -> &InteractionInfo {
        &self.info
    }

    pub fn channel(&self) -> &ReplyChannel {
        &self.channel
    }

    pub fn reply_kind(&self) -> Option<ReplyKind> {
        self.guard.current_kind()
    }

    pub fn has_replied(&self) -> bool {
        self.guard.has_replied()
    }

    pub fn is_deferred_reply(&self) -> bool {
        self.guard.is_deferred_reply()
    }

    pub fn is_deferred_update(&self) -> bool {
        self.guard.is_deferred_update()
    }

    /// Whether two contexts observe the same first-reply record.
    pub fn shares_guard_with(&self, other: &InteractionContext) -> bool {
        Arc::ptr_eq(&self.guard, &other.guard)
    }
}

/// Queries available on every notification.
pub trait EventContext {
    fn context(&self) -> &InteractionContext;

    fn envelope(&self) -> &EventEnvelope {
        self.context().envelope()
    }

    fn client(&self) -> &Arc<Client> {
        self.context().envelope().client()
    }

    fn sequence(&self) -> u64 {
        self.context().envelope().sequence()
    }

    fn shard_id(&self) -> u32 {
        self.context().envelope().shard_id()
    }

    fn interaction_id(&self) -> Snowflake {
        self.context().info().id
    }

    fn reply_kind(&self) -> Option<ReplyKind> {
        self.context().reply_kind()
    }

    fn has_replied(&self) -> bool {
        self.context().has_replied()
    }

    fn is_deferred_reply(&self) -> bool {
        self.context().is_deferred_reply()
    }

    fn is_deferred_update(&self) -> bool {
        self.context().is_deferred_update()
    }

    /// Cached guild the interaction happened in. `None` in DMs or on a cache
    /// miss.
    fn guild(&self) -> Option<Guild> {
        let guild_id = self.context().info().guild_id?;
        self.client().cache().guild(guild_id)
    }
}

async fn send(
    context: &InteractionContext,
    kind: ReplyKind,
    payload: ReplyPayload,
) -> Result<(), ReplyError> {
    context
        .channel()
        .send(kind, payload, RequestOptions::default())
        .await
}

#[async_trait]
pub trait Acknowledge: EventContext + Sync {
    /// Content-less first reply.
    async fn acknowledge(&self) -> Result<(), ReplyError> {
        send(self.context(), ReplyKind::Acknowledge, ReplyPayload::Empty).await
    }
}

#[async_trait]
pub trait MessageReplies: EventContext + Sync {
    /// Show a loading state; the message is filled in later through
    /// [`Followups::update_initial_reply`].
    async fn defer_reply(&self, ephemeral: bool) -> Result<(), ReplyError> {
        send(
            self.context(),
            ReplyKind::DeferredCreateMessage,
            ReplyPayload::deferred(ephemeral),
        )
        .await
    }

    async fn reply(&self, message: MessageCreate) -> Result<(), ReplyError> {
        send(self.context(), ReplyKind::CreateMessage, message.into()).await
    }

    async fn open_modal(&self, modal: ModalCreate) -> Result<(), ReplyError> {
        send(self.context(), ReplyKind::Modal, modal.into()).await
    }

    async fn launch_activity(&self) -> Result<(), ReplyError> {
        send(self.context(), ReplyKind::LaunchActivity, ReplyPayload::Empty).await
    }
}

#[async_trait]
pub trait UpdateReplies: EventContext + Sync {
    /// Edit the message the component (or modal) belongs to.
    async fn update_message(&self, update: MessageUpdate) -> Result<(), ReplyError> {
        send(self.context(), ReplyKind::UpdateMessage, update.into()).await
    }

    async fn defer_update(&self) -> Result<(), ReplyError> {
        send(
            self.context(),
            ReplyKind::DeferredUpdateMessage,
            ReplyPayload::Empty,
        )
        .await
    }
}

/// Initial-reply and follow-up message calls. These go straight to the
/// request client and are not gated by the first-reply guard.
#[async_trait]
pub trait Followups: EventContext + Sync {
    async fn get_initial_reply(&self) -> Result<Message, TransportError> {
        let info = self.context().info();
        self.client()
            .rest()
            .get_interaction_response(info.application_id, &info.token, &RequestOptions::default())
            .await
    }

    async fn update_initial_reply(&self, update: MessageUpdate) -> Result<Message, TransportError> {
        let info = self.context().info();
        self.client()
            .rest()
            .update_interaction_response(
                info.application_id,
                &info.token,
                &update,
                &RequestOptions::default(),
            )
            .await
    }

    async fn delete_initial_reply(&self) -> Result<(), TransportError> {
        let info = self.context().info();
        self.client()
            .rest()
            .delete_interaction_response(
                info.application_id,
                &info.token,
                &RequestOptions::default(),
            )
            .await
    }

    async fn get_followup(&self, message_id: Snowflake) -> Result<Message, TransportError> {
        let info = self.context().info();
        self.client()
            .rest()
            .get_followup_message(
                info.application_id,
                &info.token,
                message_id,
                &RequestOptions::default(),
            )
            .await
    }

    async fn create_followup(&self, message: MessageCreate) -> Result<Message, TransportError> {
        let info = self.context().info();
        self.client()
            .rest()
            .create_followup_message(
                info.application_id,
                &info.token,
                &message,
                &RequestOptions::default(),
            )
            .await
    }

    async fn update_followup(
        &self,
        message_id: Snowflake,
        update: MessageUpdate,
    ) -> Result<Message, TransportError> {
        let info = self.context().info();
        self.client()
            .rest()
            .update_followup_message(
                info.application_id,
                &info.token,
                message_id,
                &update,
                &RequestOptions::default(),
            )
            .await
    }

    async fn delete_followup(&self, message_id: Snowflake) -> Result<(), TransportError> {
        let info = self.context().info();
        self.client()
            .rest()
            .delete_followup_message(
                info.application_id,
                &info.token,
                message_id,
                &RequestOptions::default(),
            )
            .await
    }
}
