//! Reply channel: the only path that can record an interaction's first reply.
//!
//! A [`ReplyChannel`] is bound to one interaction (id + token), the
//! interaction's shared [`ReplyGuard`], and a transport sink. Every typed
//! event of the interaction holds a clone of the same channel, so a reply sent
//! through any of them is visible to all.
//!
//! # Send protocol
//!
//! ```text
//! send(kind, payload)
//!   │
//!   ├─ guard already set? ──────────────▶ Err(AlreadyReplied)   (no network call)
//!   │
//!   ├─ transport call (direct responder or request client)
//!   │     ├─ responder used, or guard
//!   │     │  set meanwhile? ────────────▶ Err(AlreadyReplied)
//!   │     └─ failed? ───────────────────▶ Err(Transport(e))     (guard stays open)
//!   │
//!   └─ commit kind to guard
//!         ├─ won ───────────────────────▶ Ok(())
//!         └─ lost to a concurrent send ─▶ Err(AlreadyReplied)
//! ```
//!
//! The guard is never locked across the transport call; the commit is a single
//! compare-and-set performed after the call completes.

use crate::ports::direct_responder::DirectResponder;
use crate::ports::request_client::{RequestClient, RequestOptions, TransportError};
use relay_domain::{
    DomainError, Interaction, InteractionResponse, ReplyGuard, ReplyKind, ReplyPayload, Snowflake,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors returned to the subscriber that attempted a reply.
#[derive(Error, Debug)]
pub enum ReplyError {
    /// The interaction already received its first reply.
    #[error("Interaction already replied")]
    AlreadyReplied,

    /// The transport call failed; nothing was recorded and a retry is allowed.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The payload was rejected before anything was sent.
    #[error("Invalid reply payload: {0}")]
    InvalidPayload(#[from] DomainError),
}

impl ReplyError {
    pub fn is_already_replied(&self) -> bool {
        matches!(self, ReplyError::AlreadyReplied)
    }
}

/// Where the first reply is written.
#[derive(Clone)]
pub enum ReplyTransport {
    /// Webhook delivery: write the reply as the HTTP response.
    Direct(Arc<dyn DirectResponder>),
    /// Gateway delivery: send the reply through the request client.
    Rest(Arc<dyn RequestClient>),
}

impl ReplyTransport {
    fn label(&self) -> &'static str {
        match self {
            ReplyTransport::Direct(_) => "direct",
            ReplyTransport::Rest(_) => "rest",
        }
    }
}

struct ChannelInner {
    interaction_id: Snowflake,
    token: String,
    guard: Arc<ReplyGuard>,
    transport: ReplyTransport,
}

/// Reply capability bound to one interaction. Cheap to clone.
#[derive(Clone)]
pub struct ReplyChannel {
    inner: Arc<ChannelInner>,
}

impl ReplyChannel {
    pub fn new(interaction: &Interaction, guard: Arc<ReplyGuard>, transport: ReplyTransport) -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                interaction_id: interaction.id(),
                token: interaction.token().to_string(),
                guard,
                transport,
            }),
        }
    }

    pub fn interaction_id(&self) -> Snowflake {
        self.inner.interaction_id
    }

    /// Snapshot of the recorded first-reply kind.
    pub fn reply_kind(&self) -> Option<ReplyKind> {
        self.inner.guard.current_kind()
    }

    pub fn has_replied(&self) -> bool {
        self.inner.guard.has_replied()
    }

    pub fn is_deferred_reply(&self) -> bool {
        self.inner.guard.is_deferred_reply()
    }

    pub fn is_deferred_update(&self) -> bool {
        self.inner.guard.is_deferred_update()
    }

    /// Send the interaction's first reply.
    ///
    /// # Errors
    ///
    /// - [`ReplyError::AlreadyReplied`] if a first reply was recorded before
    ///   this call, or by a concurrent call while this one was in flight, or
    ///   if a concurrent call already claimed the direct responder.
    /// - [`ReplyError::Transport`] if the transport call failed; the guard is
    ///   left open.
    pub async fn send(
        &self,
        kind: ReplyKind,
        payload: ReplyPayload,
        opts: RequestOptions,
    ) -> Result<(), ReplyError> {
        let inner = &self.inner;

        if let Some(existing) = inner.guard.current_kind() {
            debug!(
                "Rejecting {} for interaction {}: already replied with {}",
                kind, inner.interaction_id, existing
            );
            return Err(ReplyError::AlreadyReplied);
        }

        let response = InteractionResponse::new(kind, payload);
        let result = match &inner.transport {
            ReplyTransport::Direct(responder) => responder.respond(response).await,
            ReplyTransport::Rest(client) => {
                client
                    .create_interaction_response(
                        inner.interaction_id,
                        &inner.token,
                        &response,
                        &opts,
                    )
                    .await
            }
        };

        if let Err(e) = result {
            if matches!(e, TransportError::ResponderUsed) || inner.guard.has_replied() {
                debug!(
                    "{} for interaction {} lost to a concurrent reply: {}",
                    kind, inner.interaction_id, e
                );
                return Err(ReplyError::AlreadyReplied);
            }
            debug!(
                "{} reply {} for interaction {} failed: {}",
                inner.transport.label(),
                kind,
                inner.interaction_id,
                e
            );
            return Err(e.into());
        }

        if !inner.guard.try_record_reply(kind) {
            // The reply went out, but a concurrent send committed first.
            warn!(
                "Interaction {} replied concurrently; {} was delivered but not recorded",
                inner.interaction_id, kind
            );
            return Err(ReplyError::AlreadyReplied);
        }

        debug!(
            "Interaction {} replied with {} via {}",
            inner.interaction_id,
            kind,
            inner.transport.label()
        );
        Ok(())
    }
}

impl fmt::Debug for ReplyChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyChannel")
            .field("interaction_id", &self.inner.interaction_id)
            .field("transport", &self.inner.transport.label())
            .field("reply_kind", &self.reply_kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockRequestClient, RecordedCall, RecordingResponder};
    use relay_domain::{CommandData, InteractionInfo, MessageCreate};
    use std::time::Duration;

    fn interaction() -> Interaction {
        Interaction::new(
            InteractionInfo::new(Snowflake(11), Snowflake(22), "tok-11"),
            CommandData::chat_input(Snowflake(33), "ping").into(),
        )
    }

    fn rest_channel(client: Arc<MockRequestClient>) -> ReplyChannel {
        ReplyChannel::new(
            &interaction(),
            Arc::new(ReplyGuard::new()),
            ReplyTransport::Rest(client),
        )
    }

    #[tokio::test]
    async fn first_send_goes_through_rest_and_is_recorded() {
        let client = Arc::new(MockRequestClient::new());
        let channel = rest_channel(client.clone());

        channel
            .send(
                ReplyKind::CreateMessage,
                MessageCreate::new().with_content("pong").into(),
                RequestOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(channel.reply_kind(), Some(ReplyKind::CreateMessage));
        assert_eq!(
            client.calls(),
            vec![RecordedCall::CreateResponse {
                interaction_id: Snowflake(11),
                token: "tok-11".to_string(),
                response: InteractionResponse::new(
                    ReplyKind::CreateMessage,
                    MessageCreate::new().with_content("pong").into()
                ),
            }]
        );
    }

    #[tokio::test]
    async fn second_send_is_rejected_without_network_call() {
        let client = Arc::new(MockRequestClient::new());
        let channel = rest_channel(client.clone());

        channel
            .send(ReplyKind::Acknowledge, ReplyPayload::Empty, RequestOptions::default())
            .await
            .unwrap();
        let second = channel
            .send(
                ReplyKind::DeferredCreateMessage,
                ReplyPayload::deferred(false),
                RequestOptions::default(),
            )
            .await;

        assert!(matches!(second, Err(ReplyError::AlreadyReplied)));
        assert_eq!(client.create_response_count(), 1);
        assert_eq!(channel.reply_kind(), Some(ReplyKind::Acknowledge));
    }

    #[tokio::test]
    async fn transport_failure_leaves_guard_open_for_retry() {
        let client = Arc::new(MockRequestClient::new());
        client.fail_next(TransportError::Network("connection reset".to_string()));
        let channel = rest_channel(client.clone());

        let first = channel
            .send(ReplyKind::Modal, ReplyPayload::Empty, RequestOptions::default())
            .await;
        match first {
            Err(ReplyError::Transport(TransportError::Network(msg))) => {
                assert_eq!(msg, "connection reset")
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
        assert_eq!(channel.reply_kind(), None);

        channel
            .send(
                ReplyKind::DeferredCreateMessage,
                ReplyPayload::deferred(true),
                RequestOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(channel.reply_kind(), Some(ReplyKind::DeferredCreateMessage));
        assert!(channel.is_deferred_reply());
        assert!(!channel.is_deferred_update());
    }

    #[tokio::test]
    async fn direct_responder_takes_precedence_over_rest() {
        let responder = Arc::new(RecordingResponder::default());
        let channel = ReplyChannel::new(
            &interaction(),
            Arc::new(ReplyGuard::new()),
            ReplyTransport::Direct(responder.clone()),
        );

        channel
            .send(
                ReplyKind::DeferredUpdateMessage,
                ReplyPayload::Empty,
                RequestOptions::default(),
            )
            .await
            .unwrap();

        let written = responder.responses.lock().unwrap().clone();
        assert_eq!(
            written,
            vec![InteractionResponse::new(
                ReplyKind::DeferredUpdateMessage,
                ReplyPayload::Empty
            )]
        );
        assert!(channel.is_deferred_update());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_sends_have_exactly_one_winner() {
        let client = Arc::new(MockRequestClient::new().with_delay(Duration::from_millis(20)));
        let channel = rest_channel(client.clone());

        let a = {
            let channel = channel.clone();
            tokio::spawn(async move {
                channel
                    .send(ReplyKind::Acknowledge, ReplyPayload::Empty, RequestOptions::default())
                    .await
                    .map(|_| ReplyKind::Acknowledge)
            })
        };
        let b = {
            let channel = channel.clone();
            tokio::spawn(async move {
                channel
                    .send(
                        ReplyKind::DeferredCreateMessage,
                        ReplyPayload::deferred(false),
                        RequestOptions::default(),
                    )
                    .await
                    .map(|_| ReplyKind::DeferredCreateMessage)
            })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let winners: Vec<ReplyKind> = results.iter().filter_map(|r| r.as_ref().ok().copied()).collect();
        let losers = results
            .iter()
            .filter(|r| matches!(r, Err(ReplyError::AlreadyReplied)))
            .count();

        assert_eq!(winners.len(), 1);
        assert_eq!(losers, 1);
        assert_eq!(channel.reply_kind(), Some(winners[0]));
    }

    /// Single-use responder that holds the write open for `flush` after
    /// claiming it.
    struct SlowOnceResponder {
        used: std::sync::Mutex<bool>,
        flush: Duration,
    }

    #[async_trait::async_trait]
    impl DirectResponder for SlowOnceResponder {
        async fn respond(&self, _response: InteractionResponse) -> Result<(), TransportError> {
            {
                let mut used = self.used.lock().unwrap();
                if *used {
                    return Err(TransportError::ResponderUsed);
                }
                *used = true;
            }
            tokio::time::sleep(self.flush).await;
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racer_finding_direct_responder_claimed_gets_already_replied() {
        let channel = ReplyChannel::new(
            &interaction(),
            Arc::new(ReplyGuard::new()),
            ReplyTransport::Direct(Arc::new(SlowOnceResponder {
                used: std::sync::Mutex::new(false),
                flush: Duration::from_millis(50),
            })),
        );

        let a = {
            let channel = channel.clone();
            tokio::spawn(async move {
                channel
                    .send(ReplyKind::Acknowledge, ReplyPayload::Empty, RequestOptions::default())
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(channel.reply_kind(), None);

        let b = channel
            .send(
                ReplyKind::DeferredCreateMessage,
                ReplyPayload::deferred(false),
                RequestOptions::default(),
            )
            .await;

        assert!(matches!(b, Err(ReplyError::AlreadyReplied)));
        a.await.unwrap().unwrap();
        assert_eq!(channel.reply_kind(), Some(ReplyKind::Acknowledge));
    }

    /// Responder whose write fails after another reply was recorded on the
    /// same guard mid-call.
    struct OvertakenResponder {
        guard: Arc<ReplyGuard>,
    }

    #[async_trait::async_trait]
    impl DirectResponder for OvertakenResponder {
        async fn respond(&self, _response: InteractionResponse) -> Result<(), TransportError> {
            assert!(self.guard.try_record_reply(ReplyKind::Modal));
            Err(TransportError::ResponderClosed)
        }
    }

    #[tokio::test]
    async fn transport_failure_after_a_concurrent_commit_is_already_replied() {
        let guard = Arc::new(ReplyGuard::new());
        let channel = ReplyChannel::new(
            &interaction(),
            guard.clone(),
            ReplyTransport::Direct(Arc::new(OvertakenResponder {
                guard: guard.clone(),
            })),
        );

        let result = channel
            .send(ReplyKind::Acknowledge, ReplyPayload::Empty, RequestOptions::default())
            .await;

        assert!(matches!(result, Err(ReplyError::AlreadyReplied)));
        assert_eq!(channel.reply_kind(), Some(ReplyKind::Modal));
    }

    #[test]
    fn debug_shows_transport_and_state() {
        let channel = rest_channel(Arc::new(MockRequestClient::new()));
        let rendered = format!("{channel:?}");
        assert!(rendered.contains("rest"));
        assert!(rendered.contains("reply_kind: None"));
    }
}
