//! Subscriber registry and fan-out.

use super::listener::{EventListener, deliver};
use async_trait::async_trait;
use relay_application::events::InteractionEvent;
use relay_application::ports::event_broadcaster::EventBroadcaster;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

/// Handle returned by [`EventManager::register`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// [`EventBroadcaster`] that fans each notification out to every registered
/// [`EventListener`].
///
/// Listeners can be added and removed at any time; a broadcast works on a
/// snapshot taken when it starts. With `async_listeners` each listener runs
/// on its own spawned task and `broadcast` returns immediately. Otherwise
/// listeners are awaited one after another, in registration order.
pub struct EventManager {
    listeners: RwLock<Vec<(ListenerId, Arc<dyn EventListener>)>>,
    next_id: AtomicU64,
    async_listeners: bool,
}

impl EventManager {
    pub fn new(async_listeners: bool) -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
            async_listeners,
        }
    }

    pub fn is_async(&self) -> bool {
        self.async_listeners
    }

    pub fn register(&self, listener: Arc<dyn EventListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        debug!("Registered event listener {:?}", id);
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        before != listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn snapshot(&self) -> Vec<Arc<dyn EventListener>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }
}

#[async_trait]
impl EventBroadcaster for EventManager {
    async fn broadcast(&self, event: InteractionEvent) {
        let listeners = self.snapshot();
        trace!(
            "Broadcasting {} to {} listener(s)",
            event.category(),
            listeners.len()
        );

        for listener in listeners {
            if self.async_listeners {
                let event = event.clone();
                tokio::spawn(async move { deliver(listener.as_ref(), event).await });
            } else {
                deliver(listener.as_ref(), event.clone()).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::OfflineRequestClient;
    use crate::responder::{OneshotResponder, WebhookReply};
    use relay_application::events::{
        Acknowledge, CommandInteractionCreate, EventCategory, EventContext, InteractionCreate,
        MessageReplies,
    };
    use relay_application::{Client, InteractionDispatcher, ReplyError};
    use relay_domain::{CommandData, Interaction, InteractionInfo, ReplyKind, Snowflake};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// Records which categories it saw, tagged with its name.
    struct Recorder {
        name: &'static str,
        seen: Arc<Mutex<Vec<(&'static str, EventCategory)>>>,
    }

    #[async_trait]
    impl EventListener for Recorder {
        async fn on_interaction_create(&self, _event: InteractionCreate) {
            self.seen
                .lock()
                .unwrap()
                .push((self.name, EventCategory::InteractionCreate));
        }

        async fn on_command(&self, _event: CommandInteractionCreate) {
            self.seen
                .lock()
                .unwrap()
                .push((self.name, EventCategory::Command));
        }
    }

    /// Races to reply to commands and reports its outcome.
    struct Racer {
        defer: bool,
        outcomes: mpsc::UnboundedSender<Result<(), ReplyError>>,
    }

    #[async_trait]
    impl EventListener for Racer {
        async fn on_command(&self, event: CommandInteractionCreate) {
            let result = if self.defer {
                event.defer_reply(false).await
            } else {
                event.acknowledge().await
            };
            let _ = self.outcomes.send(result);
        }
    }

    fn command() -> Interaction {
        Interaction::new(
            InteractionInfo::new(Snowflake(1), Snowflake(2), "tok"),
            CommandData::chat_input(Snowflake(3), "ping").into(),
        )
    }

    fn client() -> Arc<Client> {
        Arc::new(Client::new(Arc::new(OfflineRequestClient::default())))
    }

    #[tokio::test]
    async fn sync_listeners_run_in_registration_order() {
        let manager = Arc::new(EventManager::new(false));
        let seen = Arc::new(Mutex::new(Vec::new()));
        for name in ["a", "b"] {
            manager.register(Arc::new(Recorder {
                name,
                seen: seen.clone(),
            }));
        }

        InteractionDispatcher::new(manager.clone())
            .dispatch(client(), 1, 0, command(), None)
            .await;

        assert_eq!(
            seen.lock().unwrap().clone(),
            vec![
                ("a", EventCategory::InteractionCreate),
                ("b", EventCategory::InteractionCreate),
                ("a", EventCategory::Command),
                ("b", EventCategory::Command),
            ]
        );
    }

    #[tokio::test]
    async fn unregistered_listener_is_not_called() {
        let manager = Arc::new(EventManager::new(false));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let id = manager.register(Arc::new(Recorder {
            name: "gone",
            seen: seen.clone(),
        }));

        assert!(manager.unregister(id));
        assert!(!manager.unregister(id));
        assert_eq!(manager.listener_count(), 0);

        InteractionDispatcher::new(manager.clone())
            .dispatch(client(), 1, 0, command(), None)
            .await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn async_listeners_race_for_one_reply() {
        let manager = Arc::new(EventManager::new(true));
        let (tx, mut rx) = mpsc::unbounded_channel();
        manager.register(Arc::new(Racer {
            defer: false,
            outcomes: tx.clone(),
        }));
        manager.register(Arc::new(Racer {
            defer: true,
            outcomes: tx,
        }));

        let (responder, reply_rx) = OneshotResponder::channel();
        InteractionDispatcher::new(manager.clone())
            .dispatch(client(), 42, 0, command(), Some(Arc::new(responder)))
            .await;

        let mut outcomes = Vec::new();
        for _ in 0..2 {
            let outcome = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .unwrap()
                .unwrap();
            outcomes.push(outcome);
        }

        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|r| matches!(r, Err(ReplyError::AlreadyReplied)))
                .count(),
            1
        );

        let reply = reply_rx.await.unwrap();
        assert!(matches!(reply, WebhookReply::Accepted | WebhookReply::Json(_)));
    }

    #[tokio::test]
    async fn listener_sees_reply_state_of_other_listeners() {
        struct Checker {
            observed: Arc<Mutex<Option<ReplyKind>>>,
        }

        #[async_trait]
        impl EventListener for Checker {
            async fn on_command(&self, event: CommandInteractionCreate) {
                *self.observed.lock().unwrap() = event.reply_kind();
            }
        }

        struct Acker;

        #[async_trait]
        impl EventListener for Acker {
            async fn on_interaction_create(&self, event: InteractionCreate) {
                event
                    .respond(
                        ReplyKind::Acknowledge,
                        relay_domain::ReplyPayload::Empty,
                        Default::default(),
                    )
                    .await
                    .unwrap();
            }
        }

        let manager = Arc::new(EventManager::new(false));
        let observed = Arc::new(Mutex::new(None));
        manager.register(Arc::new(Acker));
        manager.register(Arc::new(Checker {
            observed: observed.clone(),
        }));

        let (responder, _reply_rx) = OneshotResponder::channel();
        InteractionDispatcher::new(manager.clone())
            .dispatch(client(), 1, 0, command(), Some(Arc::new(responder)))
            .await;

        assert_eq!(*observed.lock().unwrap(), Some(ReplyKind::Acknowledge));
    }
}
