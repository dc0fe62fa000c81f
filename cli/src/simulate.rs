//! `simulate` command: synthetic webhook interactions, racing subscribers.
//!
//! Every generated interaction is delivered through the ingress pool with a
//! oneshot webhook responder. `racers` listeners each try to send a first
//! reply; the report shows which reply kind won and how many racers were
//! rejected.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use relay_application::events::{
    Acknowledge, AutocompleteInteractionCreate, CommandInteractionCreate,
    ComponentInteractionCreate, EventContext, MessageReplies, ModalSubmitInteractionCreate,
    UpdateReplies,
};
use relay_application::{
    Client, DiagnosticSink, DispatchDiagnostic, InteractionDispatcher, ReplyError,
};
use relay_domain::{
    AutocompleteChoice, AutocompleteData, CommandData, ComponentData, Guild, Interaction,
    InteractionData, InteractionInfo, InteractionKind, MessageCreate, MessageUpdate,
    ModalSubmitData, ReplyKind, Snowflake,
};
use relay_infrastructure::{
    Delivery, EventListener, EventManager, FileConfig, InMemoryGuildCache, IngressOptions,
    IngressPool, OfflineRequestClient, OneshotResponder, WebhookReply,
};
use relay_presentation::{InteractionOutcome, SimulateArgs, SimulationReport};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

const APPLICATION_ID: Snowflake = Snowflake(4242);
const GUILD_ID: Snowflake = Snowflake(77);
const FIRST_INTERACTION_ID: u64 = 1_000;
/// Type code of a ping, which has no typed notification.
const UNKNOWN_TYPE_CODE: u8 = 1;
const RESULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one racer's attempt.
struct Attempt {
    interaction_id: Snowflake,
    kind: ReplyKind,
    result: Result<(), ReplyError>,
}

/// Subscriber that tries one reply per interaction. Which reply depends on
/// its index, so racers compete with different kinds.
struct Racer {
    index: usize,
    attempts: mpsc::UnboundedSender<Attempt>,
}

impl Racer {
    fn report(&self, event: &dyn EventContext, kind: ReplyKind, result: Result<(), ReplyError>) {
        if let Some(guild) = event.guild() {
            debug!(
                "Racer {} saw interaction {} in guild '{}'",
                self.index,
                event.interaction_id(),
                guild.name
            );
        }
        let _ = self.attempts.send(Attempt {
            interaction_id: event.interaction_id(),
            kind,
            result,
        });
    }
}

#[async_trait]
impl EventListener for Racer {
    async fn on_command(&self, event: CommandInteractionCreate) {
        let (kind, result) = match self.index % 3 {
            0 => (ReplyKind::Acknowledge, event.acknowledge().await),
            1 => (
                ReplyKind::DeferredCreateMessage,
                event.defer_reply(self.index % 2 == 0).await,
            ),
            _ => (
                ReplyKind::CreateMessage,
                event
                    .reply(MessageCreate::new().with_content(format!(
                        "pong from racer {}",
                        self.index
                    )))
                    .await,
            ),
        };
        self.report(&event, kind, result);
    }

    async fn on_component(&self, event: ComponentInteractionCreate) {
        let (kind, result) = match self.index % 3 {
            0 => (ReplyKind::DeferredUpdateMessage, event.defer_update().await),
            1 => (
                ReplyKind::UpdateMessage,
                event
                    .update_message(MessageUpdate::new().clear_components())
                    .await,
            ),
            _ => (
                ReplyKind::CreateMessage,
                event
                    .reply(MessageCreate::new().with_content("clicked").ephemeral())
                    .await,
            ),
        };
        self.report(&event, kind, result);
    }

    async fn on_autocomplete(&self, event: AutocompleteInteractionCreate) {
        let (kind, result) = if self.index % 2 == 0 {
            let typed = event
                .data()
                .focused()
                .and_then(|option| option.value.as_str())
                .unwrap_or_default()
                .to_string();
            let choices = ["relay", "reply", "replay"]
                .into_iter()
                .filter(|name| name.starts_with(&typed))
                .map(|name| AutocompleteChoice::new(name, name))
                .collect();
            (
                ReplyKind::AutocompleteResult,
                event.autocomplete_result(choices).await,
            )
        } else {
            (ReplyKind::Acknowledge, event.acknowledge().await)
        };
        self.report(&event, kind, result);
    }

    async fn on_modal_submit(&self, event: ModalSubmitInteractionCreate) {
        let (kind, result) = match self.index % 3 {
            0 => (
                ReplyKind::CreateMessage,
                event
                    .reply(MessageCreate::new().with_content(format!(
                        "thanks, {}",
                        event.data().field("name").unwrap_or("stranger")
                    )))
                    .await,
            ),
            1 => (ReplyKind::DeferredCreateMessage, event.defer_reply(true).await),
            _ => (ReplyKind::DeferredUpdateMessage, event.defer_update().await),
        };
        self.report(&event, kind, result);
    }
}

/// Keeps dispatch diagnostics for the report and logs them.
#[derive(Default)]
struct CollectingDiagnostics {
    reports: Mutex<Vec<DispatchDiagnostic>>,
}

impl CollectingDiagnostics {
    fn messages(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&self, diagnostic: DispatchDiagnostic) {
        warn!("{}", diagnostic);
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

fn build_interaction(id: u64, kind: Option<InteractionKind>) -> Interaction {
    let info = InteractionInfo::new(Snowflake(id), APPLICATION_ID, format!("sim-token-{id}"))
        .with_guild(GUILD_ID)
        .with_channel(Snowflake(id + 10_000))
        .with_user(Snowflake(id + 20_000));

    let data: InteractionData = match kind {
        Some(InteractionKind::Command) => CommandData::chat_input(Snowflake(1), "ping").into(),
        Some(InteractionKind::Component) => {
            ComponentData::button(format!("confirm:{id}"), Snowflake(id + 30_000)).into()
        }
        Some(InteractionKind::Autocomplete) => AutocompleteData::new(Snowflake(2), "search")
            .with_option("query", "re", true)
            .into(),
        Some(InteractionKind::ModalSubmit) => ModalSubmitData::new("signup")
            .with_field("name", "ferris")
            .into(),
        None => InteractionData::Unknown {
            type_code: UNKNOWN_TYPE_CODE,
        },
    };
    Interaction::new(info, data)
}

/// Per-interaction bookkeeping while the simulation runs.
struct Pending {
    variant: Option<InteractionKind>,
    webhook: oneshot::Receiver<WebhookReply>,
}

pub async fn run(args: &SimulateArgs, config: &FileConfig) -> Result<SimulationReport> {
    let async_listeners = config.events.async_listeners && !args.sync_listeners;
    let mut options = IngressOptions::from(&config.ingress);
    if let Some(workers) = args.workers {
        options.workers = workers;
    }

    // === Dependency Injection ===
    let cache = Arc::new(InMemoryGuildCache::new());
    cache.insert(Guild::new(GUILD_ID, "simulation"));
    let client = Arc::new(
        Client::new(Arc::new(OfflineRequestClient::new(
            "simulation runs webhook-only",
        )))
        .with_cache(cache),
    );

    let manager = Arc::new(EventManager::new(async_listeners));
    let (attempt_tx, mut attempt_rx) = mpsc::unbounded_channel();
    for index in 0..args.racers {
        manager.register(Arc::new(Racer {
            index,
            attempts: attempt_tx.clone(),
        }));
    }
    drop(attempt_tx);

    let diagnostics = Arc::new(CollectingDiagnostics::default());
    let dispatcher = InteractionDispatcher::new(manager).with_diagnostics(diagnostics.clone());
    let pool = IngressPool::start(dispatcher, client, options);

    info!(
        "Simulating {} interaction(s) + {} unknown with {} racer(s)",
        args.count, args.unknown, args.racers
    );

    let mut pending: Vec<(Snowflake, Pending)> = Vec::new();
    for i in 0..args.count + args.unknown {
        let id = FIRST_INTERACTION_ID + i as u64;
        let variant = (i < args.count).then(|| args.variant.kind_for(i));
        let (responder, webhook) = OneshotResponder::channel();
        pool.submit(Delivery::webhook(
            build_interaction(id, variant),
            Arc::new(responder),
        ))
        .await
        .context("ingress pool rejected a delivery")?;
        pending.push((Snowflake(id), Pending { variant, webhook }));
    }

    let expected = args.count * args.racers;
    let mut attempts: HashMap<Snowflake, Vec<Attempt>> = HashMap::new();
    for _ in 0..expected {
        let attempt = match tokio::time::timeout(RESULT_TIMEOUT, attempt_rx.recv()).await {
            Ok(Some(attempt)) => attempt,
            Ok(None) => bail!("racers stopped reporting"),
            Err(_) => bail!("timed out waiting for racers"),
        };
        attempts
            .entry(attempt.interaction_id)
            .or_default()
            .push(attempt);
    }

    let mut interactions = Vec::with_capacity(pending.len());
    for (interaction_id, Pending { variant, webhook }) in pending {
        let webhook_status = match tokio::time::timeout(RESULT_TIMEOUT, webhook).await {
            Ok(Ok(reply)) => Some(reply.status()),
            Ok(Err(_)) => None,
            Err(_) => {
                warn!("Webhook reply for {} never resolved", interaction_id);
                None
            }
        };

        let tries = attempts.remove(&interaction_id).unwrap_or_default();
        let winner = tries
            .iter()
            .find(|a| a.result.is_ok())
            .map(|a| a.kind);
        let lost = tries
            .iter()
            .filter(|a| matches!(a.result, Err(ReplyError::AlreadyReplied)))
            .count();
        let failed = tries
            .iter()
            .filter(|a| {
                matches!(
                    a.result,
                    Err(ReplyError::Transport(_) | ReplyError::InvalidPayload(_))
                )
            })
            .count();

        interactions.push(InteractionOutcome {
            interaction_id,
            variant,
            winner,
            webhook_status,
            racers: tries.len(),
            lost,
            failed,
        });
    }

    pool.shutdown().await;

    Ok(SimulationReport {
        workers: options.workers,
        async_listeners,
        interactions,
        diagnostics: diagnostics.messages(),
    })
}
