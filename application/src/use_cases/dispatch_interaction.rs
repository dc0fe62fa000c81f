//! Dispatch Interaction use case.
//!
//! Turns one inbound [`Interaction`] into its notifications:
//!
//! 1. Wrap it in an [`EventEnvelope`] (client, sequence, shard)
//! 2. Create a fresh [`ReplyGuard`] and a [`ReplyChannel`] bound to it. The
//!    channel writes to the direct responder when one is supplied, otherwise
//!    to the client's request client.
//! 3. Broadcast [`InteractionCreate`]
//! 4. Classify the variant and broadcast the matching typed notification,
//!    sharing the same guard and channel
//!
//! An unknown variant is reported to the [`DiagnosticSink`] and only the
//! generic notification is broadcast.

use crate::client::Client;
use crate::events::{
    AutocompleteInteractionCreate, CommandInteractionCreate, ComponentInteractionCreate,
    EventEnvelope, InteractionContext, InteractionCreate, InteractionEvent,
    ModalSubmitInteractionCreate,
};
use crate::ports::diagnostics::{DiagnosticSink, DispatchDiagnostic, LogDiagnostics};
use crate::ports::direct_responder::DirectResponder;
use crate::ports::event_broadcaster::EventBroadcaster;
use crate::reply::{ReplyChannel, ReplyTransport};
use relay_domain::{Interaction, InteractionKind, InteractionVariant, ReplyGuard, Snowflake};
use std::sync::Arc;
use tracing::debug;

/// What the dispatcher did with one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub interaction_id: Snowflake,
    /// The variant broadcast after the generic notification, or `None` when
    /// the variant was unknown.
    pub variant: Option<InteractionKind>,
}

impl DispatchOutcome {
    /// Number of notifications broadcast.
    pub fn broadcasts(&self) -> usize {
        if self.variant.is_some() { 2 } else { 1 }
    }
}

/// Use case for dispatching inbound interactions to subscribers.
pub struct InteractionDispatcher {
    broadcaster: Arc<dyn EventBroadcaster>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Clone for InteractionDispatcher {
    fn clone(&self) -> Self {
        Self {
            broadcaster: self.broadcaster.clone(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

impl InteractionDispatcher {
    pub fn new(broadcaster: Arc<dyn EventBroadcaster>) -> Self {
        Self {
            broadcaster,
            diagnostics: Arc::new(LogDiagnostics),
        }
    }

    /// Replace the default logging diagnostic sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub async fn dispatch(
        &self,
        client: Arc<Client>,
        sequence: u64,
        shard_id: u32,
        interaction: Interaction,
        responder: Option<Arc<dyn DirectResponder>>,
    ) -> DispatchOutcome {
        let interaction_id = interaction.id();
        let transport = match responder {
            Some(responder) => ReplyTransport::Direct(responder),
            None => ReplyTransport::Rest(client.rest().clone()),
        };

        let envelope = EventEnvelope::new(client, sequence, shard_id);
        let guard = Arc::new(ReplyGuard::new());
        let channel = ReplyChannel::new(&interaction, guard.clone(), transport);
        let context = InteractionContext::new(envelope, interaction.info.clone(), guard, channel);

        debug!(
            interaction_id = %interaction_id,
            sequence,
            shard = shard_id,
            "Dispatching interaction (type {})",
            interaction.type_code()
        );

        let variant = interaction.kind();
        let classified = interaction.classify();

        self.broadcaster
            .broadcast(InteractionEvent::InteractionCreate(InteractionCreate::new(
                context.clone(),
                Arc::new(interaction),
            )))
            .await;

        let event = match classified {
            InteractionVariant::Command(typed) => {
                InteractionEvent::Command(CommandInteractionCreate::new(context, typed))
            }
            InteractionVariant::Component(typed) => {
                InteractionEvent::Component(ComponentInteractionCreate::new(context, typed))
            }
            InteractionVariant::Autocomplete(typed) => {
                InteractionEvent::Autocomplete(AutocompleteInteractionCreate::new(context, typed))
            }
            InteractionVariant::ModalSubmit(typed) => {
                InteractionEvent::ModalSubmit(ModalSubmitInteractionCreate::new(context, typed))
            }
            InteractionVariant::Unknown { type_code } => {
                self.diagnostics
                    .report(DispatchDiagnostic::UnknownInteractionVariant {
                        interaction_id,
                        type_code,
                    });
                return DispatchOutcome {
                    interaction_id,
                    variant: None,
                };
            }
        };

        debug!(
            interaction_id = %interaction_id,
            "Broadcasting {}",
            event.category()
        );
        self.broadcaster.broadcast(event).await;

        DispatchOutcome {
            interaction_id,
            variant,
        }
    }
}
