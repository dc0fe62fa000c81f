//! Interaction notifications broadcast to subscribers.
//!
//! Each interaction produces one [`InteractionCreate`] (the generic category)
//! and, when its variant is known, one variant notification. All of them
//! share the same [`InteractionContext`], so a reply sent through any of them
//! is seen by all.

use super::context::{
    Acknowledge, EventContext, Followups, InteractionContext, MessageReplies, UpdateReplies,
};
use crate::ports::request_client::RequestOptions;
use crate::reply::ReplyError;
use relay_domain::{
    AutocompleteChoice, AutocompleteData, AutocompleteInteraction, AutocompleteResult,
    CommandData, CommandInteraction, ComponentData, ComponentInteraction, Interaction,
    InteractionKind, ModalSubmitData, ModalSubmitInteraction, ReplyKind, ReplyPayload,
};
use std::fmt;
use std::sync::Arc;

/// Generic notification, broadcast for every interaction.
#[derive(Debug, Clone)]
pub struct InteractionCreate {
    context: InteractionContext,
    interaction: Arc<Interaction>,
}

impl InteractionCreate {
    pub fn new(context: InteractionContext, interaction: Arc<Interaction>) -> Self {
        Self {
            context,
            interaction,
        }
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Send a first reply of any kind.
    ///
    /// The caller is responsible for choosing a kind that is legal for the
    /// interaction's variant.
    pub async fn respond(
        &self,
        kind: ReplyKind,
        payload: ReplyPayload,
        opts: RequestOptions,
    ) -> Result<(), ReplyError> {
        self.context.channel().send(kind, payload, opts).await
    }
}

/// Command invocation.
#[derive(Debug, Clone)]
pub struct CommandInteractionCreate {
    context: InteractionContext,
    interaction: CommandInteraction,
}

impl CommandInteractionCreate {
    pub fn new(context: InteractionContext, interaction: CommandInteraction) -> Self {
        Self {
            context,
            interaction,
        }
    }

    pub fn interaction(&self) -> &CommandInteraction {
        &self.interaction
    }

    pub fn data(&self) -> &CommandData {
        &self.interaction.data
    }
}

/// Button or select menu activation.
#[derive(Debug, Clone)]
pub struct ComponentInteractionCreate {
    context: InteractionContext,
    interaction: ComponentInteraction,
}

impl ComponentInteractionCreate {
    pub fn new(context: InteractionContext, interaction: ComponentInteraction) -> Self {
        Self {
            context,
            interaction,
        }
    }

    pub fn interaction(&self) -> &ComponentInteraction {
        &self.interaction
    }

    pub fn data(&self) -> &ComponentData {
        &self.interaction.data
    }
}

/// Autocomplete request. Only `acknowledge` and `autocomplete_result` reply
/// to it; there are no follow-ups.
#[derive(Debug, Clone)]
pub struct AutocompleteInteractionCreate {
    context: InteractionContext,
    interaction: AutocompleteInteraction,
}

impl AutocompleteInteractionCreate {
    pub fn new(context: InteractionContext, interaction: AutocompleteInteraction) -> Self {
        Self {
            context,
            interaction,
        }
    }

    pub fn interaction(&self) -> &AutocompleteInteraction {
        &self.interaction
    }

    pub fn data(&self) -> &AutocompleteData {
        &self.interaction.data
    }

    /// Return suggestions for the focused option.
    ///
    /// More than 25 choices is rejected with [`ReplyError::InvalidPayload`]
    /// before anything is sent.
    pub async fn autocomplete_result(
        &self,
        choices: Vec<AutocompleteChoice>,
    ) -> Result<(), ReplyError> {
        let result = AutocompleteResult::new(choices)?;
        self.context
            .channel()
            .send(
                ReplyKind::AutocompleteResult,
                result.into(),
                RequestOptions::default(),
            )
            .await
    }
}

/// Modal form submission.
#[derive(Debug, Clone)]
pub struct ModalSubmitInteractionCreate {
    context: InteractionContext,
    interaction: ModalSubmitInteraction,
}

impl ModalSubmitInteractionCreate {
    pub fn new(context: InteractionContext, interaction: ModalSubmitInteraction) -> Self {
        Self {
            context,
            interaction,
        }
    }

    pub fn interaction(&self) -> &ModalSubmitInteraction {
        &self.interaction
    }

    pub fn data(&self) -> &ModalSubmitData {
        &self.interaction.data
    }
}

macro_rules! impl_event_context {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EventContext for $ty {
                fn context(&self) -> &InteractionContext {
                    &self.context
                }
            }
        )*
    };
}

impl_event_context!(
    InteractionCreate,
    CommandInteractionCreate,
    ComponentInteractionCreate,
    AutocompleteInteractionCreate,
    ModalSubmitInteractionCreate,
);

impl Followups for InteractionCreate {}

impl Acknowledge for CommandInteractionCreate {}
impl MessageReplies for CommandInteractionCreate {}
impl Followups for CommandInteractionCreate {}

impl Acknowledge for ComponentInteractionCreate {}
impl MessageReplies for ComponentInteractionCreate {}
impl UpdateReplies for ComponentInteractionCreate {}
impl Followups for ComponentInteractionCreate {}

impl Acknowledge for AutocompleteInteractionCreate {}

impl Acknowledge for ModalSubmitInteractionCreate {}
impl MessageReplies for ModalSubmitInteractionCreate {}
impl UpdateReplies for ModalSubmitInteractionCreate {}
impl Followups for ModalSubmitInteractionCreate {}

/// Broadcast category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Every interaction, regardless of variant.
    InteractionCreate,
    Command,
    Component,
    Autocomplete,
    ModalSubmit,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        EventCategory::InteractionCreate,
        EventCategory::Command,
        EventCategory::Component,
        EventCategory::Autocomplete,
        EventCategory::ModalSubmit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::InteractionCreate => "interaction_create",
            EventCategory::Command => "command_interaction_create",
            EventCategory::Component => "component_interaction_create",
            EventCategory::Autocomplete => "autocomplete_interaction_create",
            EventCategory::ModalSubmit => "modal_submit_interaction_create",
        }
    }
}

impl From<InteractionKind> for EventCategory {
    fn from(kind: InteractionKind) -> Self {
        match kind {
            InteractionKind::Command => EventCategory::Command,
            InteractionKind::Component => EventCategory::Component,
            InteractionKind::Autocomplete => EventCategory::Autocomplete,
            InteractionKind::ModalSubmit => EventCategory::ModalSubmit,
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification, tagged by category.
#[derive(Debug, Clone)]
pub enum InteractionEvent {
    InteractionCreate(InteractionCreate),
    Command(CommandInteractionCreate),
    Component(ComponentInteractionCreate),
    Autocomplete(AutocompleteInteractionCreate),
    ModalSubmit(ModalSubmitInteractionCreate),
}

impl InteractionEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            InteractionEvent::InteractionCreate(_) => EventCategory::InteractionCreate,
            InteractionEvent::Command(_) => EventCategory::Command,
            InteractionEvent::Component(_) => EventCategory::Component,
            InteractionEvent::Autocomplete(_) => EventCategory::Autocomplete,
            InteractionEvent::ModalSubmit(_) => EventCategory::ModalSubmit,
        }
    }

    pub fn as_context(&self) -> &dyn EventContext {
        match self {
            InteractionEvent::InteractionCreate(e) => e,
            InteractionEvent::Command(e) => e,
            InteractionEvent::Component(e) => e,
            InteractionEvent::Autocomplete(e) => e,
            InteractionEvent::ModalSubmit(e) => e,
        }
    }
}
