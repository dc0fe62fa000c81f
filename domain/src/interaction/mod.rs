//! Inbound interaction model.
//!
//! An [`Interaction`] is one already-structured inbound request that must
//! receive at most one initial reply. Its [`InteractionData`] is a closed sum
//! over the four known variants plus [`InteractionData::Unknown`] for type
//! codes this crate does not model.
//!
//! | Variant | Type code | Typed view |
//! |---------|-----------|------------|
//! | [`Command`](InteractionKind::Command) | 2 | [`CommandInteraction`] |
//! | [`Component`](InteractionKind::Component) | 3 | [`ComponentInteraction`] |
//! | [`Autocomplete`](InteractionKind::Autocomplete) | 4 | [`AutocompleteInteraction`] |
//! | [`ModalSubmit`](InteractionKind::ModalSubmit) | 5 | [`ModalSubmitInteraction`] |
//!
//! # Examples
//!
//! ```
//! use relay_domain::interaction::{
//!     CommandData, Interaction, InteractionInfo, InteractionKind, InteractionVariant,
//! };
//! use relay_domain::Snowflake;
//!
//! let info = InteractionInfo::new(Snowflake(1), Snowflake(2), "token");
//! let interaction = Interaction::new(info, CommandData::chat_input(Snowflake(3), "ping").into());
//!
//! assert_eq!(interaction.kind(), Some(InteractionKind::Command));
//! assert!(matches!(interaction.classify(), InteractionVariant::Command(_)));
//! ```

mod autocomplete;
mod command;
mod component;
mod modal;

pub use autocomplete::{AutocompleteData, AutocompleteOption};
pub use command::{CommandData, CommandKind, CommandOption};
pub use component::ComponentData;
pub use modal::{ModalField, ModalSubmitData};

use crate::core::id::Snowflake;
use std::fmt;

/// The four interaction variants this crate dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Slash, user or message command invocation.
    Command,
    /// Button or select menu activation.
    Component,
    /// Autocomplete request for a command option.
    Autocomplete,
    /// Modal form submission.
    ModalSubmit,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 4] = [
        InteractionKind::Command,
        InteractionKind::Component,
        InteractionKind::Autocomplete,
        InteractionKind::ModalSubmit,
    ];

    /// Protocol interaction type code.
    pub fn type_code(&self) -> u8 {
        match self {
            InteractionKind::Command => 2,
            InteractionKind::Component => 3,
            InteractionKind::Autocomplete => 4,
            InteractionKind::ModalSubmit => 5,
        }
    }

    pub fn from_type_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_code() == code)
    }

    /// Returns the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Command => "command",
            InteractionKind::Component => "component",
            InteractionKind::Autocomplete => "autocomplete",
            InteractionKind::ModalSubmit => "modal_submit",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "command" | "application_command" => Ok(InteractionKind::Command),
            "component" => Ok(InteractionKind::Component),
            "autocomplete" => Ok(InteractionKind::Autocomplete),
            "modal_submit" | "modal" => Ok(InteractionKind::ModalSubmit),
            other => Err(format!("unknown interaction kind: {other}")),
        }
    }
}

/// Fields shared by every interaction variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionInfo {
    pub id: Snowflake,
    pub application_id: Snowflake,
    /// Continuation token; addresses the reply and every follow-up.
    pub token: String,
    /// `None` for interactions that happened in a DM.
    pub guild_id: Option<Snowflake>,
    pub channel_id: Option<Snowflake>,
    pub user_id: Option<Snowflake>,
}

impl InteractionInfo {
    pub fn new(id: Snowflake, application_id: Snowflake, token: impl Into<String>) -> Self {
        Self {
            id,
            application_id,
            token: token.into(),
            guild_id: None,
            channel_id: None,
            user_id: None,
        }
    }

    pub fn with_guild(mut self, guild_id: Snowflake) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    pub fn with_channel(mut self, channel_id: Snowflake) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    pub fn with_user(mut self, user_id: Snowflake) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Variant-specific payload of an interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionData {
    Command(CommandData),
    Component(ComponentData),
    Autocomplete(AutocompleteData),
    ModalSubmit(ModalSubmitData),
    /// A type code outside the four known variants (e.g. ping, or a variant
    /// introduced after this crate was written).
    Unknown { type_code: u8 },
}

impl InteractionData {
    pub fn kind(&self) -> Option<InteractionKind> {
        match self {
            InteractionData::Command(_) => Some(InteractionKind::Command),
            InteractionData::Component(_) => Some(InteractionKind::Component),
            InteractionData::Autocomplete(_) => Some(InteractionKind::Autocomplete),
            InteractionData::ModalSubmit(_) => Some(InteractionKind::ModalSubmit),
            InteractionData::Unknown { .. } => None,
        }
    }

    pub fn type_code(&self) -> u8 {
        match self {
            InteractionData::Unknown { type_code } => *type_code,
            known => known.kind().map(|k| k.type_code()).unwrap_or_default(),
        }
    }
}

impl From<CommandData> for InteractionData {
    fn from(value: CommandData) -> Self {
        InteractionData::Command(value)
    }
}

impl From<ComponentData> for InteractionData {
    fn from(value: ComponentData) -> Self {
        InteractionData::Component(value)
    }
}

impl From<AutocompleteData> for InteractionData {
    fn from(value: AutocompleteData) -> Self {
        InteractionData::Autocomplete(value)
    }
}

impl From<ModalSubmitData> for InteractionData {
    fn from(value: ModalSubmitData) -> Self {
        InteractionData::ModalSubmit(value)
    }
}

/// An inbound interaction. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub info: InteractionInfo,
    pub data: InteractionData,
}

impl Interaction {
    pub fn new(info: InteractionInfo, data: InteractionData) -> Self {
        Self { info, data }
    }

    pub fn id(&self) -> Snowflake {
        self.info.id
    }

    pub fn application_id(&self) -> Snowflake {
        self.info.application_id
    }

    pub fn token(&self) -> &str {
        &self.info.token
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.info.guild_id
    }

    pub fn kind(&self) -> Option<InteractionKind> {
        self.data.kind()
    }

    pub fn type_code(&self) -> u8 {
        self.data.type_code()
    }

    /// Split into the typed view matching this interaction's variant.
    pub fn classify(&self) -> InteractionVariant {
        let info = self.info.clone();
        match &self.data {
            InteractionData::Command(data) => InteractionVariant::Command(TypedInteraction {
                info,
                data: data.clone(),
            }),
            InteractionData::Component(data) => InteractionVariant::Component(TypedInteraction {
                info,
                data: data.clone(),
            }),
            InteractionData::Autocomplete(data) => {
                InteractionVariant::Autocomplete(TypedInteraction {
                    info,
                    data: data.clone(),
                })
            }
            InteractionData::ModalSubmit(data) => {
                InteractionVariant::ModalSubmit(TypedInteraction {
                    info,
                    data: data.clone(),
                })
            }
            InteractionData::Unknown { type_code } => InteractionVariant::Unknown {
                type_code: *type_code,
            },
        }
    }
}

/// An interaction whose variant is known statically.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedInteraction<D> {
    pub info: InteractionInfo,
    pub data: D,
}

impl<D> TypedInteraction<D> {
    pub fn id(&self) -> Snowflake {
        self.info.id
    }

    pub fn application_id(&self) -> Snowflake {
        self.info.application_id
    }

    pub fn token(&self) -> &str {
        &self.info.token
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.info.guild_id
    }
}

pub type CommandInteraction = TypedInteraction<CommandData>;
pub type ComponentInteraction = TypedInteraction<ComponentData>;
pub type AutocompleteInteraction = TypedInteraction<AutocompleteData>;
pub type ModalSubmitInteraction = TypedInteraction<ModalSubmitData>;

/// Result of classifying an interaction by its variant.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionVariant {
    Command(CommandInteraction),
    Component(ComponentInteraction),
    Autocomplete(AutocompleteInteraction),
    ModalSubmit(ModalSubmitInteraction),
    Unknown { type_code: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> InteractionInfo {
        InteractionInfo::new(Snowflake(10), Snowflake(20), "tok")
            .with_guild(Snowflake(30))
            .with_channel(Snowflake(40))
            .with_user(Snowflake(50))
    }

    #[test]
    fn type_codes_round_trip_through_kind() {
        for kind in InteractionKind::ALL {
            assert_eq!(InteractionKind::from_type_code(kind.type_code()), Some(kind));
        }
        assert_eq!(InteractionKind::from_type_code(1), None);
    }

    #[test]
    fn kind_parses_cli_spellings() {
        assert_eq!("modal-submit".parse(), Ok(InteractionKind::ModalSubmit));
        assert_eq!("Command".parse(), Ok(InteractionKind::Command));
        assert!("ping".parse::<InteractionKind>().is_err());
    }

    #[test]
    fn classify_keeps_shared_fields() {
        let interaction = Interaction::new(
            info(),
            ComponentData::button("confirm", Snowflake(99)).into(),
        );
        match interaction.classify() {
            InteractionVariant::Component(component) => {
                assert_eq!(component.id(), Snowflake(10));
                assert_eq!(component.application_id(), Snowflake(20));
                assert_eq!(component.token(), "tok");
                assert_eq!(component.guild_id(), Some(Snowflake(30)));
                assert_eq!(component.data.custom_id, "confirm");
            }
            other => panic!("expected component, got {other:?}"),
        }
    }

    #[test]
    fn classify_unknown_keeps_type_code() {
        let interaction = Interaction::new(info(), InteractionData::Unknown { type_code: 1 });
        assert_eq!(interaction.kind(), None);
        assert_eq!(interaction.type_code(), 1);
        assert_eq!(
            interaction.classify(),
            InteractionVariant::Unknown { type_code: 1 }
        );
    }

    #[test]
    fn each_known_variant_classifies_to_its_kind() {
        let cases: Vec<(InteractionData, InteractionKind)> = vec![
            (
                CommandData::chat_input(Snowflake(1), "ping").into(),
                InteractionKind::Command,
            ),
            (
                ComponentData::button("b", Snowflake(2)).into(),
                InteractionKind::Component,
            ),
            (
                AutocompleteData::new(Snowflake(3), "search").into(),
                InteractionKind::Autocomplete,
            ),
            (
                ModalSubmitData::new("form").into(),
                InteractionKind::ModalSubmit,
            ),
        ];
        for (data, kind) in cases {
            let interaction = Interaction::new(info(), data);
            assert_eq!(interaction.kind(), Some(kind));
            assert_eq!(interaction.type_code(), kind.type_code());
        }
    }
}
