//! Reply payloads and the interaction response body.
//!
//! Embeds and components are carried as opaque JSON: building them is the
//! caller's concern, this crate only routes them.

use super::kind::ReplyKind;
use crate::core::error::DomainError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Maximum number of choices an autocomplete result may carry.
pub const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

/// Message flag bit set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageFlags(pub u64);

impl MessageFlags {
    pub const NONE: MessageFlags = MessageFlags(0);
    /// Only the invoking user can see the message.
    pub const EPHEMERAL: MessageFlags = MessageFlags(1 << 6);
    pub const SUPPRESS_NOTIFICATIONS: MessageFlags = MessageFlags(1 << 12);

    pub const fn contains(self, other: MessageFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: MessageFlags) -> MessageFlags {
        MessageFlags(self.0 | other.0)
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// A new message, used for `CreateMessage` replies and follow-ups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "MessageFlags::is_empty")]
    pub flags: MessageFlags,
}

impl MessageCreate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_embed(mut self, embed: serde_json::Value) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn with_component(mut self, component: serde_json::Value) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_flags(mut self, flags: MessageFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    pub fn ephemeral(self) -> Self {
        self.with_flags(MessageFlags::EPHEMERAL)
    }
}

/// Partial edit of an existing message. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl MessageUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_embeds(mut self, embeds: Vec<serde_json::Value>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    pub fn with_components(mut self, components: Vec<serde_json::Value>) -> Self {
        self.components = Some(components);
        self
    }

    /// Remove every component from the message.
    pub fn clear_components(self) -> Self {
        self.with_components(Vec::new())
    }
}

/// A modal popup shown in response to a command, component or modal submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalCreate {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<serde_json::Value>,
}

impl ModalCreate {
    pub fn new(custom_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            title: title.into(),
            components: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: serde_json::Value) -> Self {
        self.components.push(component);
        self
    }
}

/// One suggestion returned to an autocomplete request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteChoice {
    pub name: String,
    /// String, integer or number, matching the option's type.
    pub value: serde_json::Value,
}

impl AutocompleteChoice {
    pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Body of an `AutocompleteResult` reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteResult {
    pub choices: Vec<AutocompleteChoice>,
}

impl AutocompleteResult {
    /// Build a result, rejecting more than [`MAX_AUTOCOMPLETE_CHOICES`] choices.
    pub fn new(choices: Vec<AutocompleteChoice>) -> Result<Self, DomainError> {
        if choices.len() > MAX_AUTOCOMPLETE_CHOICES {
            return Err(DomainError::TooManyChoices {
                count: choices.len(),
                max: MAX_AUTOCOMPLETE_CHOICES,
            });
        }
        Ok(Self { choices })
    }
}

/// The data carried by a first reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyPayload {
    #[default]
    Empty,
    Message(MessageCreate),
    Update(MessageUpdate),
    Modal(ModalCreate),
    Autocomplete(AutocompleteResult),
}

impl ReplyPayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, ReplyPayload::Empty)
    }

    /// Payload of a deferred create: only the ephemeral flag survives.
    pub fn deferred(ephemeral: bool) -> Self {
        if ephemeral {
            ReplyPayload::Message(MessageCreate::new().ephemeral())
        } else {
            ReplyPayload::Empty
        }
    }
}

impl From<MessageCreate> for ReplyPayload {
    fn from(value: MessageCreate) -> Self {
        ReplyPayload::Message(value)
    }
}

impl From<MessageUpdate> for ReplyPayload {
    fn from(value: MessageUpdate) -> Self {
        ReplyPayload::Update(value)
    }
}

impl From<ModalCreate> for ReplyPayload {
    fn from(value: ModalCreate) -> Self {
        ReplyPayload::Modal(value)
    }
}

impl From<AutocompleteResult> for ReplyPayload {
    fn from(value: AutocompleteResult) -> Self {
        ReplyPayload::Autocomplete(value)
    }
}

/// A complete first reply: kind plus payload.
///
/// Serializes to the interaction callback body
/// `{"type": <callback code>, "data": <payload>}`; `data` is omitted when the
/// payload is empty. [`ReplyKind::Acknowledge`] has no callback code and is
/// serialized with `type` omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionResponse {
    pub kind: ReplyKind,
    pub payload: ReplyPayload,
}

impl InteractionResponse {
    pub fn new(kind: ReplyKind, payload: ReplyPayload) -> Self {
        Self { kind, payload }
    }
}

impl Serialize for InteractionResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(code) = self.kind.callback_code() {
            map.serialize_entry("type", &code)?;
        }
        if !self.payload.is_empty() {
            map.serialize_entry("data", &self.payload)?;
        }
        map.end()
    }
}
