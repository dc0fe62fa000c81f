//! Initial reply shapes an interaction can receive.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of an interaction's first (synchronous) reply.
///
/// Which kinds are legal depends on the interaction variant; the typed
/// interaction events only expose the operations their variant allows.
///
/// | Kind | Callback type | Legal for |
/// |------|---------------|-----------|
/// | `Acknowledge` | none (HTTP `202`) | all variants |
/// | `CreateMessage` | 4 | command, component, modal submit |
/// | `DeferredCreateMessage` | 5 | command, component, modal submit |
/// | `DeferredUpdateMessage` | 6 | component, modal submit |
/// | `UpdateMessage` | 7 | component, modal submit |
/// | `AutocompleteResult` | 8 | autocomplete |
/// | `Modal` | 9 | command, component, modal submit |
/// | `LaunchActivity` | 12 | command, component, modal submit |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Content-less affirmative reply; real content is produced out-of-band.
    Acknowledge,
    CreateMessage,
    /// "Thinking..." placeholder, edited later through the initial reply.
    DeferredCreateMessage,
    /// Silent acknowledgement of a component or modal; the source message is
    /// edited later.
    DeferredUpdateMessage,
    UpdateMessage,
    AutocompleteResult,
    Modal,
    LaunchActivity,
}

impl ReplyKind {
    pub const ALL: [ReplyKind; 8] = [
        ReplyKind::Acknowledge,
        ReplyKind::CreateMessage,
        ReplyKind::DeferredCreateMessage,
        ReplyKind::DeferredUpdateMessage,
        ReplyKind::UpdateMessage,
        ReplyKind::AutocompleteResult,
        ReplyKind::Modal,
        ReplyKind::LaunchActivity,
    ];

    /// Interaction callback type code, or `None` for [`ReplyKind::Acknowledge`]
    /// which has no callback body.
    pub fn callback_code(&self) -> Option<u8> {
        match self {
            ReplyKind::Acknowledge => None,
            ReplyKind::CreateMessage => Some(4),
            ReplyKind::DeferredCreateMessage => Some(5),
            ReplyKind::DeferredUpdateMessage => Some(6),
            ReplyKind::UpdateMessage => Some(7),
            ReplyKind::AutocompleteResult => Some(8),
            ReplyKind::Modal => Some(9),
            ReplyKind::LaunchActivity => Some(12),
        }
    }

    /// Resolve a callback type code back to its kind.
    pub fn from_callback_code(code: u8) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.callback_code() == Some(code))
            .ok_or(DomainError::UnknownReplyKind(code))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(
            self,
            ReplyKind::DeferredCreateMessage | ReplyKind::DeferredUpdateMessage
        )
    }

    /// Returns the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Acknowledge => "acknowledge",
            ReplyKind::CreateMessage => "create_message",
            ReplyKind::DeferredCreateMessage => "deferred_create_message",
            ReplyKind::DeferredUpdateMessage => "deferred_update_message",
            ReplyKind::UpdateMessage => "update_message",
            ReplyKind::AutocompleteResult => "autocomplete_result",
            ReplyKind::Modal => "modal",
            ReplyKind::LaunchActivity => "launch_activity",
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
