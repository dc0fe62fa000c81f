//! Entities returned by collaborators: cached guilds and sent messages.

use crate::core::id::Snowflake;
use crate::reply::MessageFlags;
use serde::{Deserialize, Serialize};

/// A guild as held by the entity cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
    #[serde(default)]
    pub member_count: Option<u64>,
}

impl Guild {
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id: None,
            member_count: None,
        }
    }
}

/// A message produced by a reply or follow-up, as returned by the request
/// client. Unmodelled fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub flags: MessageFlags,
    #[serde(default)]
    pub embeds: Vec<serde_json::Value>,
    #[serde(default)]
    pub components: Vec<serde_json::Value>,
}

impl Message {
    pub fn is_ephemeral(&self) -> bool {
        self.flags.contains(MessageFlags::EPHEMERAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_deserializes_from_rest_body_ignoring_extra_fields() {
        let body = r#"{
            "id": "1100",
            "channel_id": "2200",
            "content": "hello",
            "flags": 64,
            "author": {"id": "3300"},
            "tts": false
        }"#;
        let message: Message = serde_json::from_str(body).unwrap();
        assert_eq!(message.id, Snowflake(1100));
        assert_eq!(message.channel_id, Snowflake(2200));
        assert_eq!(message.content, "hello");
        assert!(message.is_ephemeral());
        assert!(message.embeds.is_empty());
    }

    #[test]
    fn guild_defaults_optional_fields() {
        let guild: Guild = serde_json::from_str(r#"{"id": "5", "name": "Rustaceans"}"#).unwrap();
        assert_eq!(guild, Guild::new(Snowflake(5), "Rustaceans"));
    }
}
