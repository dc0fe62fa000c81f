//! In-memory guild cache.

use relay_application::ports::guild_cache::GuildCache;
use relay_domain::{Guild, Snowflake};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// [`GuildCache`] backed by a `RwLock<HashMap>`, filled by the host (e.g. from
/// gateway guild events).
#[derive(Debug, Default)]
pub struct InMemoryGuildCache {
    guilds: RwLock<HashMap<Snowflake, Guild>>,
}

impl InMemoryGuildCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a guild, returning the previous entry.
    pub fn insert(&self, guild: Guild) -> Option<Guild> {
        self.guilds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(guild.id, guild)
    }

    pub fn remove(&self, guild_id: Snowflake) -> Option<Guild> {
        self.guilds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&guild_id)
    }

    pub fn len(&self) -> usize {
        self.guilds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GuildCache for InMemoryGuildCache {
    fn guild(&self, guild_id: Snowflake) -> Option<Guild> {
        self.guilds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&guild_id)
            .cloned()
    }
}
