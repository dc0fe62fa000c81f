//! Guild cache port
//!
//! Read-only, best-effort lookup of cached guilds. A miss is not an error:
//! the interaction may come from a DM or from a guild the cache never saw.

use relay_domain::{Guild, Snowflake};

/// Entity cache lookup used by `guild()` on interaction events.
pub trait GuildCache: Send + Sync {
    fn guild(&self, guild_id: Snowflake) -> Option<Guild>;
}

/// Cache that never holds anything, for hosts running without a cache.
pub struct NoGuildCache;

impl GuildCache for NoGuildCache {
    fn guild(&self, _guild_id: Snowflake) -> Option<Guild> {
        None
    }
}
