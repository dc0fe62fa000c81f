//! Client handle shared by every event.

use crate::ports::guild_cache::{GuildCache, NoGuildCache};
use crate::ports::request_client::RequestClient;
use std::fmt;
use std::sync::Arc;

/// The host's collaborators, bundled so events can reach them.
///
/// Events hold the client through an `Arc`; it is never owned by an event.
#[derive(Clone)]
pub struct Client {
    rest: Arc<dyn RequestClient>,
    cache: Arc<dyn GuildCache>,
}

impl Client {
    pub fn new(rest: Arc<dyn RequestClient>) -> Self {
        Self {
            rest,
            cache: Arc::new(NoGuildCache),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn GuildCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn rest(&self) -> &Arc<dyn RequestClient> {
        &self.rest
    }

    pub fn cache(&self) -> &dyn GuildCache {
        self.cache.as_ref()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
