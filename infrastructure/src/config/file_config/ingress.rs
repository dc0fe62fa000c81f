//! Ingress configuration from TOML (`[ingress]` section)

use serde::{Deserialize, Serialize};

/// Raw ingress pool configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIngressConfig {
    /// Worker tasks pulling deliveries. `0` spawns one task per delivery.
    pub workers: usize,
    /// Bounded queue size between the transport and the workers.
    pub queue_capacity: usize,
    /// Shard id stamped on deliveries that do not carry one.
    pub shard_id: u32,
}

impl Default for FileIngressConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_capacity: 256,
            shard_id: 0,
        }
    }
}
