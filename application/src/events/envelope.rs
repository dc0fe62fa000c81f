//! Per-event context attached by the dispatcher.

use crate::client::Client;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Immutable context shared by every notification of one interaction.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    client: Arc<Client>,
    sequence: u64,
    shard_id: u32,
}

impl EventEnvelope {
    pub fn new(client: Arc<Client>, sequence: u64, shard_id: u32) -> Self {
        Self {
            client,
            sequence,
            shard_id,
        }
    }

    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }

    /// Gateway sequence number, or a host-assigned one for webhook deliveries.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn shard_id(&self) -> u32 {
        self.shard_id
    }
}

/// Process-local monotonic sequence source for deliveries that arrive without
/// one (the webhook path).
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: AtomicU64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start numbering at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockRequestClient, client_with};

    #[test]
    fn envelope_exposes_its_fields() {
        let client = client_with(Arc::new(MockRequestClient::new()));
        let envelope = EventEnvelope::new(client.clone(), 42, 3);
        assert_eq!(envelope.sequence(), 42);
        assert_eq!(envelope.shard_id(), 3);
        assert!(Arc::ptr_eq(envelope.client(), &client));
    }

    #[test]
    fn sequence_counter_is_monotonic() {
        let counter = SequenceCounter::starting_at(10);
        assert_eq!(counter.next(), 10);
        assert_eq!(counter.next(), 11);
        assert_eq!(counter.next(), 12);
    }

    #[test]
    fn sequence_counter_hands_out_unique_values_across_threads() {
        let counter = Arc::new(SequenceCounter::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || (0..100).map(|_| counter.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
    }
}
