//! Ingress worker pool.
//!
//! Decouples the transport from dispatch: the transport submits deliveries to
//! a bounded queue and returns; worker tasks pull them and run the
//! dispatcher. A slow subscriber of one interaction only holds up the worker
//! running it, never the transport or the other workers.
//!
//! ```text
//! transport ──submit──▶ [bounded mpsc] ──▶ worker 1 ──▶ dispatch
//!                                     ├──▶ worker 2 ──▶ dispatch
//!                                     └──▶ worker N ──▶ dispatch
//! ```
//!
//! With `workers = 0` a single receive loop spawns one task per delivery;
//! shutdown waits for those tasks too.

use crate::config::FileIngressConfig;
use relay_application::events::SequenceCounter;
use relay_application::ports::direct_responder::DirectResponder;
use relay_application::{Client, InteractionDispatcher};
use relay_domain::Interaction;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Errors returned to the transport when submitting a delivery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngressError {
    #[error("Ingress pool is shut down")]
    Closed,
}

/// One inbound interaction as handed over by the transport.
pub struct Delivery {
    pub interaction: Interaction,
    /// Gateway sequence number; webhook deliveries leave it empty and get one
    /// from the pool's [`SequenceCounter`].
    pub sequence: Option<u64>,
    /// Shard the delivery came from; defaults to the pool's shard.
    pub shard_id: Option<u32>,
    /// Response writer of a webhook delivery.
    pub responder: Option<Arc<dyn DirectResponder>>,
}

impl Delivery {
    /// A delivery received over the gateway.
    pub fn gateway(interaction: Interaction, sequence: u64, shard_id: u32) -> Self {
        Self {
            interaction,
            sequence: Some(sequence),
            shard_id: Some(shard_id),
            responder: None,
        }
    }

    /// A delivery received over the HTTP webhook.
    pub fn webhook(interaction: Interaction, responder: Arc<dyn DirectResponder>) -> Self {
        Self {
            interaction,
            sequence: None,
            shard_id: None,
            responder: Some(responder),
        }
    }
}

/// Pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngressOptions {
    pub workers: usize,
    pub queue_capacity: usize,
    pub shard_id: u32,
}

impl Default for IngressOptions {
    fn default() -> Self {
        Self::from(&FileIngressConfig::default())
    }
}

impl From<&FileIngressConfig> for IngressOptions {
    fn from(config: &FileIngressConfig) -> Self {
        Self {
            workers: config.workers,
            queue_capacity: config.queue_capacity.max(1),
            shard_id: config.shard_id,
        }
    }
}

/// Everything a worker needs to dispatch a delivery.
#[derive(Clone)]
struct DispatchTarget {
    dispatcher: InteractionDispatcher,
    client: Arc<Client>,
    sequence: Arc<SequenceCounter>,
    shard_id: u32,
}

impl DispatchTarget {
    async fn run(&self, delivery: Delivery) {
        let sequence = delivery
            .sequence
            .unwrap_or_else(|| self.sequence.next());
        let shard_id = delivery.shard_id.unwrap_or(self.shard_id);
        self.dispatcher
            .dispatch(
                self.client.clone(),
                sequence,
                shard_id,
                delivery.interaction,
                delivery.responder,
            )
            .await;
    }
}

/// Cloneable submission side of an [`IngressPool`].
#[derive(Clone)]
pub struct IngressHandle {
    sender: mpsc::Sender<Delivery>,
    cancel: CancellationToken,
}

impl IngressHandle {
    /// Queue a delivery, waiting for room when the queue is full.
    pub async fn submit(&self, delivery: Delivery) -> Result<(), IngressError> {
        if self.cancel.is_cancelled() {
            return Err(IngressError::Closed);
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(IngressError::Closed),
            sent = self.sender.send(delivery) => sent.map_err(|_| IngressError::Closed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Bounded queue plus worker tasks running the dispatcher.
pub struct IngressPool {
    handle: IngressHandle,
    workers: Vec<JoinHandle<()>>,
    /// Dispatch tasks spawned in task-per-delivery mode.
    dispatches: TaskTracker,
}

impl IngressPool {
    /// Start the pool on the current tokio runtime.
    pub fn start(
        dispatcher: InteractionDispatcher,
        client: Arc<Client>,
        options: IngressOptions,
    ) -> Self {
        Self::start_with_counter(dispatcher, client, options, Arc::new(SequenceCounter::new()))
    }

    /// Start the pool with a caller-provided sequence source.
    pub fn start_with_counter(
        dispatcher: InteractionDispatcher,
        client: Arc<Client>,
        options: IngressOptions,
        sequence: Arc<SequenceCounter>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(options.queue_capacity.max(1));
        let cancel = CancellationToken::new();
        let target = DispatchTarget {
            dispatcher,
            client,
            sequence,
            shard_id: options.shard_id,
        };

        let dispatches = TaskTracker::new();
        let workers = if options.workers == 0 {
            vec![tokio::spawn(spawn_per_delivery(
                receiver,
                target,
                cancel.clone(),
                dispatches.clone(),
            ))]
        } else {
            let receiver = Arc::new(Mutex::new(receiver));
            (0..options.workers)
                .map(|index| {
                    tokio::spawn(worker_loop(
                        index,
                        receiver.clone(),
                        target.clone(),
                        cancel.clone(),
                    ))
                })
                .collect()
        };

        if options.workers == 0 {
            info!(
                "Ingress pool started (task per delivery, queue capacity {})",
                options.queue_capacity.max(1)
            );
        } else {
            info!(
                "Ingress pool started ({} worker(s), queue capacity {})",
                options.workers,
                options.queue_capacity.max(1)
            );
        }

        Self {
            handle: IngressHandle { sender, cancel },
            workers,
            dispatches,
        }
    }

    pub fn handle(&self) -> IngressHandle {
        self.handle.clone()
    }

    pub async fn submit(&self, delivery: Delivery) -> Result<(), IngressError> {
        self.handle.submit(delivery).await
    }

    /// Stop accepting deliveries and wait for the workers to exit.
    ///
    /// Dispatches already running complete; deliveries still queued are
    /// dropped.
    pub async fn shutdown(self) {
        self.handle.cancel.cancel();
        for worker in self.workers {
            if let Err(e) = worker.await {
                warn!("Ingress worker ended abnormally: {}", e);
            }
        }
        self.dispatches.close();
        self.dispatches.wait().await;
        debug!("Ingress pool stopped");
    }
}

async fn worker_loop(
    index: usize,
    receiver: Arc<Mutex<mpsc::Receiver<Delivery>>>,
    target: DispatchTarget,
    cancel: CancellationToken,
) {
    loop {
        let delivery = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            delivery = async { receiver.lock().await.recv().await } => delivery,
        };
        match delivery {
            Some(delivery) => target.run(delivery).await,
            None => break,
        }
    }
    debug!("Ingress worker {} exiting", index);
}

async fn spawn_per_delivery(
    mut receiver: mpsc::Receiver<Delivery>,
    target: DispatchTarget,
    cancel: CancellationToken,
    dispatches: TaskTracker,
) {
    loop {
        let delivery = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            delivery = receiver.recv() => delivery,
        };
        match delivery {
            Some(delivery) => {
                let target = target.clone();
                dispatches.spawn(async move { target.run(delivery).await });
            }
            None => break,
        }
    }
    debug!("Ingress receive loop exiting");
}
