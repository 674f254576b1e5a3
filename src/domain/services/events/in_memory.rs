//! Broker stand-ins for tests and local runs.
//!
//! [`InMemoryEventGateway`] records what was published and can be told to fail.
//! [`InMemoryEventSource`] is a queue fed through an [`InMemoryQueueHandle`],
//! keeping a log of how every delivery was settled.

use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::{
    event_types::BracketEvent,
    gateway::{EventGateway, EventSource, GatewayError, InboundDelivery},
};

#[derive(Default)]
struct GatewayState {
    published: Vec<BracketEvent>,
    failures_remaining: usize,
}

/// Recording gateway. Clones share the same record.
#[derive(Clone, Default)]
pub struct InMemoryEventGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl InMemoryEventGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` publishes fail
    pub fn fail_next(&self, count: usize) {
        self.state.lock().failures_remaining = count;
    }

    /// Everything published so far, in order
    pub fn published(&self) -> Vec<BracketEvent> {
        self.state.lock().published.clone()
    }

    pub fn published_with_key(&self, routing_key: &str) -> Vec<BracketEvent> {
        self.state
            .lock()
            .published
            .iter()
            .filter(|event| event.routing_key() == routing_key)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.state.lock().published.clear();
    }
}

#[async_trait]
impl EventGateway for InMemoryEventGateway {
    async fn publish(&self, event: &BracketEvent) -> Result<(), GatewayError> {
        let mut state = self.state.lock();
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(GatewayError::Publish {
                routing_key: event.routing_key().to_owned(),
                reason: "simulated broker failure".to_owned(),
            });
        }
        state.published.push(event.clone());
        Ok(())
    }
}

/// How a delivery was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Acked,
    Rejected { requeue: bool },
}

/// Producer side of an [`InMemoryEventSource`]. Dropping every handle closes
/// the source once its queue is drained.
#[derive(Clone)]
pub struct InMemoryQueueHandle {
    sender: UnboundedSender<InboundDelivery>,
    next_tag: Arc<Mutex<u64>>,
    settlements: Arc<Mutex<Vec<(u64, Settlement)>>>,
}

impl InMemoryQueueHandle {
    /// Enqueues a raw body under `routing_key` and returns its delivery tag
    pub fn push(&self, routing_key: &str, body: impl Into<Vec<u8>>) -> u64 {
        let delivery_tag = {
            let mut next = self.next_tag.lock();
            *next += 1;
            *next
        };
        // the source may already be gone; the delivery is then lost, as on a closed channel
        let _ = self.sender.send(InboundDelivery {
            routing_key: routing_key.to_owned(),
            body: body.into(),
            delivery_tag,
            redelivered: false,
        });
        delivery_tag
    }

    /// Enqueues an emitted event the way the broker would deliver it
    pub fn push_event(&self, event: &BracketEvent) -> Result<u64, GatewayError> {
        Ok(self.push(event.routing_key(), event.to_json()?))
    }

    /// Settlement log, in settlement order
    pub fn settlements(&self) -> Vec<(u64, Settlement)> {
        self.settlements.lock().clone()
    }

    pub fn settlement_of(&self, delivery_tag: u64) -> Vec<Settlement> {
        settlements_for(&self.settlements.lock(), delivery_tag)
    }
}

/// Queue with manual acknowledgement; rejected-with-requeue deliveries are
/// handed out again before anything new.
pub struct InMemoryEventSource {
    receiver: UnboundedReceiver<InboundDelivery>,
    requeued: Mutex<VecDeque<InboundDelivery>>,
    settlements: Arc<Mutex<Vec<(u64, Settlement)>>>,
}

impl InMemoryEventSource {
    pub fn channel() -> (InMemoryQueueHandle, InMemoryEventSource) {
        let (sender, receiver) = unbounded_channel();
        let settlements = Arc::new(Mutex::new(Vec::new()));

        let handle = InMemoryQueueHandle {
            sender,
            next_tag: Arc::new(Mutex::new(0)),
            settlements: Arc::clone(&settlements),
        };
        let source = InMemoryEventSource {
            receiver,
            requeued: Mutex::new(VecDeque::new()),
            settlements,
        };
        (handle, source)
    }

    /// Settlement log, in settlement order
    pub fn settlements(&self) -> Vec<(u64, Settlement)> {
        self.settlements.lock().clone()
    }

    pub fn settlement_of(&self, delivery_tag: u64) -> Vec<Settlement> {
        settlements_for(&self.settlements.lock(), delivery_tag)
    }
}

fn settlements_for(log: &[(u64, Settlement)], delivery_tag: u64) -> Vec<Settlement> {
    log.iter()
        .filter(|(tag, _)| *tag == delivery_tag)
        .map(|(_, settlement)| *settlement)
        .collect()
}

#[async_trait]
impl EventSource for InMemoryEventSource {
    async fn receive(&mut self) -> Option<InboundDelivery> {
        let requeued = self.requeued.lock().pop_front();
        if requeued.is_some() {
            return requeued;
        }
        self.receiver.recv().await
    }

    async fn ack(&self, delivery: &InboundDelivery) -> Result<(), GatewayError> {
        self.settlements
            .lock()
            .push((delivery.delivery_tag, Settlement::Acked));
        Ok(())
    }

    async fn reject(&self, delivery: &InboundDelivery, requeue: bool) -> Result<(), GatewayError> {
        self.settlements
            .lock()
            .push((delivery.delivery_tag, Settlement::Rejected { requeue }));
        if requeue {
            let mut again = delivery.clone();
            again.redelivered = true;
            self.requeued.lock().push_back(again);
        }
        Ok(())
    }
}
