use async_trait::async_trait;
use thiserror::Error;

use super::event_types::BracketEvent;

/// Transport failures at the broker boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Failed to publish {routing_key}: {reason}")]
    Publish {
        routing_key: String,
        reason: String,
    },

    #[error("Failed to serialize event: {0}")]
    Serialization(String),

    #[error("Failed to settle delivery {delivery_tag}: {reason}")]
    Settle { delivery_tag: u64, reason: String },
}

/// Outbound side of the broker boundary.
///
/// `publish` resolves once the transport has taken or refused the event; it
/// never retries on its own. Over RabbitMQ, taken means written to the
/// channel, not confirmed by the broker.
#[async_trait]
pub trait EventGateway: Send + Sync {
    async fn publish(&self, event: &BracketEvent) -> Result<(), GatewayError>;
}

/// One message pulled from the broker, to be settled with `ack` or `reject`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundDelivery {
    pub routing_key: String,
    pub body: Vec<u8>,
    pub delivery_tag: u64,
    pub redelivered: bool,
}

/// Inbound side of the broker boundary: a single-consumer queue with manual
/// acknowledgement.
#[async_trait]
pub trait EventSource: Send {
    /// Next delivery, or None once the source is closed
    async fn receive(&mut self) -> Option<InboundDelivery>;

    async fn ack(&self, delivery: &InboundDelivery) -> Result<(), GatewayError>;

    /// Negative acknowledgement; with `requeue` the delivery comes back later
    async fn reject(&self, delivery: &InboundDelivery, requeue: bool) -> Result<(), GatewayError>;
}

#[cfg(test)]
use mockall::*;

#[cfg(test)]
mock! {
    pub EventGateway {}

    #[async_trait]
    impl EventGateway for EventGateway {
        async fn publish(&self, event: &BracketEvent) -> Result<(), GatewayError>;
    }
}
