//! Adapts a `rabbitmq::Subscription` to the [`EventSource`] contract.

use async_trait::async_trait;
use rabbitmq::{RabbitMQError, Subscription};
use tracing::warn;

use crate::domain::services::events::{EventSource, GatewayError, InboundDelivery};

pub struct RabbitEventSource {
    subscription: Subscription,
}

impl RabbitEventSource {
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Closes the underlying channel
    pub async fn close(self) -> Result<(), RabbitMQError> {
        self.subscription.close().await
    }
}

fn settle_error(delivery: &InboundDelivery, err: RabbitMQError) -> GatewayError {
    GatewayError::Settle {
        delivery_tag: delivery.delivery_tag,
        reason: err.to_string(),
    }
}

#[async_trait]
impl EventSource for RabbitEventSource {
    async fn receive(&mut self) -> Option<InboundDelivery> {
        while let Some(message) = self.subscription.receive().await {
            let Some(deliver) = message.deliver else {
                warn!("message without delivery information skipped");
                continue;
            };

            return Some(InboundDelivery {
                routing_key: deliver.routing_key().to_string(),
                body: message.content.unwrap_or_default(),
                delivery_tag: deliver.delivery_tag(),
                redelivered: deliver.redelivered(),
            });
        }
        None
    }

    async fn ack(&self, delivery: &InboundDelivery) -> Result<(), GatewayError> {
        self.subscription
            .ack_delivery(delivery.delivery_tag)
            .await
            .map_err(|err| settle_error(delivery, err))
    }

    async fn reject(&self, delivery: &InboundDelivery, requeue: bool) -> Result<(), GatewayError> {
        self.subscription
            .nack_delivery(delivery.delivery_tag, requeue)
            .await
            .map_err(|err| settle_error(delivery, err))
    }
}
