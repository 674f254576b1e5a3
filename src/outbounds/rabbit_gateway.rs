//! Publishes bracket events to the topic exchange through the `rabbitmq` crate.

use async_trait::async_trait;
use rabbitmq::{Message, PublisherContext, PublisherDispatcher};
use tracing::{debug, error};

use crate::domain::services::events::{BracketEvent, EventGateway, GatewayError};

/// Gateway over a [`PublisherDispatcher`]. Each event is one persistent JSON
/// message whose routing key is the event's own.
#[derive(Debug, Clone)]
pub struct RabbitEventGateway {
    dispatcher: PublisherDispatcher,
}

impl RabbitEventGateway {
    pub fn new(dispatcher: PublisherDispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventGateway for RabbitEventGateway {
    async fn publish(&self, event: &BracketEvent) -> Result<(), GatewayError> {
        let routing_key = event.routing_key();
        let body = event.to_json()?;
        debug!(routing_key, body = %String::from_utf8_lossy(&body), "publishing event");

        self.dispatcher
            .publish(
                Message::new(body, Some(routing_key.to_owned())),
                PublisherContext::generated(),
            )
            .await
            .map_err(|err| {
                error!(routing_key, %err, "publish failed");
                GatewayError::Publish {
                    routing_key: routing_key.to_owned(),
                    reason: err.to_string(),
                }
            })
    }
}
