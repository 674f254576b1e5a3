//! Single-consumer loop pulling deliveries from an [`EventSource`].
//!
//! Every delivery is settled exactly once:
//!
//! | Result of handling                      | Settlement                          |
//! |-----------------------------------------|-------------------------------------|
//! | handled, skipped                        | ack                                 |
//! | malformed, coordination error           | ack (logged)                        |
//! | publish failure                         | reject, requeued when configured    |

use std::{future::Future, sync::Arc};

use tracing::{debug, error, info, warn};

use crate::domain::services::{
    bracket_service::BracketService,
    events::{EventSource, GatewayError, InboundDelivery},
};

use super::{handlers::route_message, inbound_error::InboundError};

/// How a delivery is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Ack,
    Requeue,
    Discard,
}

/// Consumes `match.finished`, `tournament.status.cancelled` and
/// `bracket.generated` and drives the bracket service with them
pub struct EventConsumer<S> {
    source: S,
    service: Arc<dyn BracketService>,
    requeue_on_publish_failure: bool,
}

impl<S: EventSource> EventConsumer<S> {
    pub fn new(source: S, service: Arc<dyn BracketService>, requeue_on_publish_failure: bool) -> Self {
        Self {
            source,
            service,
            requeue_on_publish_failure,
        }
    }

    /// Runs until `shutdown` resolves or the source closes, then hands the
    /// source back so it can be closed properly.
    pub async fn run_until<F>(mut self, shutdown: F) -> S
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!("consumer started");

        loop {
            let delivery = tokio::select! {
                _ = &mut shutdown => {
                    info!("consumer shutting down");
                    break;
                }
                delivery = self.source.receive() => delivery,
            };

            let Some(delivery) = delivery else {
                info!("event source closed");
                break;
            };

            let disposition = self.process(&delivery).await;
            if let Err(err) = self.settle(&delivery, disposition).await {
                error!(delivery_tag = delivery.delivery_tag, %err, "failed to settle delivery");
            }
        }

        self.source
    }

    /// Handles one delivery and decides how to settle it
    pub async fn process(&self, delivery: &InboundDelivery) -> Disposition {
        debug!(
            routing_key = %delivery.routing_key,
            delivery_tag = delivery.delivery_tag,
            redelivered = delivery.redelivered,
            "delivery received"
        );

        match route_message(&delivery.routing_key, &delivery.body, self.service.as_ref()).await {
            Ok(handled) => {
                debug!(?handled, "delivery handled");
                Disposition::Ack
            }
            Err(err) if err.is_transport() => {
                error!(routing_key = %delivery.routing_key, %err, "publish failed while handling delivery");
                if self.requeue_on_publish_failure {
                    Disposition::Requeue
                } else {
                    Disposition::Discard
                }
            }
            Err(InboundError::Malformed(err)) => {
                error!(routing_key = %delivery.routing_key, %err, "malformed message dropped");
                Disposition::Ack
            }
            Err(err) => {
                warn!(routing_key = %delivery.routing_key, %err, "message dropped");
                Disposition::Ack
            }
        }
    }

    async fn settle(&self, delivery: &InboundDelivery, disposition: Disposition) -> Result<(), GatewayError> {
        match disposition {
            Disposition::Ack => self.source.ack(delivery).await,
            Disposition::Requeue => self.source.reject(delivery, true).await,
            Disposition::Discard => self.source.reject(delivery, false).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        models::{bracket::AdvancementOutcome, types::MatchCoordinate},
        services::{
            bracket_service::{BracketError, MockBracketService},
            events::{InMemoryEventSource, Settlement},
        },
    };

    const FINISHED: &str =
        r#"{"data": {"id": 1, "tournament_id": 1, "round": 1, "match_number": 1, "winner_id": 2}}"#;

    fn failing_service() -> MockBracketService {
        let mut service = MockBracketService::new();
        service.expect_on_match_finished().returning(|event| {
            Err(BracketError::Gateway(GatewayError::Publish {
                routing_key: "bracket.advance_next_match".to_owned(),
                reason: format!("broker down for match {}", event.match_id),
            }))
        });
        service
    }

    #[tokio::test]
    async fn test_malformed_and_unknown_are_acked() {
        let (handle, source) = InMemoryEventSource::channel();
        let malformed = handle.push("match.finished", "{}");
        let unknown = handle.push("orders.created", "{}");
        drop(handle);

        let source = EventConsumer::new(source, Arc::new(MockBracketService::new()), true)
            .run_until(std::future::pending())
            .await;

        assert_eq!(source.settlement_of(malformed), vec![Settlement::Acked]);
        assert_eq!(source.settlement_of(unknown), vec![Settlement::Acked]);
    }

    #[tokio::test]
    async fn test_publish_failure_is_requeued() {
        let (handle, source) = InMemoryEventSource::channel();
        let consumer = EventConsumer::new(source, Arc::new(failing_service()), true);
        let delivery = InboundDelivery {
            routing_key: "match.finished".to_owned(),
            body: FINISHED.as_bytes().to_vec(),
            delivery_tag: 1,
            redelivered: false,
        };

        assert_eq!(consumer.process(&delivery).await, Disposition::Requeue);
        assert!(handle.settlements().is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_is_discarded_without_requeue() {
        let (_handle, source) = InMemoryEventSource::channel();
        let consumer = EventConsumer::new(source, Arc::new(failing_service()), false);
        let delivery = InboundDelivery {
            routing_key: "match.finished".to_owned(),
            body: FINISHED.as_bytes().to_vec(),
            delivery_tag: 1,
            redelivered: false,
        };

        assert_eq!(consumer.process(&delivery).await, Disposition::Discard);
    }

    #[tokio::test]
    async fn test_handled_message_is_acked() {
        let mut service = MockBracketService::new();
        service.expect_on_match_finished().times(1).returning(|event| {
            Ok(AdvancementOutcome::AlreadyApplied {
                coordinate: MatchCoordinate::new(event.tournament_id, event.round, event.match_number),
            })
        });

        let (handle, source) = InMemoryEventSource::channel();
        let tag = handle.push("match.finished", FINISHED);
        drop(handle);

        let source = EventConsumer::new(source, Arc::new(service), true)
            .run_until(std::future::pending())
            .await;

        assert_eq!(source.settlements(), vec![(tag, Settlement::Acked)]);
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_loop() {
        let (handle, source) = InMemoryEventSource::channel();
        let consumer = EventConsumer::new(source, Arc::new(MockBracketService::new()), true);

        consumer.run_until(async {}).await;
        assert!(handle.settlements().is_empty());
    }
}
