//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// The broker boundary of the bracket engine. Domain code only sees these traits and types; the
// RabbitMQ adapters live in `outbounds`.
//
// | Component             | Description                                                  |
// |-----------------------|--------------------------------------------------------------|
// | BracketEvent          | Enum of every event the engine emits                         |
// | EventEnvelope         | `{event_type, routing_key, data, timestamp}` wire wrapper    |
// | EventGateway          | Trait for publishing events                                  |
// | EventSource           | Trait for consuming deliveries with manual acknowledgement   |
// | InMemoryEventGateway  | Recording gateway with failure injection                     |
// | InMemoryEventSource   | Channel-backed source with a settlement log                  |
//--------------------------------------------------------------------------------------------------

mod event_types;
mod gateway;
mod in_memory;

// Re-exports
pub use event_types::{
    BRACKET_ADVANCE_NEXT_MATCH, BRACKET_CHAMPION_DETERMINED, BRACKET_GENERATED, BracketEvent,
    BracketGenerated, EventEnvelope, MATCH_FINISHED, TOURNAMENT_CANCELLED,
};
pub use gateway::{EventGateway, EventSource, GatewayError, InboundDelivery};
pub use in_memory::{InMemoryEventGateway, InMemoryEventSource, InMemoryQueueHandle, Settlement};

#[cfg(test)]
pub use gateway::MockEventGateway;
