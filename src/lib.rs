// Expose the modules
pub mod config;
pub mod domain;
pub mod inbounds;
pub mod outbounds;

pub use config::{Config, ConfigError};

// Re-export key types for easier usage
pub use domain::models::bracket::{
    AdvancementOutcome, BracketInfo, BracketPlan, BracketSummary, ByePlacement, ChampionDetermined,
    IgnoreReason, MatchFinished, NextSlotUpdate, Pairing,
};
pub use domain::models::types::{
    MatchCoordinate, MatchId, ParticipantId, Position, StatusTransition, TournamentId,
    TournamentSnapshot, TournamentStatus,
};
pub use domain::services::advancement::{AdvancementError, BracketLedger, MatchSlot, next_slot};
pub use domain::services::bracket_planner::{
    PlannerError, bracket_info, calculate_rounds, generate_first_round, place_byes,
};
pub use domain::services::bracket_service::{
    BracketError, BracketResult, BracketService, BracketServiceImpl,
};
pub use domain::services::events::{
    BracketEvent, BracketGenerated, EventEnvelope, EventGateway, EventSource, GatewayError,
    InMemoryEventGateway, InMemoryEventSource, InMemoryQueueHandle, InboundDelivery, Settlement,
};
pub use domain::services::lifecycle_guard::{AuthorizedStart, StartRejected, authorize_start};
pub use inbounds::consumer::{Disposition, EventConsumer};
pub use outbounds::{rabbit_gateway::RabbitEventGateway, rabbit_source::RabbitEventSource};
