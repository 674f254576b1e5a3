/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - match_finished_handler                               |
/// |   - status_handler                                       |
/// |   - bracket_generated_handler                            |
/// |   - route_message (fn)                                   |
/// +----------------------------------------------------------+

/// Handler for `bracket.generated`, rebuilding bookkeeping in the worker
pub mod bracket_generated_handler;

/// Handler for `match.finished`
pub mod match_finished_handler;

/// Handler for `tournament.status.*`
pub mod status_handler;

use tracing::warn;

use crate::domain::{
    models::{bracket::AdvancementOutcome, types::TournamentId},
    services::{
        bracket_service::BracketService,
        events::{BRACKET_GENERATED, MATCH_FINISHED, TOURNAMENT_CANCELLED},
    },
};

use super::inbound_error::InboundError;

/// What a routed message did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandledMessage {
    MatchFinished(AdvancementOutcome),
    Cancelled {
        tournament_id: TournamentId,
        had_bracket: bool,
    },
    BracketRegistered {
        tournament_id: TournamentId,
        newly_registered: bool,
    },
    /// Routing key or status change the engine does not act on
    Skipped { routing_key: String },
}

/// Routes a consumed message to its handler by routing key.
///
/// # Arguments
/// * `routing_key` - Key the message was delivered with
/// * `body` - Raw JSON body
/// * `service` - Bracket service acting on the message
pub async fn route_message(
    routing_key: &str,
    body: &[u8],
    service: &dyn BracketService,
) -> Result<HandledMessage, InboundError> {
    match routing_key {
        MATCH_FINISHED => match_finished_handler::handle_match_finished(body, service)
            .await
            .map(HandledMessage::MatchFinished),
        TOURNAMENT_CANCELLED => status_handler::handle_status_changed(body, service),
        BRACKET_GENERATED => bracket_generated_handler::handle_bracket_generated(body, service),
        other => {
            warn!(routing_key = other, "unhandled routing key");
            Ok(HandledMessage::Skipped {
                routing_key: other.to_owned(),
            })
        }
    }
}
