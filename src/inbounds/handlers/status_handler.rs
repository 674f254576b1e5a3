use tracing::{debug, info};

use crate::domain::services::bracket_service::BracketService;

use super::{
    super::{
        dtos::{TournamentStatusPayload, decode_payload},
        inbound_error::InboundError,
    },
    HandledMessage,
};

/// Processes a `tournament.status.*` message. Only cancellations stop
/// advancement; any other status change is skipped.
pub fn handle_status_changed(
    body: &[u8],
    service: &dyn BracketService,
) -> Result<HandledMessage, InboundError> {
    let payload: TournamentStatusPayload = decode_payload(body)?;
    let tournament_id = payload.tournament_id()?;

    if !payload.is_cancellation() {
        debug!(tournament_id, new_status = ?payload.new_status, "status change skipped");
        return Ok(HandledMessage::Skipped {
            routing_key: format!(
                "tournament.status.{}",
                payload.new_status.as_deref().unwrap_or_default()
            ),
        });
    }

    info!(tournament_id, "cancellation received");
    let had_bracket = service.cancel_tournament(tournament_id);

    Ok(HandledMessage::Cancelled {
        tournament_id,
        had_bracket,
    })
}
