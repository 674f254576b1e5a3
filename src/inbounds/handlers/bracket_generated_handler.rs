use tracing::{debug, info};

use crate::domain::services::{bracket_service::BracketService, events::BracketGenerated};

use super::{
    super::{dtos::decode_payload, inbound_error::InboundError},
    HandledMessage,
};

/// Processes a `bracket.generated` message by recording the bracket in this
/// process. The start path may run elsewhere; when it ran here, the bracket is
/// already known and nothing changes.
pub fn handle_bracket_generated(
    body: &[u8],
    service: &dyn BracketService,
) -> Result<HandledMessage, InboundError> {
    let generated: BracketGenerated = decode_payload(body)?;
    let tournament_id = generated.tournament_id;

    let newly_registered = service.register_generated(&generated)?;
    if newly_registered {
        info!(tournament_id, rounds = generated.total_rounds, "bracket loaded from exchange");
    } else {
        debug!(tournament_id, "bracket already known");
    }

    Ok(HandledMessage::BracketRegistered {
        tournament_id,
        newly_registered,
    })
}
