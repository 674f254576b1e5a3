use tracing::{debug, warn};

use crate::domain::{
    models::bracket::AdvancementOutcome, services::bracket_service::BracketService,
};

use super::super::{
    dtos::{MatchFinishedPayload, decode_payload},
    inbound_error::InboundError,
};

/// Processes a `match.finished` message.
///
/// # Flow
///
/// 1. Decodes the envelope and validates every field
/// 2. Hands the notification to the bracket service
///
/// Malformed messages never reach the service.
pub async fn handle_match_finished(
    body: &[u8],
    service: &dyn BracketService,
) -> Result<AdvancementOutcome, InboundError> {
    let payload: MatchFinishedPayload = decode_payload(body)?;
    debug!(?payload, "match.finished received");

    let finished = payload.validate().inspect_err(|err| {
        warn!(%err, "rejected match.finished");
    })?;

    Ok(service.on_match_finished(finished).await?)
}
