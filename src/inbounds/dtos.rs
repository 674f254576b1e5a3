use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::domain::models::{
    bracket::MatchFinished,
    types::{MatchId, ParticipantId, TournamentId, TournamentSnapshot, TournamentStatus},
};

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Structs:                                                 |
/// |   - MatchFinishedPayload                                 |
/// |   - TournamentStatusPayload                              |
/// |   - StartBracketRequest                                  |
/// | Enums:                                                   |
/// |   - MalformedEvent                                       |
/// | Functions:                                               |
/// |   - decode_payload                                       |
/// +----------------------------------------------------------+

/// A consumed message that cannot be acted upon. Acknowledged, never requeued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEvent {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Missing, null or non-positive fields: {}", .0.join(", "))]
    IncompleteFields(Vec<&'static str>),

    #[error("Field {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Extracts and decodes the `data` member of an `{event_type, routing_key,
/// data, timestamp}` envelope. A body without `data` is decoded as a whole.
pub fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, MalformedEvent> {
    let mut value: Value =
        serde_json::from_slice(body).map_err(|err| MalformedEvent::InvalidPayload(err.to_string()))?;

    let data = match value.get_mut("data") {
        Some(data) => data.take(),
        None => value,
    };

    serde_json::from_value(data).map_err(|err| MalformedEvent::InvalidPayload(err.to_string()))
}

/// `data` of `match.finished`. The match execution service names the match
/// id `id`; `match_id` is accepted as well and wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchFinishedPayload {
    #[serde(default)]
    pub match_id: Option<MatchId>,
    #[serde(default)]
    pub id: Option<MatchId>,
    #[serde(default)]
    pub tournament_id: Option<TournamentId>,
    #[serde(default)]
    pub round: Option<i64>,
    #[serde(default)]
    pub match_number: Option<i64>,
    #[serde(default)]
    pub winner_id: Option<ParticipantId>,
}

impl MatchFinishedPayload {
    /// Checks every field and builds the domain notification.
    ///
    /// # Errors
    /// `IncompleteFields` lists every missing, null or non-positive field;
    /// `OutOfRange` is returned for round or match numbers above `u32::MAX`.
    pub fn validate(self) -> Result<MatchFinished, MalformedEvent> {
        let match_id = self.match_id.or(self.id);

        let mut incomplete = Vec::new();
        let mut require = |name: &'static str, value: Option<i64>| match value {
            Some(value) if value > 0 => value,
            _ => {
                incomplete.push(name);
                0
            }
        };

        let match_id = require("match_id", match_id);
        let tournament_id = require("tournament_id", self.tournament_id);
        let round = require("round", self.round);
        let match_number = require("match_number", self.match_number);
        let winner_id = require("winner_id", self.winner_id);

        if !incomplete.is_empty() {
            return Err(MalformedEvent::IncompleteFields(incomplete));
        }

        Ok(MatchFinished {
            match_id,
            tournament_id,
            round: to_u32("round", round)?,
            match_number: to_u32("match_number", match_number)?,
            winner_id,
        })
    }
}

fn to_u32(field: &'static str, value: i64) -> Result<u32, MalformedEvent> {
    u32::try_from(value).map_err(|_| MalformedEvent::OutOfRange { field, value })
}

/// `data` of `tournament.status.*`: the tournament record plus the status
/// change. Unknown status names are kept as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentStatusPayload {
    #[serde(default)]
    pub tournament_id: Option<TournamentId>,
    #[serde(default)]
    pub id: Option<TournamentId>,
    #[serde(default)]
    pub old_status: Option<String>,
    #[serde(default)]
    pub new_status: Option<String>,
}

impl TournamentStatusPayload {
    pub fn tournament_id(&self) -> Result<TournamentId, MalformedEvent> {
        self.tournament_id
            .or(self.id)
            .filter(|id| *id > 0)
            .ok_or_else(|| MalformedEvent::IncompleteFields(vec!["tournament_id"]))
    }

    /// True unless the payload names a status other than `cancelled`
    pub fn is_cancellation(&self) -> bool {
        self.new_status
            .as_deref()
            .is_none_or(|status| status == TournamentStatus::Cancelled.as_str())
    }
}

/// Input of the `start` command: the tournament as the lifecycle service
/// holds it, and the ordered participant list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartBracketRequest {
    pub tournament: TournamentSnapshot,
    pub participant_ids: Vec<ParticipantId>,
    #[serde(default)]
    pub total_rounds_hint: Option<u32>,
}
