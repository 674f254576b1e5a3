//--------------------------------------------------------------------------------------------------
// STRUCTS & ENUMS
//--------------------------------------------------------------------------------------------------
// | Name              | Description                                         | Key Methods         |
// |-------------------|-----------------------------------------------------|---------------------|
// | BracketEvent      | Every event the engine emits                        | routing_key, to_json|
// | BracketGenerated  | Payload of `bracket.generated`                      | from_plan, to_plan  |
// | EventEnvelope     | JSON wrapper shared with the other services         | -                   |
//--------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{
    bracket::{BracketPlan, ByePlacement, ChampionDetermined, NextSlotUpdate, Pairing},
    types::{TournamentId, TournamentSnapshot},
};

use super::gateway::GatewayError;

/// Routing key of the bracket layout, emitted on start and consumed by the worker
pub const BRACKET_GENERATED: &str = "bracket.generated";
/// Routing key of a winner moving to the next round
pub const BRACKET_ADVANCE_NEXT_MATCH: &str = "bracket.advance_next_match";
/// Routing key of the final result
pub const BRACKET_CHAMPION_DETERMINED: &str = "bracket.champion_determined";
/// Routing key of a completed match, emitted by match execution
pub const MATCH_FINISHED: &str = "match.finished";
/// Routing key of a cancellation, emitted by the lifecycle service
pub const TOURNAMENT_CANCELLED: &str = "tournament.status.cancelled";

/// Payload of `bracket.generated`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketGenerated {
    pub tournament_id: TournamentId,
    pub tournament_name: String,
    pub total_participants: usize,
    pub total_rounds: u32,
    pub first_round_match_count: usize,
    pub bye_count: usize,
    pub pairings: Vec<Pairing>,
    #[serde(default)]
    pub byes: Vec<ByePlacement>,
}

impl BracketGenerated {
    pub fn from_plan(tournament: &TournamentSnapshot, plan: &BracketPlan) -> Self {
        Self {
            tournament_id: tournament.id,
            tournament_name: tournament.name.clone(),
            total_participants: plan.participant_count,
            total_rounds: plan.total_rounds,
            first_round_match_count: plan.first_round_match_count,
            bye_count: plan.bye_count,
            pairings: plan.pairings.clone(),
            byes: plan.byes.clone(),
        }
    }

    /// Rebuilds the plan this payload was made from
    pub fn to_plan(&self) -> BracketPlan {
        BracketPlan {
            participant_count: self.total_participants,
            total_rounds: self.total_rounds,
            bracket_size: 1usize.checked_shl(self.total_rounds).unwrap_or(0),
            bye_count: self.bye_count,
            first_round_match_count: self.first_round_match_count,
            pairings: self.pairings.clone(),
            byes: self.byes.clone(),
        }
    }
}

/// Events emitted by the bracket engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketEvent {
    /// A bracket was planned for a tournament that just started
    Generated(BracketGenerated),
    /// A winner was placed into the next round
    AdvanceNextMatch(NextSlotUpdate),
    /// The final was decided
    ChampionDetermined(ChampionDetermined),
}

impl BracketEvent {
    pub fn routing_key(&self) -> &'static str {
        match self {
            BracketEvent::Generated(_) => BRACKET_GENERATED,
            BracketEvent::AdvanceNextMatch(_) => BRACKET_ADVANCE_NEXT_MATCH,
            BracketEvent::ChampionDetermined(_) => BRACKET_CHAMPION_DETERMINED,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            BracketEvent::Generated(_) => "BRACKET_GENERATED",
            BracketEvent::AdvanceNextMatch(_) => "BRACKET_ADVANCE_NEXT_MATCH",
            BracketEvent::ChampionDetermined(_) => "BRACKET_CHAMPION_DETERMINED",
        }
    }

    pub fn tournament_id(&self) -> TournamentId {
        match self {
            BracketEvent::Generated(data) => data.tournament_id,
            BracketEvent::AdvanceNextMatch(data) => data.tournament_id,
            BracketEvent::ChampionDetermined(data) => data.tournament_id,
        }
    }

    /// Wraps the event payload in the shared envelope
    pub fn to_envelope(&self, timestamp: DateTime<Utc>) -> Result<EventEnvelope, GatewayError> {
        let data = match self {
            BracketEvent::Generated(data) => serde_json::to_value(data),
            BracketEvent::AdvanceNextMatch(data) => serde_json::to_value(data),
            BracketEvent::ChampionDetermined(data) => serde_json::to_value(data),
        }
        .map_err(|err| GatewayError::Serialization(err.to_string()))?;

        Ok(EventEnvelope {
            event_type: self.event_type().to_owned(),
            routing_key: self.routing_key().to_owned(),
            data,
            timestamp,
        })
    }

    /// Envelope serialized to JSON, stamped now
    pub fn to_json(&self) -> Result<Vec<u8>, GatewayError> {
        let envelope = self.to_envelope(Utc::now())?;
        serde_json::to_vec(&envelope).map_err(|err| GatewayError::Serialization(err.to_string()))
    }
}

/// `{event_type, routing_key, data, timestamp}`, the message format every
/// service on the exchange uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_type: String,
    pub routing_key: String,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}
