//! Value types produced and consumed by the bracket engine.
//!
//! None of these are persisted by the engine itself: plans are emitted and
//! dropped, slot updates are handed to the match execution service.

use serde::{Deserialize, Serialize};

use super::types::{
    MatchCoordinate, MatchId, ParticipantId, Position, StatusTransition, TournamentId,
};

/// A round-1 match between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub round: u32,
    pub match_number: u32,
    pub slot_a: ParticipantId,
    pub slot_b: ParticipantId,
}

/// A participant entering round 2 directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByePlacement {
    pub round: u32,
    pub match_number: u32,
    pub position: Position,
    pub participant_id: ParticipantId,
}

/// Bracket shape plus the concrete first-round layout for one participant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPlan {
    pub participant_count: usize,
    pub total_rounds: u32,
    pub bracket_size: usize,
    pub bye_count: usize,
    pub first_round_match_count: usize,
    pub pairings: Vec<Pairing>,
    pub byes: Vec<ByePlacement>,
}

impl BracketPlan {
    /// Every match eliminates exactly one participant.
    pub fn total_matches(&self) -> usize {
        self.participant_count.saturating_sub(1)
    }
}

/// Shape-only preview of a bracket, without participant ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketInfo {
    pub total_participants: usize,
    pub total_rounds: u32,
    pub bracket_size: usize,
    pub participants_with_bye: usize,
    pub first_round_matches: usize,
    pub total_matches: usize,
}

/// Result of a successful start: what was emitted and the status change the
/// lifecycle service should persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSummary {
    pub tournament_id: TournamentId,
    pub tournament_name: String,
    pub total_participants: usize,
    pub total_rounds: u32,
    pub bracket_size: usize,
    pub bye_count: usize,
    pub first_round_match_count: usize,
    pub pairings: Vec<Pairing>,
    pub byes: Vec<ByePlacement>,
    pub transition: StatusTransition,
}

/// A validated `match.finished` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFinished {
    pub match_id: MatchId,
    pub tournament_id: TournamentId,
    pub round: u32,
    pub match_number: u32,
    pub winner_id: ParticipantId,
}

impl MatchFinished {
    pub fn coordinate(&self) -> MatchCoordinate {
        MatchCoordinate::new(self.tournament_id, self.round, self.match_number)
    }
}

/// Where a winner goes next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSlotUpdate {
    pub tournament_id: TournamentId,
    pub next_round: u32,
    pub next_match_number: u32,
    pub winner_id: ParticipantId,
    pub position: Position,
    pub source_match_id: MatchId,
}

impl NextSlotUpdate {
    pub fn coordinate(&self) -> MatchCoordinate {
        MatchCoordinate::new(self.tournament_id, self.next_round, self.next_match_number)
    }
}

/// Winner of the final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionDetermined {
    pub tournament_id: TournamentId,
    pub champion_id: ParticipantId,
    pub final_round: u32,
    pub final_match_number: u32,
}

/// Why a well-formed notification produced no event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    TournamentCancelled,
}

/// What handling a `match.finished` notification did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvancementOutcome {
    /// Winner placed into the next round
    Advanced(NextSlotUpdate),
    /// Final match decided
    ChampionDetermined(ChampionDetermined),
    /// Same result delivered again; nothing emitted
    AlreadyApplied { coordinate: MatchCoordinate },
    /// Acknowledged without effect
    Ignored {
        coordinate: MatchCoordinate,
        reason: IgnoreReason,
    },
}
