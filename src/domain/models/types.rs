use std::fmt;

use serde::{Deserialize, Serialize};

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Type aliases:                                            |
/// |   - TournamentId, ParticipantId, MatchId                 |
/// | Enums:                                                   |
/// |   - TournamentStatus                                     |
/// |   - Position                                             |
/// | Structs:                                                 |
/// |   - TournamentSnapshot                                   |
/// |   - MatchCoordinate                                      |
/// |   - StatusTransition                                     |
/// +----------------------------------------------------------+

/// Tournament identifier, as stored by the lifecycle service
pub type TournamentId = i64;

/// Participant identifier (player or team)
pub type ParticipantId = i64;

/// Match identifier assigned by the match execution service
pub type MatchId = i64;

/// Lifecycle states of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created, not yet open
    Pending,
    /// Accepting participants
    Registration,
    /// Bracket generated, matches being played
    InProgress,
    /// Champion known
    Completed,
    /// Aborted by the organiser
    Cancelled,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Pending => "pending",
            TournamentStatus::Registration => "registration",
            TournamentStatus::InProgress => "in_progress",
            TournamentStatus::Completed => "completed",
            TournamentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of a tournament record the bracket engine needs, handed over by
/// the lifecycle service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub max_participants: usize,
}

/// A status change the engine authorizes; persisting it is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub from: TournamentStatus,
    pub to: TournamentStatus,
}

/// Side of a match a contestant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    First,
    Second,
}

impl Position {
    /// Odd match numbers feed the first slot of the next match, even ones the second.
    pub fn for_match_number(match_number: u32) -> Self {
        if match_number % 2 == 1 {
            Position::First
        } else {
            Position::Second
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::First => f.write_str("first"),
            Position::Second => f.write_str("second"),
        }
    }
}

/// `(tournament_id, round, match_number)`, both numbers 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchCoordinate {
    pub tournament_id: TournamentId,
    pub round: u32,
    pub match_number: u32,
}

impl MatchCoordinate {
    pub fn new(tournament_id: TournamentId, round: u32, match_number: u32) -> Self {
        Self {
            tournament_id,
            round,
            match_number,
        }
    }
}

impl fmt::Display for MatchCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tournament {} round {} match {}",
            self.tournament_id, self.round, self.match_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_follows_match_parity() {
        assert_eq!(Position::for_match_number(1), Position::First);
        assert_eq!(Position::for_match_number(2), Position::Second);
        assert_eq!(Position::for_match_number(3), Position::First);
        assert_eq!(Position::for_match_number(4), Position::Second);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TournamentStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: TournamentStatus = serde_json::from_str("\"registration\"").unwrap();
        assert_eq!(parsed, TournamentStatus::Registration);
    }
}
