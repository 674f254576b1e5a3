//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Moves match winners through the bracket. The slot mapping itself is a pure function; the
// ledger keeps, per tournament, what is needed to apply it safely: the number of rounds, the
// contestants and winner of every known slot, and the events not yet confirmed as published.
//
// | Component         | Description                                                       |
// |-------------------|-------------------------------------------------------------------|
// | next_slot         | Completed match -> next-round coordinate and side                 |
// | BracketLedger     | Mutex-guarded bookkeeping, one critical section per advancement   |
// | MatchSlot         | Read-only view of one slot                                        |
// | AdvancementError  | Coordination failures; logged and acknowledged by the worker      |
//--------------------------------------------------------------------------------------------------

pub mod bracket_ledger;

use thiserror::Error;

use crate::domain::models::{
    bracket::{MatchFinished, NextSlotUpdate},
    types::{MatchCoordinate, ParticipantId, Position, TournamentId},
};

pub use bracket_ledger::{BracketLedger, MatchSlot};

/// Errors raised while applying an advancement or registering a bracket
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvancementError {
    /// Tournament, round or match number the ledger does not know, or a slot
    /// still waiting for a contestant
    #[error("Unknown match coordinate: {0}")]
    UnknownMatchCoordinate(MatchCoordinate),

    #[error("Participant {winner_id} did not play {coordinate}")]
    WinnerNotInMatch {
        coordinate: MatchCoordinate,
        winner_id: ParticipantId,
    },

    /// A different winner was already recorded for this match
    #[error("{coordinate} already won by {recorded}, got {reported}")]
    ConflictingResult {
        coordinate: MatchCoordinate,
        recorded: ParticipantId,
        reported: ParticipantId,
    },

    #[error("A different bracket is already registered for tournament {0}")]
    BracketAlreadyRegistered(TournamentId),

    /// Pairings or byes that do not add up to the bracket's own shape
    #[error("Bracket for tournament {0} is inconsistent with its shape")]
    InconsistentBracket(TournamentId),

    #[error("Tournament {0} is cancelled")]
    TournamentCancelled(TournamentId),
}

/// Type alias for Result with AdvancementError
pub type AdvancementResult<T> = Result<T, AdvancementError>;

/// Where the winner of `completed` plays next.
///
/// Matches `2k-1` and `2k` feed match `k` of the next round, the odd one on
/// the first side. Terminal rounds are the ledger's concern, not this function's.
pub fn next_slot(completed: &MatchFinished) -> NextSlotUpdate {
    NextSlotUpdate {
        tournament_id: completed.tournament_id,
        next_round: completed.round + 1,
        next_match_number: completed.match_number.div_ceil(2),
        winner_id: completed.winner_id,
        position: Position::for_match_number(completed.match_number),
        source_match_id: completed.match_id,
    }
}
