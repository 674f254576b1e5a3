//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Validates a request to start a tournament before any bracket is planned. The guard only
// decides; persisting the authorized status change belongs to the lifecycle service.
//--------------------------------------------------------------------------------------------------

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::domain::models::types::{ParticipantId, StatusTransition, TournamentStatus};

/// Reasons a start request is refused. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartRejected {
    #[error("Tournament must be in {expected} to start, it is {actual}")]
    WrongState {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    #[error("Tournament allows at most {max} participants, got {actual}")]
    TooManyParticipants { max: usize, actual: usize },

    #[error("Participant {0} appears more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("A tournament needs at least 2 participants, got {0}")]
    InsufficientParticipants(usize),
}

/// A start request that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedStart {
    pub participants: Vec<ParticipantId>,
    pub transition: StatusTransition,
}

/// Checks a start request, in this order: tournament state, upper bound,
/// duplicates, lower bound.
///
/// # Arguments
/// * `status` - Current status of the tournament
/// * `max_participants` - Capacity configured on the tournament
/// * `participant_ids` - Ordered participant list; the order decides the pairings
///
/// # Returns
/// * `Ok(AuthorizedStart)` - The participant list and the `registration -> in_progress` transition
/// * `Err(StartRejected)` - The first check that failed
pub fn authorize_start(
    status: TournamentStatus,
    max_participants: usize,
    participant_ids: &[ParticipantId],
) -> Result<AuthorizedStart, StartRejected> {
    if status != TournamentStatus::Registration {
        return Err(StartRejected::WrongState {
            expected: TournamentStatus::Registration,
            actual: status,
        });
    }

    if participant_ids.len() > max_participants {
        return Err(StartRejected::TooManyParticipants {
            max: max_participants,
            actual: participant_ids.len(),
        });
    }

    let mut seen = HashSet::with_capacity(participant_ids.len());
    if let Some(&duplicate) = participant_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(StartRejected::DuplicateParticipant(duplicate));
    }

    if participant_ids.len() < 2 {
        return Err(StartRejected::InsufficientParticipants(participant_ids.len()));
    }

    debug!(participants = participant_ids.len(), "start request authorized");

    Ok(AuthorizedStart {
        participants: participant_ids.to_vec(),
        transition: StatusTransition {
            from: TournamentStatus::Registration,
            to: TournamentStatus::InProgress,
        },
    })
}
