//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Entry point of the bracket engine. Ties the lifecycle guard, the planner and the advancement
// ledger to an event gateway:
//
//   start  -> guard -> planner -> ledger.register -> publish bracket.generated
//   finish -> ledger.apply -> publish bracket.advance_next_match | bracket.champion_determined
//--------------------------------------------------------------------------------------------------

/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - BracketService (trait)                               |
/// |   - BracketServiceImpl (struct)                          |
/// |   - BracketError (enum)                                  |
/// |   - MockBracketService (for tests)                       |
/// +----------------------------------------------------------+
pub mod bracket_service;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    models::{
        bracket::{AdvancementOutcome, BracketSummary, MatchFinished},
        types::{ParticipantId, TournamentId, TournamentSnapshot},
    },
    services::{
        advancement::AdvancementError,
        bracket_planner::PlannerError,
        events::{BracketGenerated, GatewayError},
        lifecycle_guard::StartRejected,
    },
};

pub use bracket_service::BracketServiceImpl;

/// Errors returned by the bracket service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Validation; never retried
    #[error("Start rejected: {0}")]
    Rejected(#[from] StartRejected),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// Coordination; the notification is dropped
    #[error(transparent)]
    Advancement(#[from] AdvancementError),

    /// Transport; the caller decides about retrying
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl BracketError {
    /// True for failures that a later retry might not hit
    pub fn is_transport(&self) -> bool {
        matches!(self, BracketError::Gateway(_))
    }
}

/// Type alias for Result with BracketError
pub type BracketResult<T> = Result<T, BracketError>;

/// Operations of the bracket engine.
///
/// Implementations must be shareable between the start path and the
/// consuming worker.
#[async_trait]
pub trait BracketService: Send + Sync {
    /// Starts a tournament: validates the request, plans the bracket, records
    /// it and publishes `bracket.generated`.
    ///
    /// # Arguments
    /// * `tournament` - State of the tournament as the lifecycle service knows it
    /// * `total_rounds_hint` - Round count the caller expects, if any; the computed one wins
    /// * `participant_ids` - Ordered participants
    ///
    /// # Returns
    /// * `Ok(BracketSummary)` - What was emitted, plus the status change to persist
    /// * `Err(BracketError)` - Rejection, or a publish failure after which nothing is recorded
    async fn start_bracket(
        &self,
        tournament: &TournamentSnapshot,
        total_rounds_hint: Option<u32>,
        participant_ids: Vec<ParticipantId>,
    ) -> BracketResult<BracketSummary>;

    /// Applies a finished match and publishes where the winner goes next.
    /// Idempotent per match coordinate.
    async fn on_match_finished(&self, event: MatchFinished) -> BracketResult<AdvancementOutcome>;

    /// Stops advancement for a tournament. Returns false if it had no bracket.
    fn cancel_tournament(&self, tournament_id: TournamentId) -> bool;

    /// Records a bracket announced on the exchange, possibly by another process.
    /// Returns false if the same bracket was already known.
    fn register_generated(&self, generated: &BracketGenerated) -> BracketResult<bool>;
}

#[cfg(test)]
use mockall::*;

#[cfg(test)]
mock! {
    pub BracketService {}

    #[async_trait]
    impl BracketService for BracketService {
        async fn start_bracket(
            &self,
            tournament: &TournamentSnapshot,
            total_rounds_hint: Option<u32>,
            participant_ids: Vec<ParticipantId>,
        ) -> BracketResult<BracketSummary>;

        async fn on_match_finished(&self, event: MatchFinished) -> BracketResult<AdvancementOutcome>;

        fn cancel_tournament(&self, tournament_id: TournamentId) -> bool;

        fn register_generated(&self, generated: &BracketGenerated) -> BracketResult<bool>;
    }
}
