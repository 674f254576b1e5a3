//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Pure functions turning a participant list into a single-elimination bracket. Nothing here
// holds state: the same input always yields the same plan.
//
// | Function               | Description                                                  |
// |------------------------|--------------------------------------------------------------|
// | calculate_rounds       | Number of rounds needed for n participants                   |
// | generate_first_round   | Round-1 pairings plus the shape of the whole bracket         |
// | place_byes             | Round-2 slots of the participants that skip round 1          |
// | bracket_info           | Shape-only preview for a participant count                   |
//--------------------------------------------------------------------------------------------------

pub mod planner;

use thiserror::Error;

pub use planner::{bracket_info, calculate_rounds, generate_first_round, place_byes};

/// Errors raised while planning a bracket
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// Fewer than two participants
    #[error("A bracket needs at least 2 participants, got {0}")]
    InvalidBracketInput(usize),
}

/// Type alias for Result with PlannerError
pub type PlannerResult<T> = Result<T, PlannerError>;
