/// Bracket plans, slot updates and advancement outcomes.
pub mod bracket;

/// Identifiers, tournament status and match coordinates.
pub mod types;
