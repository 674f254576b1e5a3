/// Winner advancement and per-tournament bracket bookkeeping
pub mod advancement;

/// Pure bracket planning functions
pub mod bracket_planner;

/// Service orchestrating start and advancement
pub mod bracket_service;

/// Emitted events and the publish/consume traits
pub mod events;

/// Start request validation
pub mod lifecycle_guard;
