use thiserror::Error;

use crate::domain::services::bracket_service::BracketError;

use super::dtos::MalformedEvent;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Enums:                                                   |
/// |   - InboundError                                         |
/// +----------------------------------------------------------+

/// Represents errors raised while handling a consumed message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InboundError {
    /// The message could not be decoded or validated.
    #[error("Malformed message: {0}")]
    Malformed(#[from] MalformedEvent),

    /// The bracket service refused or failed the operation.
    #[error(transparent)]
    Bracket(#[from] BracketError),
}

impl InboundError {
    /// True when the failure is on the broker side and a redelivery may succeed
    pub fn is_transport(&self) -> bool {
        matches!(self, InboundError::Bracket(err) if err.is_transport())
    }
}
