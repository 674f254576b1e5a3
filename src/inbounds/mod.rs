/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - consumer                                             |
/// |   - dtos                                                 |
/// |   - handlers                                             |
/// |   - inbound_error                                        |
/// +----------------------------------------------------------+

/// Consume loop settling every delivery.
pub mod consumer;

/// Payloads of consumed messages and their validation.
pub mod dtos;

/// Handlers for consumed messages, routed by key.
pub mod handlers;

/// Error types for the inbound layer.
pub mod inbound_error;
