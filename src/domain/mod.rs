/// Value types of the bracket engine
pub mod models;

/// Planning, validation, advancement and the broker boundary
pub mod services;
