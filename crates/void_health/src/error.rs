//! Configuration errors

use thiserror::Error;

/// Errors raised while loading or validating a health configuration
///
/// Gameplay calls never fail; anything odd at runtime is a silent no-op.
#[derive(Error, Debug)]
pub enum HealthError {
    #[error("Maximum health must be greater than zero")]
    InvalidMaximumHealth,

    #[error("Initial health {initial} exceeds maximum health {maximum}")]
    InitialExceedsMaximum { initial: u32, maximum: u32 },

    #[error("Delay before destruction must not be negative (got {0})")]
    NegativeDelay(f32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for health configuration
pub type HealthResult<T> = Result<T, HealthError>;
