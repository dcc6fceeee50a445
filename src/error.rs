//! Error types for curioso operations.

use thiserror::Error;

/// Main error type for swarm construction and update operations.
#[derive(Debug, Error)]
pub enum CuriosoError {
    /// Search-domain bounds failed construction-time validation.
    #[error("invalid bounds: {reason}")]
    InvalidBounds {
        /// What made the bounds unusable
        reason: String,
    },

    /// Not enough candidate positions to sample the repulsion subset from.
    #[error("curiosity sampling needs at least {required} candidate positions, got {available}")]
    CuriositySample {
        /// Candidate positions actually available
        available: usize,
        /// Minimum required by the sampler
        required: usize,
    },

    /// The kernel-weighted repulsion sum has zero norm, so no escape
    /// direction exists. Callers skip the curiosity term for that step.
    #[error("curiosity direction has zero norm")]
    ZeroDirection,

    /// The external objective evaluator failed. Never retried by the core.
    #[error("objective evaluation failed: {0}")]
    Objective(String),

    /// A swarm must hold at least one particle.
    #[error("swarm must contain at least one particle")]
    EmptySwarm,
}

/// Result type for curioso operations.
pub type Result<T> = std::result::Result<T, CuriosoError>;
