//! Error types for the genetic algorithm.

use thiserror::Error;

/// Errors raised while configuring or running the algorithm.
///
/// Configuration problems are reported before any population exists.
/// [`GaError::DegenerateFitness`] is the only failure that can surface
/// mid-run; it aborts the current generation and leaves the last
/// completed one intact.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaError {
    /// Domain bounds that cannot be encoded (`upper <= lower` or `epsilon <= 0`).
    #[error(
        "invalid domain in dimension {dimension}: lower={lower}, upper={upper}, epsilon={epsilon}"
    )]
    InvalidDomain {
        dimension: usize,
        lower: f64,
        upper: f64,
        epsilon: f64,
    },

    /// The domain needs more bits than a chromosome can hold.
    #[error("dimension {dimension} needs {length} bits, at most 64 are supported")]
    EncodingTooLong { dimension: usize, length: usize },

    /// The chromosome is too short for the `[2, length - 2)` crossover window.
    #[error("dimension {dimension} encodes to {length} bits, crossover needs at least 5")]
    ChromosomeTooShort { dimension: usize, length: usize },

    /// A domain with zero dimensions.
    #[error("function parameters must have at least one dimension")]
    EmptyDomain,

    /// Invalid algorithm parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Crossover cut point outside `0..=length`.
    #[error("cut point {cut_point} out of range for dimension {dimension} of length {length}")]
    CutPointOutOfRange {
        dimension: usize,
        cut_point: usize,
        length: usize,
    },

    /// Individuals with different chromosome layouts.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Roulette selection over a pool whose fitness does not sum to a
    /// positive finite value.
    #[error("degenerate fitness: total fitness {total} over {pool_size} individuals")]
    DegenerateFitness { total: f64, pool_size: usize },
}
