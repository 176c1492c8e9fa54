//! Search domain description.

use super::gray;
use crate::error::GaError;

/// Bounds and precision of one dimension of the search domain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// Lower bound of the dimension.
    pub lower: f64,
    /// Upper bound of the dimension.
    pub upper: f64,
    /// Requested precision; decoded values are multiples of it.
    pub epsilon: f64,
}

impl Interval {
    /// Creates an interval, rejecting `upper <= lower` and `epsilon <= 0`.
    pub fn new(lower: f64, upper: f64, epsilon: f64) -> Result<Self, GaError> {
        let interval = Self {
            lower,
            upper,
            epsilon,
        };
        interval.bit_length()?;
        Ok(interval)
    }

    /// Chromosome length needed to resolve this interval.
    pub fn bit_length(&self) -> Result<usize, GaError> {
        gray::encode_length(self.lower, self.upper, self.epsilon)
    }

    /// Whether `x` lies within the bounds, allowing `epsilon / 2` of
    /// quantization slop on either side.
    pub fn contains(&self, x: f64) -> bool {
        let scale = 1.0 + self.upper.abs().max(self.lower.abs());
        let slop = self.epsilon / 2.0 + 1e-12 * scale;
        x >= self.lower - slop && x <= self.upper + slop
    }
}

/// Per-dimension bounds of the function being optimized.
///
/// Immutable after construction. The number of intervals is the number of
/// dimensions, and each dimension's chromosome length is computed once
/// here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionParams {
    intervals: Vec<Interval>,
    bit_lengths: Vec<usize>,
}

impl FunctionParams {
    /// Builds the domain from per-dimension intervals.
    ///
    /// # Errors
    /// [`GaError::EmptyDomain`] for zero intervals; otherwise the first
    /// interval that cannot be encoded, tagged with its dimension.
    pub fn new(intervals: Vec<Interval>) -> Result<Self, GaError> {
        if intervals.is_empty() {
            return Err(GaError::EmptyDomain);
        }
        let bit_lengths = intervals
            .iter()
            .enumerate()
            .map(|(dim, interval)| {
                gray::encode_length(interval.lower, interval.upper, interval.epsilon)
                    .map_err(|e| tag_dimension(e, dim))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            intervals,
            bit_lengths,
        })
    }

    /// Builds the domain from parallel slices of lower bounds, upper bounds
    /// and precisions.
    pub fn from_bounds(lower: &[f64], upper: &[f64], epsilon: &[f64]) -> Result<Self, GaError> {
        if upper.len() != lower.len() {
            return Err(GaError::DimensionMismatch {
                expected: lower.len(),
                actual: upper.len(),
            });
        }
        if epsilon.len() != lower.len() {
            return Err(GaError::DimensionMismatch {
                expected: lower.len(),
                actual: epsilon.len(),
            });
        }
        let intervals = lower
            .iter()
            .zip(upper)
            .zip(epsilon)
            .map(|((&lower, &upper), &epsilon)| Interval {
                lower,
                upper,
                epsilon,
            })
            .collect();
        Self::new(intervals)
    }

    /// One-dimensional domain.
    pub fn single(lower: f64, upper: f64, epsilon: f64) -> Result<Self, GaError> {
        Self::new(vec![Interval {
            lower,
            upper,
            epsilon,
        }])
    }

    /// Number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.intervals.len()
    }

    /// The per-dimension intervals.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Chromosome length of every dimension.
    pub fn bit_lengths(&self) -> &[usize] {
        &self.bit_lengths
    }

    /// Rejects domains whose chromosomes are shorter than `min_bits`.
    pub fn require_min_bits(&self, min_bits: usize) -> Result<(), GaError> {
        match self
            .bit_lengths
            .iter()
            .enumerate()
            .find(|(_, &len)| len < min_bits)
        {
            Some((dimension, &length)) => Err(GaError::ChromosomeTooShort { dimension, length }),
            None => Ok(()),
        }
    }
}

fn tag_dimension(err: GaError, dim: usize) -> GaError {
    match err {
        GaError::InvalidDomain {
            lower,
            upper,
            epsilon,
            ..
        } => GaError::InvalidDomain {
            dimension: dim,
            lower,
            upper,
            epsilon,
        },
        GaError::EncodingTooLong { length, .. } => GaError::EncodingTooLong {
            dimension: dim,
            length,
        },
        other => other,
    }
}
