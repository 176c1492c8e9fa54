//! Fitness-proportionate (roulette wheel) selection.
//!
//! The wheel is spun over raw fitness values: an individual's slice is
//! `fitness_i / sum(fitness)`. Fitness is "higher is better", so no
//! inversion is needed.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::error::GaError;
use rand::Rng;

/// Normalized selection probabilities `p_i = fitness_i / sum(fitness)`.
///
/// # Errors
/// [`GaError::DegenerateFitness`] when the sum is zero, negative or not
/// finite, including an empty pool.
pub fn selection_probabilities(fitnesses: &[f64]) -> Result<Vec<f64>, GaError> {
    let total: f64 = fitnesses.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(GaError::DegenerateFitness {
            total,
            pool_size: fitnesses.len(),
        });
    }
    Ok(fitnesses.iter().map(|&f| f / total).collect())
}

/// Spins the wheel once and returns the chosen index.
///
/// Draws `r` uniformly from `[0, 1)` and returns the first index whose
/// cumulative probability exceeds `r`.
///
/// # Errors
/// See [`selection_probabilities`].
pub fn spin<R: Rng>(fitnesses: &[f64], rng: &mut R) -> Result<usize, GaError> {
    let probabilities = selection_probabilities(fitnesses)?;
    let r: f64 = rng.random_range(0.0..1.0);
    Ok(pick(&probabilities, r))
}

/// Walks the cumulative distribution until it first exceeds `r`.
fn pick(probabilities: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative > r {
            return i;
        }
    }

    // Rounding can leave the total a hair under 1.0; fall back to the
    // last slice that has any weight.
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len().saturating_sub(1))
}

/// Draws `count` individuals without replacement.
///
/// Probabilities are recomputed from the remaining pool after every
/// removal. Returns the chosen indices into `fitnesses` in draw order.
///
/// # Errors
/// [`GaError::DegenerateFitness`] as soon as the remaining pool has no
/// positive total fitness.
pub fn sample_without_replacement<R: Rng>(
    fitnesses: &[f64],
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, GaError> {
    let mut remaining: Vec<usize> = (0..fitnesses.len()).collect();
    let mut chosen = Vec::with_capacity(count.min(fitnesses.len()));

    while chosen.len() < count && !remaining.is_empty() {
        let pool: Vec<f64> = remaining.iter().map(|&i| fitnesses[i]).collect();
        let slot = spin(&pool, rng)?;
        chosen.push(remaining.remove(slot));
    }
    Ok(chosen)
}
