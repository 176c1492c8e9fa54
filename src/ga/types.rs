//! The objective function contract.
//!
//! The engine never looks inside an objective; it only asks for the raw
//! landscape value (for reporting) and the fitness (for ranking and
//! selection).

use std::sync::Arc;

/// A function being optimized.
///
/// # Fitness convention
///
/// Fitness is **higher is better** everywhere in the engine. For a
/// minimization problem the usual transform is
/// `fitness(x) = -evaluate(x) + constant`, with the constant chosen so
/// that fitness stays positive over the domain: roulette selection
/// weighs individuals by raw fitness, and a non-positive total aborts
/// the generation with [`GaError::DegenerateFitness`](crate::GaError::DegenerateFitness).
/// An objective that breaks the convention silently inverts selection
/// pressure.
///
/// # Implementing
///
/// ```
/// use gray_ga::ga::Objective;
///
/// struct Sphere;
///
/// impl Objective for Sphere {
///     fn evaluate(&self, x: &[f64]) -> f64 {
///         x.iter().map(|v| v * v).sum()
///     }
///     fn fitness(&self, x: &[f64]) -> f64 {
///         100.0 - self.evaluate(x)
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// `Objective` must be `Send + Sync` because fitness may be evaluated in
/// parallel with the `parallel` feature.
pub trait Objective: Send + Sync {
    /// Raw objective value at `x`. `x` has one entry per dimension.
    fn evaluate(&self, x: &[f64]) -> f64;

    /// Fitness of `x`, a monotonic transform of [`evaluate`](Self::evaluate).
    fn fitness(&self, x: &[f64]) -> f64;
}

impl<O: Objective + ?Sized> Objective for Box<O> {
    fn evaluate(&self, x: &[f64]) -> f64 {
        (**self).evaluate(x)
    }

    fn fitness(&self, x: &[f64]) -> f64 {
        (**self).fitness(x)
    }
}

impl<O: Objective + ?Sized> Objective for Arc<O> {
    fn evaluate(&self, x: &[f64]) -> f64 {
        (**self).evaluate(x)
    }

    fn fitness(&self, x: &[f64]) -> f64 {
        (**self).fitness(x)
    }
}
