//! Reference objective functions.
//!
//! Both are minimization problems; fitness is `constant - f(x)` with the
//! constant large enough to keep fitness positive over the usual domain.

use super::types::Objective;

/// `f(x) = -1.3 sin(1.6 x² - 0.3) e^(-0.3 x + 0.5)` on `[-5, 5]`.
///
/// Fitness is `10 - f(x)`. The oscillation is damped towards positive
/// `x`, so the deepest minima sit at the negative end of the domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DampedSine;

impl Objective for DampedSine {
    fn evaluate(&self, x: &[f64]) -> f64 {
        let x = x[0];
        -1.3 * (1.6 * x * x - 0.3).sin() * (-0.3 * x + 0.5).exp()
    }

    fn fitness(&self, x: &[f64]) -> f64 {
        -self.evaluate(x) + 10.0
    }
}

/// Himmelblau's function `(x² + y - 11)² + (x + y² - 7)²`.
///
/// Four global minima of 0, one at `(3, 2)`. Fitness is `300 - f(x, y)`,
/// positive everywhere on `[-4, 4]²`, where f peaks at 250.
#[derive(Debug, Clone, Copy, Default)]
pub struct Himmelblau;

impl Objective for Himmelblau {
    fn evaluate(&self, x: &[f64]) -> f64 {
        let (a, b) = (x[0], x[1]);
        (a * a + b - 11.0).powi(2) + (a + b * b - 7.0).powi(2)
    }

    fn fitness(&self, x: &[f64]) -> f64 {
        -self.evaluate(x) + 300.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damped_sine_values() {
        // sin(-0.3) at x = 0
        let expected = -1.3 * (-0.3f64).sin() * 0.5f64.exp();
        assert!((DampedSine.evaluate(&[0.0]) - expected).abs() < 1e-12);
        assert!((DampedSine.fitness(&[0.0]) - (10.0 - expected)).abs() < 1e-12);
    }

    #[test]
    fn test_damped_sine_fitness_positive_on_domain() {
        for i in 0..=1000 {
            let x = -5.0 + i as f64 * 0.01;
            assert!(DampedSine.fitness(&[x]) > 0.0, "x = {x}");
        }
    }

    #[test]
    fn test_himmelblau_minima() {
        for point in [
            [3.0, 2.0],
            [-2.805118, 3.131312],
            [-3.779310, -3.283186],
            [3.584428, -1.848126],
        ] {
            assert!(Himmelblau.evaluate(&point) < 1e-6, "{point:?}");
            assert!((Himmelblau.fitness(&point) - 300.0).abs() < 1e-6);
        }
    }
}
