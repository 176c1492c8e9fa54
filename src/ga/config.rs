//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::GaError;
use std::time::Duration;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, operator rates, termination and pacing.
///
/// # Defaults
///
/// ```
/// use gray_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use gray_ga::ga::GaConfig;
/// use std::time::Duration;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_crossover_rate(0.9)
///     .with_mutation_rate(0.05)
///     .with_step_delay(Duration::ZERO);
/// assert!(config.validate().is_ok());
/// ```
///
/// Builders store values as given; out-of-range rates are reported by
/// [`validate`](Self::validate) rather than clamped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals at the start and end of every generation.
    pub population_size: usize,

    /// Fraction of the population considered elite (0.0–1.0).
    ///
    /// Reported in the configuration summary. Reproduction pairs up the
    /// whole ranked population and does not read it.
    pub elite_ratio: f64,

    /// Probability that a ranked pair produces two children (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability, per child and per dimension, of flipping one random
    /// bit (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of generations after which the run is complete.
    pub max_generations: usize,

    /// Pause between generations in
    /// [`run_to_completion`](super::GaRunner::run_to_completion).
    pub step_delay: Duration,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate fitness in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            elite_ratio: 0.2,
            crossover_rate: 0.85,
            mutation_rate: 0.15,
            max_generations: 100,
            step_delay: Duration::from_millis(500),
            seed: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the pause between generations.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("elite_ratio", self.elite_ratio),
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GaError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Text block written to the generation log on every reset.
    pub fn summary(&self) -> String {
        format!(
            "|| Algorithm Settings:\n\
             || Population size: {}\n\
             || Elite ratio: {}\n\
             || Crossover rate: {}\n\
             || Mutation rate: {}\n",
            self.population_size, self.elite_ratio, self.crossover_rate, self.mutation_rate
        )
    }
}
