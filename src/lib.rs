//! Binary Gray-coded genetic algorithm for continuous optimization.
//!
//! Candidate solutions are fixed-length Gray-coded bit strings, one per
//! dimension of the search domain. A [`ga::GaRunner`] evolves a population
//! of them generation by generation:
//!
//! 1. **Rank**: evaluate fitness and sort best first
//! 2. **Reproduce**: cross consecutive ranked pairs, mutate the children
//! 3. **Select**: trim the grown population back with roulette sampling
//! 4. **Measure**: record the generation's average fitness
//!
//! Objective functions plug in through the [`ga::Objective`] trait.
//! Fitness is always "higher is better".
//!
//! # Example
//!
//! ```
//! use gray_ga::ga::{benchmarks::DampedSine, FunctionParams, GaConfig, GaRunner};
//! use std::time::Duration;
//!
//! let params = FunctionParams::single(-5.0, 5.0, 1e-5).unwrap();
//! let config = GaConfig::default()
//!     .with_max_generations(10)
//!     .with_step_delay(Duration::ZERO)
//!     .with_seed(7);
//!
//! let mut runner = GaRunner::new(params, DampedSine, config).unwrap();
//! let result = runner.run_to_completion(None).unwrap();
//! assert_eq!(result.fitness_history.len(), 10);
//! ```

pub mod error;
pub mod ga;

pub use error::GaError;
