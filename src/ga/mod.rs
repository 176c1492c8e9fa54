//! Gray-coded genetic algorithm.
//!
//! Users describe the search domain with [`FunctionParams`] and the
//! landscape with an [`Objective`]; [`GaRunner`] does the rest.
//!
//! # Core Types
//!
//! - [`FunctionParams`]: per-dimension bounds and precision
//! - [`Objective`]: raw value and "higher is better" fitness of a point
//! - [`Individual`]: one Gray-coded chromosome per dimension plus cached fitness
//! - [`Population`]: ranking, elite crossover, roulette selection
//! - [`GaConfig`]: algorithm parameters
//! - [`GaRunner`]: generation counter, observers, run loop
//!
//! # Submodules
//!
//! - [`gray`]: Gray code transforms and chromosome decoding
//! - [`selection`]: roulette wheel sampling
//! - [`benchmarks`]: reference objectives
//! - [`log`]: generation text log sinks
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Caruana & Schaffer (1988), "Representation and Hidden Bias: Gray vs.
//!   Binary Coding for Genetic Algorithms"

pub mod benchmarks;
mod config;
pub mod gray;
mod individual;
pub mod log;
mod observer;
mod params;
mod population;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use individual::Individual;
pub use log::{FileLog, LogSink, MemoryLog};
pub use observer::{
    GenerationEvent, GenerationObserver, GenerationSnapshot, IndividualSnapshot, ObserverError,
};
pub use params::{FunctionParams, Interval};
pub use population::{draw_cut_points, Population, StepOutcome, MIN_CROSSOVER_BITS};
pub use runner::{GaResult, GaRunner, RunStatus};
pub use types::Objective;
