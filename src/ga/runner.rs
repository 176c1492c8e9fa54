//! GA evolution controller.
//!
//! [`GaRunner`] owns the configuration, the current population and the
//! generation counter. It steps one generation at a time or loops until
//! `max_generations`, notifying observers and writing the text log.

use super::config::GaConfig;
use super::individual::Individual;
use super::log::LogSink;
use super::observer::{GenerationObserver, GenerationSnapshot, IndividualSnapshot};
use super::params::FunctionParams;
use super::population::Population;
use super::types::Objective;
use crate::error::GaError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a [`GaRunner::run_to_completion`] loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The generation counter reached `max_generations`.
    Completed,
    /// The cancellation flag was set before that.
    Cancelled,
}

/// Result of a [`GaRunner::run_to_completion`] call.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Why the loop stopped.
    pub status: RunStatus,

    /// Generation counter when the loop stopped.
    pub generations: usize,

    /// Fittest individual of the final population.
    pub best: Option<Individual>,

    /// Average fitness of every completed generation.
    pub fitness_history: Vec<f64>,
}

impl GaResult {
    /// Whether the run was cancelled externally.
    pub fn cancelled(&self) -> bool {
        self.status == RunStatus::Cancelled
    }

    /// Fitness of [`best`](Self::best).
    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().map(Individual::fitness)
    }
}

#[derive(Debug, Clone)]
struct State {
    generation: usize,
    population: Population,
    fitness_history: Vec<f64>,
    running: bool,
}

/// Drives the genetic algorithm.
///
/// # Usage
///
/// ```
/// use gray_ga::ga::{benchmarks::Himmelblau, FunctionParams, GaConfig, GaRunner};
/// use std::time::Duration;
///
/// let params = FunctionParams::from_bounds(&[-4.0, -4.0], &[4.0, 4.0], &[0.001, 0.001]).unwrap();
/// let config = GaConfig::default()
///     .with_max_generations(5)
///     .with_step_delay(Duration::ZERO)
///     .with_seed(42);
/// let mut runner = GaRunner::new(params, Himmelblau, config).unwrap();
///
/// while runner.run_single_iteration().unwrap() {}
/// assert_eq!(runner.generation(), 5);
/// ```
pub struct GaRunner<O: Objective> {
    params: Arc<FunctionParams>,
    objective: O,
    config: GaConfig,
    rng: StdRng,
    state: State,
    observers: Vec<Box<dyn GenerationObserver>>,
    log: Option<Box<dyn LogSink>>,
}

impl<O: Objective> GaRunner<O> {
    /// Validates `config` against `params` and creates the initial
    /// population.
    ///
    /// # Errors
    /// Any configuration error; no population is created in that case.
    pub fn new(params: FunctionParams, objective: O, config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;
        let params = Arc::new(params);
        let mut rng = create_rng(config.seed);
        let state = fresh_state(&params, &objective, &config, &mut rng)?;
        Ok(Self {
            params,
            objective,
            config,
            rng,
            state,
            observers: Vec::new(),
            log: None,
        })
    }

    /// Registers an observer.
    pub fn with_observer(mut self, observer: impl GenerationObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    /// Registers an observer.
    pub fn add_observer(&mut self, observer: impl GenerationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Attaches a text log and writes the current configuration summary
    /// to it.
    pub fn with_log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.log = Some(Box::new(sink));
        self.write_log(&self.config.summary());
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Search domain.
    pub fn params(&self) -> &FunctionParams {
        &self.params
    }

    /// Objective function.
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Number of completed generations since the last reset.
    pub fn generation(&self) -> usize {
        self.state.generation
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.state.population
    }

    /// Average fitness of every completed generation.
    pub fn fitness_history(&self) -> &[f64] {
        &self.state.fitness_history
    }

    /// Whether a [`run_to_completion`](Self::run_to_completion) loop is active.
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Whether the generation counter has reached `max_generations`.
    pub fn is_complete(&self) -> bool {
        self.state.generation >= self.config.max_generations
    }

    /// Fittest individual of the current population.
    pub fn best(&self) -> Option<&Individual> {
        self.state.population.best()
    }

    /// Read-only copy of the current state.
    pub fn snapshot(&self) -> GenerationSnapshot {
        GenerationSnapshot {
            generation: self.state.generation,
            population: self
                .state
                .population
                .individuals()
                .iter()
                .map(IndividualSnapshot::from)
                .collect(),
            fitness_history: self.state.fitness_history.clone(),
            running: self.state.running,
        }
    }

    /// Applies `update` to the configuration and resets.
    ///
    /// The update is validated first; on error nothing changes.
    pub fn configure<F: FnOnce(&mut GaConfig)>(&mut self, update: F) -> Result<(), GaError> {
        let mut config = self.config.clone();
        update(&mut config);
        config.validate()?;
        self.config = config;
        self.reset()
    }

    /// Replaces the objective function and resets.
    pub fn set_objective(&mut self, objective: O) -> Result<(), GaError> {
        self.objective = objective;
        self.reset()
    }

    /// Discards the current state and starts over with a fresh random
    /// population at generation 0.
    ///
    /// With a fixed seed the generator is re-seeded, so every reset
    /// replays the same run.
    pub fn reset(&mut self) -> Result<(), GaError> {
        let mut rng = create_rng(self.config.seed);
        let state = fresh_state(&self.params, &self.objective, &self.config, &mut rng)?;
        self.rng = rng;
        self.state = state;
        info!(
            population_size = self.config.population_size,
            dimensions = self.params.dimensions(),
            max_generations = self.config.max_generations,
            "genetic algorithm reset"
        );
        self.write_log(&self.config.summary());
        Ok(())
    }

    /// Runs one generation.
    ///
    /// Returns `Ok(false)` without doing anything once `max_generations`
    /// has been reached. Otherwise steps the population, records its
    /// average fitness, notifies generation-completed, advances the
    /// counter and, if that was the last generation, notifies
    /// algorithm-completed.
    ///
    /// # Errors
    /// [`GaError::DegenerateFitness`] if selection meets a pool with no
    /// positive total fitness. The previous generation is kept intact and
    /// the runner can continue after reconfiguration.
    pub fn run_single_iteration(&mut self) -> Result<bool, GaError> {
        if self.is_complete() {
            return Ok(false);
        }

        let config = self.config.clone();
        let mut population = self.state.population.clone();
        let outcome = population.step(
            &self.objective,
            config.crossover_rate,
            config.mutation_rate,
            config.parallel,
            &mut self.rng,
        )?;
        self.state.population = population;
        self.state.fitness_history.push(outcome.average_fitness);

        debug!(
            generation = self.state.generation,
            average_fitness = outcome.average_fitness,
            best_fitness = ?self.best().map(Individual::fitness),
            children = outcome.children,
            "generation completed"
        );
        let snapshot = self.snapshot();
        self.notify(&snapshot, Notification::GenerationCompleted);

        self.state.generation += 1;
        if self.is_complete() {
            info!(generations = self.state.generation, "genetic algorithm completed");
            let snapshot = self.snapshot();
            self.notify(&snapshot, Notification::AlgorithmCompleted);
        }

        let dump = self
            .state
            .population
            .dump(&self.objective, Some(self.state.generation));
        self.write_log(&dump);
        self.write_log(&format!(
            "| Average fitness in generation: {}\n",
            outcome.average_fitness
        ));
        Ok(true)
    }

    /// Runs generations until `max_generations` or until `cancel` is set,
    /// sleeping `step_delay` between generations.
    ///
    /// Cancellation is checked between generations only; a generation in
    /// progress always finishes.
    ///
    /// # Errors
    /// Propagates the first failed generation; the running flag is cleared
    /// either way.
    pub fn run_to_completion(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, GaError> {
        self.state.running = true;
        let outcome = self.drive(cancel.as_deref());
        self.state.running = false;
        let status = outcome?;

        if status == RunStatus::Cancelled {
            info!(generation = self.state.generation, "genetic algorithm cancelled");
        }
        Ok(GaResult {
            status,
            generations: self.state.generation,
            best: self.best().cloned(),
            fitness_history: self.state.fitness_history.clone(),
        })
    }

    fn drive(&mut self, cancel: Option<&AtomicBool>) -> Result<RunStatus, GaError> {
        loop {
            if self.is_complete() {
                return Ok(RunStatus::Completed);
            }
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Ok(RunStatus::Cancelled);
            }
            self.run_single_iteration()?;
            if !self.is_complete() && !self.config.step_delay.is_zero() {
                std::thread::sleep(self.config.step_delay);
            }
        }
    }

    fn notify(&mut self, snapshot: &GenerationSnapshot, notification: Notification) {
        for (index, observer) in self.observers.iter_mut().enumerate() {
            let result = match notification {
                Notification::GenerationCompleted => observer.on_generation_completed(snapshot),
                Notification::AlgorithmCompleted => observer.on_algorithm_completed(snapshot),
            };
            if let Err(err) = result {
                warn!(observer = index, ?notification, error = %err, "observer failed");
            }
        }
    }

    fn write_log(&mut self, entry: &str) {
        if let Some(sink) = self.log.as_mut() {
            if let Err(err) = sink.write_entry(entry) {
                warn!(error = %err, "generation log write failed");
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Notification {
    GenerationCompleted,
    AlgorithmCompleted,
}

fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

fn fresh_state<O: Objective>(
    params: &Arc<FunctionParams>,
    objective: &O,
    config: &GaConfig,
    rng: &mut StdRng,
) -> Result<State, GaError> {
    let mut population = Population::new(config.population_size, params.clone(), rng)?;
    population.evaluate(objective, config.parallel);
    Ok(State {
        generation: 0,
        population,
        fitness_history: Vec::with_capacity(config.max_generations),
        running: false,
    })
}

// ============================================================================
// Tests
// ============================================================================
