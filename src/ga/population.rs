//! The population and its generation step.
//!
//! One generation is four phases, always run together by
//! [`Population::step`]:
//!
//! 1. **Rank**: recompute fitness, stable sort best first
//! 2. **Elite crossover**: each consecutive ranked pair `(0,1), (2,3), …`
//!    produces two mutated children with probability `crossover_rate`;
//!    children are appended, so the population grows past its nominal size
//! 3. **Roulette selection**: if the population grew, draw exactly the
//!    nominal number of survivors without replacement
//! 4. **Average fitness**: recompute fitness and record the mean

use super::individual::Individual;
use super::params::FunctionParams;
use super::selection;
use super::types::Objective;
use crate::error::GaError;
use rand::Rng;
use std::fmt::Write as _;
use std::sync::Arc;

/// Shortest chromosome the crossover window `[2, len - 2)` can cut.
pub const MIN_CROSSOVER_BITS: usize = 5;

/// What one generation step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Children appended by elite crossover.
    pub children: usize,
    /// Whether roulette selection ran (it is skipped when nothing grew).
    pub selected: bool,
    /// Mean fitness of the population after selection.
    pub average_fitness: f64,
}

/// An ordered collection of individuals with a fixed nominal size.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    size: usize,
    params: Arc<FunctionParams>,
    average_fitness: f64,
}

impl Population {
    /// Creates `size` random individuals over `params`.
    ///
    /// Fitness is not evaluated; call [`evaluate`](Self::evaluate) or
    /// [`step`](Self::step).
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] for `size == 0` and
    /// [`GaError::ChromosomeTooShort`] when a dimension encodes to fewer
    /// than [`MIN_CROSSOVER_BITS`] bits.
    pub fn new<R: Rng>(
        size: usize,
        params: Arc<FunctionParams>,
        rng: &mut R,
    ) -> Result<Self, GaError> {
        let individuals = (0..size)
            .map(|_| Individual::random(params.clone(), rng))
            .collect();
        Self::from_individuals(size, params, individuals)
    }

    /// Wraps existing individuals. `size` is the nominal size restored by
    /// selection, independent of how many individuals are passed in.
    pub fn from_individuals(
        size: usize,
        params: Arc<FunctionParams>,
        individuals: Vec<Individual>,
    ) -> Result<Self, GaError> {
        if size == 0 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        params.require_min_bits(MIN_CROSSOVER_BITS)?;
        if let Some(foreign) = individuals.iter().find(|ind| ind.params() != &params) {
            return Err(GaError::DimensionMismatch {
                expected: params.dimensions(),
                actual: foreign.params().dimensions(),
            });
        }
        Ok(Self {
            individuals,
            size,
            params,
            average_fitness: 0.0,
        })
    }

    /// Nominal population size.
    pub fn nominal_size(&self) -> usize {
        self.size
    }

    /// Current number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individuals in their current order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The domain the individuals are encoded against.
    pub fn params(&self) -> &Arc<FunctionParams> {
        &self.params
    }

    /// Average fitness recorded by the last step.
    pub fn average_fitness(&self) -> f64 {
        self.average_fitness
    }

    /// Individual with the highest cached fitness.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().max_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Recomputes every individual's cached fitness.
    pub fn evaluate<O: Objective>(&mut self, objective: &O, parallel: bool) {
        evaluate_all(&mut self.individuals, objective, parallel);
    }

    /// Phase 1: recompute fitness and sort best first.
    ///
    /// The sort is stable, so equal fitness keeps the previous order.
    pub fn rank<O: Objective>(&mut self, objective: &O, parallel: bool) {
        self.evaluate(objective, parallel);
        self.individuals.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Phase 2: cross consecutive pairs of the ranked population.
    ///
    /// Pairs are `(i, i + 1)` for even `i < size - 1`; with an odd size the
    /// last individual does not reproduce. Each pair reproduces with
    /// probability `crossover_rate`, using an independent cut point per
    /// dimension drawn from `[2, len - 2)`. Each child then flips one
    /// random bit per dimension with probability `mutation_rate`. Both
    /// children are evaluated and appended.
    ///
    /// Returns the number of children appended.
    pub fn elite_crossover<O: Objective, R: Rng>(
        &mut self,
        objective: &O,
        crossover_rate: f64,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Result<usize, GaError> {
        let bit_lengths = self.params.bit_lengths();
        let pair_limit = self.size.min(self.individuals.len()).saturating_sub(1);
        let mut children = Vec::new();

        for i in (0..pair_limit).step_by(2) {
            if rng.random_range(0.0..1.0) >= crossover_rate {
                continue;
            }
            let first = &self.individuals[i];
            let second = &self.individuals[i + 1];
            let cuts = draw_cut_points(bit_lengths, rng)?;

            let mut child1 = first.clone();
            let mut child2 = second.clone();
            for (dim, &cut) in cuts.iter().enumerate() {
                child1.crossover(first, second, cut, dim)?;
                child2.crossover(second, first, cut, dim)?;
            }
            mutate_child(&mut child1, bit_lengths, mutation_rate, rng);
            mutate_child(&mut child2, bit_lengths, mutation_rate, rng);

            child1.evaluate(|x| objective.fitness(x));
            child2.evaluate(|x| objective.fitness(x));
            children.push(child1);
            children.push(child2);
        }

        let count = children.len();
        self.individuals.extend(children);
        Ok(count)
    }

    /// Phase 3: trim the population back to its nominal size.
    ///
    /// Skipped entirely (returns `Ok(false)`) unless the population is
    /// larger than the nominal size. Otherwise the population is ranked
    /// again and survivors are drawn by roulette without replacement,
    /// recomputing probabilities after every draw.
    ///
    /// # Errors
    /// [`GaError::DegenerateFitness`] when the remaining pool's fitness
    /// does not sum to a positive value. No individual is removed in that
    /// case, though the population has been re-ranked.
    pub fn roulette_selection<O: Objective, R: Rng>(
        &mut self,
        objective: &O,
        parallel: bool,
        rng: &mut R,
    ) -> Result<bool, GaError> {
        if self.individuals.len() <= self.size {
            return Ok(false);
        }
        self.rank(objective, parallel);

        let fitnesses: Vec<f64> = self.individuals.iter().map(Individual::fitness).collect();
        let chosen = selection::sample_without_replacement(&fitnesses, self.size, rng)?;
        self.individuals = chosen
            .into_iter()
            .map(|i| self.individuals[i].clone())
            .collect();
        Ok(true)
    }

    /// Phase 4: recompute fitness and record the mean.
    pub fn update_average_fitness<O: Objective>(&mut self, objective: &O, parallel: bool) -> f64 {
        self.evaluate(objective, parallel);
        self.average_fitness = if self.individuals.is_empty() {
            0.0
        } else {
            self.individuals.iter().map(Individual::fitness).sum::<f64>()
                / self.individuals.len() as f64
        };
        self.average_fitness
    }

    /// Runs one full generation: rank, elite crossover, roulette
    /// selection, average fitness.
    ///
    /// The population may be left mid-step on error; callers that need
    /// the previous generation should step a clone.
    pub fn step<O: Objective, R: Rng>(
        &mut self,
        objective: &O,
        crossover_rate: f64,
        mutation_rate: f64,
        parallel: bool,
        rng: &mut R,
    ) -> Result<StepOutcome, GaError> {
        self.rank(objective, parallel);
        let children = self.elite_crossover(objective, crossover_rate, mutation_rate, rng)?;
        let selected = self.roulette_selection(objective, parallel, rng)?;
        let average_fitness = self.update_average_fitness(objective, parallel);
        Ok(StepOutcome {
            children,
            selected,
            average_fitness,
        })
    }

    /// Text dump of the population: a header when `generation` is given,
    /// then one line per individual.
    pub fn dump<O: Objective>(&self, objective: &O, generation: Option<usize>) -> String {
        let mut out = String::new();
        if let Some(generation) = generation {
            let _ = writeln!(out, "== Generation {generation} ==");
        }
        for individual in &self.individuals {
            let value = objective.evaluate(&individual.decode());
            out.push_str(&individual.log_line(value));
            out.push('\n');
        }
        out
    }
}

/// Draws one crossover cut point per dimension, uniform in `[2, len - 2)`.
///
/// # Errors
/// [`GaError::ChromosomeTooShort`] if a dimension has fewer than
/// [`MIN_CROSSOVER_BITS`] bits, since the window would be empty.
pub fn draw_cut_points<R: Rng>(bit_lengths: &[usize], rng: &mut R) -> Result<Vec<usize>, GaError> {
    bit_lengths
        .iter()
        .enumerate()
        .map(|(dimension, &length)| {
            if length < MIN_CROSSOVER_BITS {
                Err(GaError::ChromosomeTooShort { dimension, length })
            } else {
                Ok(rng.random_range(2..length - 2))
            }
        })
        .collect()
}

fn mutate_child<R: Rng>(child: &mut Individual, bit_lengths: &[usize], rate: f64, rng: &mut R) {
    for (dim, &length) in bit_lengths.iter().enumerate() {
        if rng.random_range(0.0..1.0) < rate {
            child.mutate(dim, rng.random_range(0..length));
        }
    }
}

fn evaluate_all<O: Objective>(individuals: &mut [Individual], objective: &O, parallel: bool) {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            individuals.par_iter_mut().for_each(|ind| {
                ind.evaluate(|x| objective.fitness(x));
            });
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for ind in individuals.iter_mut() {
        ind.evaluate(|x| objective.fitness(x));
    }
}
