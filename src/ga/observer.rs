//! Generation snapshots and the observers that receive them.
//!
//! Observers are called synchronously, in registration order, from inside
//! [`GaRunner::run_single_iteration`](super::GaRunner::run_single_iteration).
//! An observer error is logged and otherwise ignored; it never stops the
//! algorithm.

use super::individual::Individual;
use std::sync::mpsc::Sender;

/// Error type observers report.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Read-only view of one individual.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndividualSnapshot {
    /// Decoded point, one value per dimension.
    pub values: Vec<f64>,
    /// Cached fitness.
    pub fitness: f64,
}

impl From<&Individual> for IndividualSnapshot {
    fn from(individual: &Individual) -> Self {
        Self {
            values: individual.decode(),
            fitness: individual.fitness(),
        }
    }
}

/// State of the algorithm at a notification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationSnapshot {
    /// Generation counter. For a generation-completed notification this
    /// is the zero-based index of the generation that just finished; for
    /// algorithm-completed it is the final count.
    pub generation: usize,
    /// Population in its current order.
    pub population: Vec<IndividualSnapshot>,
    /// Average fitness of every completed generation, oldest first.
    pub fitness_history: Vec<f64>,
    /// Whether a [`run_to_completion`](super::GaRunner::run_to_completion)
    /// loop is active.
    pub running: bool,
}

impl GenerationSnapshot {
    /// The snapshot individual with the highest fitness.
    pub fn best(&self) -> Option<&IndividualSnapshot> {
        self.population.iter().max_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

/// Receives generation notifications.
///
/// Both methods default to doing nothing.
pub trait GenerationObserver: Send {
    /// Called once after every completed generation.
    fn on_generation_completed(
        &mut self,
        _snapshot: &GenerationSnapshot,
    ) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Called once when the generation counter reaches `max_generations`.
    fn on_algorithm_completed(
        &mut self,
        _snapshot: &GenerationSnapshot,
    ) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// Notification forwarded over a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    GenerationCompleted(GenerationSnapshot),
    AlgorithmCompleted(GenerationSnapshot),
}

/// Forwards every notification as a [`GenerationEvent`].
///
/// A dropped receiver surfaces as an observer error.
impl GenerationObserver for Sender<GenerationEvent> {
    fn on_generation_completed(
        &mut self,
        snapshot: &GenerationSnapshot,
    ) -> Result<(), ObserverError> {
        self.send(GenerationEvent::GenerationCompleted(snapshot.clone()))
            .map_err(|_| "generation event receiver disconnected".into())
    }

    fn on_algorithm_completed(
        &mut self,
        snapshot: &GenerationSnapshot,
    ) -> Result<(), ObserverError> {
        self.send(GenerationEvent::AlgorithmCompleted(snapshot.clone()))
            .map_err(|_| "generation event receiver disconnected".into())
    }
}
