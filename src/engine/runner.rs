//! Generic archive-based iteration loop.
//!
//! [`Engine`] drives any [`SearchOperator`] through
//! initialization → evaluation → archive build → (propose → clip →
//! evaluate → select → archive merge/prune) → result.

use super::config::EngineConfig;
use super::pool::EvaluationPool;
use super::progress::{Completion, NoProgress, ProgressEvent, ProgressObserver};
use super::types::{Bounds, Evaluator, GenerationContext, SearchOperator};
use crate::error::ConfigError;
use crate::pareto::{cell_capacity, Archive, Candidate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Every family optimizes at least two objectives.
pub const MIN_OBJECTIVES: usize = 2;

/// Result of a multi-objective run.
#[derive(Debug, Clone)]
pub struct ParetoResult {
    /// Final archive: mutually non-dominated, at most `capacity` members.
    pub archive: Vec<Candidate>,

    /// Generations actually executed.
    pub generations: usize,

    /// Whether the run stopped early on cancellation or time limit.
    pub cancelled: bool,

    /// Algorithm family name.
    pub algorithm: &'static str,
}

impl ParetoResult {
    /// Objective vectors of the archive, in archive order.
    pub fn objectives(&self) -> Vec<Vec<f64>> {
        self.archive.iter().map(|c| c.objectives.clone()).collect()
    }

    /// Decodes every archive member for reporting.
    pub fn decode<E: Evaluator>(&self, evaluator: &E) -> Vec<E::Report> {
        self.archive
            .iter()
            .map(|c| evaluator.decode_for_reporting(&c.position))
            .collect()
    }
}

/// Checks that `evaluator` can be optimized by the family `algorithm`
/// under `config`, returning the validated bounds.
pub fn validate_problem<E: Evaluator>(
    evaluator: &E,
    algorithm: &'static str,
    config: &EngineConfig,
) -> Result<Bounds, ConfigError> {
    config.validate()?;
    if !evaluator.minimizes() {
        return Err(ConfigError::Maximization);
    }

    let objectives = evaluator.number_of_objectives();
    if objectives < MIN_OBJECTIVES {
        return Err(ConfigError::ObjectiveCount {
            algorithm,
            minimum: MIN_OBJECTIVES,
            actual: objectives,
        });
    }
    if cell_capacity(config.archive.divisions, objectives).is_none() {
        return Err(ConfigError::GridTooLarge {
            divisions: config.archive.divisions,
            objectives,
        });
    }

    Bounds::from_evaluator(evaluator)
}

/// Rejects any candidate whose objective vector is not `expected` long.
fn check_objective_lengths(
    algorithm: &'static str,
    expected: usize,
    candidates: &[Candidate],
) -> Result<(), ConfigError> {
    match candidates.iter().find(|c| c.objectives.len() != expected) {
        Some(c) => Err(ConfigError::ObjectiveLengthMismatch {
            algorithm,
            expected,
            found: c.objectives.len(),
        }),
        None => Ok(()),
    }
}

/// Runs a [`SearchOperator`] against an [`Evaluator`].
///
/// # Usage
///
/// ```ignore
/// let engine = Engine::new(&problem, MogwoOperator::new(2.0), config);
/// let result = engine.run()?;
/// ```
pub struct Engine<'a, E, O> {
    evaluator: &'a E,
    operator: O,
    config: EngineConfig,
}

impl<'a, E: Evaluator, O: SearchOperator> Engine<'a, E, O> {
    pub fn new(evaluator: &'a E, operator: O, config: EngineConfig) -> Self {
        Self {
            evaluator,
            operator,
            config,
        }
    }

    /// Runs to the generation budget without progress reporting.
    pub fn run(self) -> Result<ParetoResult, ConfigError> {
        self.run_with(&mut NoProgress, None)
    }

    /// Runs with a progress observer and an optional cancellation token.
    ///
    /// The token is checked once per generation, before the next batch of
    /// evaluations. When set, the current archive is returned with
    /// `cancelled = true`.
    pub fn run_with<P: ProgressObserver>(
        mut self,
        observer: &mut P,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ParetoResult, ConfigError> {
        let algorithm = self.operator.name();
        let bounds = validate_problem(self.evaluator, algorithm, &self.config)?;
        let pool = EvaluationPool::new(self.config.parallel, self.config.workers)?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let started = Instant::now();
        let n = self.config.population_size;
        let max_generations = self.config.max_generations;
        let m = self.evaluator.number_of_objectives();

        log::info!(
            "{algorithm}: starting, population {n}, {max_generations} generations, archive capacity {}",
            self.config.archive.capacity
        );

        // 1. Uniform initial sample
        let sample: Vec<Vec<f64>> = (0..n).map(|_| bounds.sample(&mut rng)).collect();
        let mut population = pool.evaluate(self.evaluator, sample);
        check_objective_lengths(algorithm, m, &population)?;

        // 2. Operator-specific extension and reduction
        let mut extension = self
            .operator
            .initial_extension(&population, &bounds, &mut rng);
        if !extension.is_empty() {
            for p in extension.iter_mut() {
                bounds.clip(p);
            }
            let extended = pool.evaluate(self.evaluator, extension);
            check_objective_lengths(algorithm, m, &extended)?;
            population.extend(extended);
        }
        population = self.operator.initialize(population, &bounds, &mut rng);

        let mut archive =
            Archive::from_population(&population, self.config.archive.clone(), &mut rng);

        // 3. Generations
        let mut generations = 0;
        let mut cancelled = false;

        for generation in 0..max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = self.config.time_limit_ms {
                if started.elapsed().as_millis() as u64 >= limit {
                    log::info!("{algorithm}: time limit reached after {generation} generations");
                    cancelled = true;
                    break;
                }
            }

            let ctx = GenerationContext {
                generation,
                max_generations,
                bounds: &bounds,
            };

            let mut proposals = self.operator.propose(&ctx, &population, &archive, &mut rng);
            for p in proposals.iter_mut() {
                bounds.clip(p);
            }
            let offspring = pool.evaluate(self.evaluator, proposals);
            check_objective_lengths(algorithm, m, &offspring)?;

            population = self.operator.select(&ctx, population, &offspring, &mut rng);

            if self.operator.population_holds_offspring() {
                archive.update(&population, &mut rng);
            } else {
                let mut incoming = Vec::with_capacity(population.len() + offspring.len());
                incoming.extend_from_slice(&population);
                incoming.extend(offspring);
                archive.update(&incoming, &mut rng);
            }

            generations = generation + 1;
            log::debug!(
                "{algorithm}: generation {generations}/{max_generations}, archive size {}",
                archive.len()
            );
            observer.on_generation(&ProgressEvent {
                generation: generations,
                progress_percent: generations as f64 / max_generations as f64 * 100.0,
                archive_size: archive.len(),
                algorithm: algorithm.to_string(),
            });
        }

        observer.on_complete(&Completion {
            generations,
            archive_size: archive.len(),
            cancelled,
            algorithm: algorithm.to_string(),
        });
        log::info!(
            "{algorithm}: finished after {generations} generations with {} archive members",
            archive.len()
        );

        Ok(ParetoResult {
            archive: archive.into_members(),
            generations,
            cancelled,
            algorithm,
        })
    }
}
