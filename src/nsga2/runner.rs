//! NSGA-II variation operators, survivor selection and runner.
//!
//! Each generation produces `round(pc·N/2)·2` blend-crossover children and
//! `round(pm·N)` Gaussian mutants from uniformly drawn parents. Survivors
//! are the best `N` of parents ∪ offspring by rank, then crowding
//! distance.

use super::config::{Nsga2Config, RankStrategy};
use crate::engine::{
    Bounds, Engine, Evaluator, GenerationContext, NoProgress, ParetoResult, ProgressObserver,
    SearchOperator,
};
use crate::error::ConfigError;
use crate::pareto::{
    assign_crowding_distance, counting_rank, crowded_comparison, front_rank, Archive, Candidate,
};
use rand::seq::index;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Algorithm name reported in logs, progress events and errors.
pub const NAME: &str = "NSGA-II";

/// Blend crossover with a fresh `α ~ U(0, 1)` per gene.
///
/// `c1 = α·p1 + (1 − α)·p2`, `c2 = α·p2 + (1 − α)·p1`.
pub fn blend_crossover<R: Rng>(p1: &[f64], p2: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    p1.iter()
        .zip(p2)
        .map(|(&a, &b)| {
            let alpha: f64 = rng.random();
            (alpha * a + (1.0 - alpha) * b, alpha * b + (1.0 - alpha) * a)
        })
        .unzip()
}

/// Adds `sigma[d]·N(0, 1)` to `ceil(mu·dim)` distinct genes of `parent`.
pub fn gaussian_mutation<R: Rng>(parent: &[f64], mu: f64, sigma: &[f64], rng: &mut R) -> Vec<f64> {
    let mut child = parent.to_vec();
    let dim = parent.len();
    let genes = ((mu * dim as f64).ceil() as usize).min(dim);
    for d in index::sample(rng, dim, genes) {
        let noise: f64 = rng.sample(rand_distr::StandardNormal);
        child[d] += sigma[d] * noise;
    }
    child
}

/// Keeps the best `n` members of `union` by rank, then crowding distance.
pub fn survivors(mut union: Vec<Candidate>, n: usize, strategy: RankStrategy) -> Vec<Candidate> {
    let fronts = match strategy {
        RankStrategy::Front => front_rank(&mut union),
        RankStrategy::Counting => counting_rank(&mut union),
    };
    assign_crowding_distance(&mut union, &fronts);
    union.sort_by(crowded_comparison);
    union.truncate(n);
    union
}

/// NSGA-II reproduction and survival.
#[derive(Debug, Clone)]
pub struct Nsga2Operator {
    crossover_rate: f64,
    mutation_rate: f64,
    mutation_strength: f64,
    sigma: f64,
    rank: RankStrategy,
}

impl Nsga2Operator {
    pub fn new(config: &Nsga2Config) -> Self {
        Self {
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
            mutation_strength: config.mutation_strength,
            sigma: config.sigma,
            rank: config.rank,
        }
    }

    /// `(crossover children, mutants)` per generation for population `n`.
    pub fn offspring_counts(&self, n: usize) -> (usize, usize) {
        let crossover = (self.crossover_rate * n as f64 / 2.0).round() as usize * 2;
        let mutation = (self.mutation_rate * n as f64).round() as usize;
        (crossover, mutation)
    }
}

impl SearchOperator for Nsga2Operator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn initialize<R: Rng>(
        &mut self,
        population: Vec<Candidate>,
        _bounds: &Bounds,
        _rng: &mut R,
    ) -> Vec<Candidate> {
        let n = population.len();
        survivors(population, n, self.rank)
    }

    fn propose<R: Rng>(
        &mut self,
        ctx: &GenerationContext<'_>,
        population: &[Candidate],
        _archive: &Archive,
        rng: &mut R,
    ) -> Vec<Vec<f64>> {
        let n = population.len();
        let (n_crossover, n_mutation) = self.offspring_counts(n);
        let sigma: Vec<f64> = (0..ctx.bounds.dimension())
            .map(|d| self.sigma * ctx.bounds.range(d))
            .collect();

        let mut children = Vec::with_capacity(n_crossover + n_mutation);
        for _ in 0..n_crossover / 2 {
            let p1 = &population[rng.random_range(0..n)].position;
            let p2 = &population[rng.random_range(0..n)].position;
            let (c1, c2) = blend_crossover(p1, p2, rng);
            children.push(c1);
            children.push(c2);
        }
        for _ in 0..n_mutation {
            let parent = &population[rng.random_range(0..n)].position;
            children.push(gaussian_mutation(parent, self.mutation_strength, &sigma, rng));
        }
        children
    }

    fn select<R: Rng>(
        &mut self,
        _ctx: &GenerationContext<'_>,
        population: Vec<Candidate>,
        offspring: &[Candidate],
        _rng: &mut R,
    ) -> Vec<Candidate> {
        let n = population.len();
        let mut union = population;
        union.extend_from_slice(offspring);
        for c in union.iter_mut() {
            c.reset_bookkeeping();
        }
        survivors(union, n, self.rank)
    }
}

/// Executes NSGA-II.
pub struct Nsga2Runner;

impl Nsga2Runner {
    /// Runs NSGA-II to its generation budget.
    pub fn run<E: Evaluator>(
        problem: &E,
        config: &Nsga2Config,
    ) -> Result<ParetoResult, ConfigError> {
        Self::run_with(problem, config, &mut NoProgress, None)
    }

    /// Runs NSGA-II with progress reporting and optional cancellation.
    pub fn run_with<E: Evaluator, P: ProgressObserver>(
        problem: &E,
        config: &Nsga2Config,
        observer: &mut P,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ParetoResult, ConfigError> {
        config.validate()?;
        Engine::new(problem, Nsga2Operator::new(config), config.engine.clone())
            .run_with(observer, cancel)
    }
}
