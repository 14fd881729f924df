//! MOPSO move operator and runner.
//!
//! Each particle keeps a velocity and a personal best. Per generation one
//! leader is drawn from the archive by grid roulette and
//!
//! ```text
//! v' = w·v + c1·r1·(pbest − x) + c2·r2·(leader − x),   |v'_d| ≤ vmax_d
//! x' = x + v'
//! ```
//!
//! The swarm is then split into thirds: the first is left alone, the
//! second has `round(rate · size)` particles re-sampled uniformly, the
//! third has `round((1 − t/T)^(5·dim) · size)` particles re-sampled.

use super::config::MopsoConfig;
use crate::engine::{
    Bounds, Engine, Evaluator, GenerationContext, NoProgress, ParetoResult, ProgressObserver,
    SearchOperator,
};
use crate::error::ConfigError;
use crate::pareto::{Archive, Candidate};
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Algorithm name reported in logs, progress events and errors.
pub const NAME: &str = "MOPSO";

/// Particle swarm state and velocity update.
#[derive(Debug, Clone)]
pub struct MopsoOperator {
    inertia: f64,
    cognitive: f64,
    social: f64,
    max_velocity_percent: f64,
    mutation_rate: f64,

    max_velocity: Vec<f64>,
    velocities: Vec<Vec<f64>>,
    personal_best: Vec<Candidate>,
}

impl MopsoOperator {
    pub fn new(config: &MopsoConfig) -> Self {
        Self {
            inertia: config.inertia,
            cognitive: config.cognitive,
            social: config.social,
            max_velocity_percent: config.max_velocity,
            mutation_rate: config.mutation_rate,
            max_velocity: Vec::new(),
            velocities: Vec::new(),
            personal_best: Vec::new(),
        }
    }

    /// Current personal bests, one per particle.
    pub fn personal_best(&self) -> &[Candidate] {
        &self.personal_best
    }

    /// New velocity and position of particle `i`.
    fn fly<R: Rng>(
        &mut self,
        i: usize,
        position: &[f64],
        leader: &[f64],
        bounds: &Bounds,
        rng: &mut R,
    ) -> Vec<f64> {
        let (w, c1, c2) = (self.inertia, self.cognitive, self.social);
        let max_velocity = &self.max_velocity;
        let pbest = &self.personal_best[i].position;
        let velocity = &mut self.velocities[i];

        position
            .iter()
            .enumerate()
            .map(|(d, &x)| {
                let vmax = max_velocity[d];
                let v = w * velocity[d]
                    + c1 * rng.random::<f64>() * (pbest[d] - x)
                    + c2 * rng.random::<f64>() * (leader[d] - x);
                let v = v.clamp(-vmax, vmax);
                let next = x + v;
                // bounce off the wall; the engine clips the position
                velocity[d] = if bounds.violates(d, next) { -v } else { v };
                next
            })
            .collect()
    }
}

/// Sizes of the three swarm sections.
pub fn thirds(n: usize) -> [usize; 3] {
    let third = n as f64 / 3.0;
    let rounded = third.round() as usize;
    if third.fract() < 0.5 {
        [n - 2 * rounded, rounded, rounded]
    } else {
        [rounded, rounded, n - 2 * rounded]
    }
}

/// Re-samples `count` random members of `section` uniformly in `bounds`.
fn resample_section<R: Rng>(
    positions: &mut [Vec<f64>],
    section: std::ops::Range<usize>,
    count: usize,
    bounds: &Bounds,
    rng: &mut R,
) {
    if section.is_empty() {
        return;
    }
    for _ in 0..count {
        let idx = rng.random_range(section.clone());
        positions[idx] = bounds.sample(rng);
    }
}

impl SearchOperator for MopsoOperator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn population_holds_offspring(&self) -> bool {
        true
    }

    fn initialize<R: Rng>(
        &mut self,
        population: Vec<Candidate>,
        bounds: &Bounds,
        _rng: &mut R,
    ) -> Vec<Candidate> {
        let dim = bounds.dimension();
        self.max_velocity = (0..dim)
            .map(|d| bounds.range(d) * self.max_velocity_percent / 100.0)
            .collect();
        self.velocities = vec![vec![0.0; dim]; population.len()];
        self.personal_best = population.clone();
        population
    }

    fn propose<R: Rng>(
        &mut self,
        ctx: &GenerationContext<'_>,
        population: &[Candidate],
        archive: &Archive,
        rng: &mut R,
    ) -> Vec<Vec<f64>> {
        let leader = match archive.select_leader(rng) {
            Some(leader) => leader.position.clone(),
            None => return population.iter().map(|c| c.position.clone()).collect(),
        };

        let mut positions: Vec<Vec<f64>> = population
            .iter()
            .enumerate()
            .map(|(i, particle)| self.fly(i, &particle.position, &leader, ctx.bounds, rng))
            .collect();

        let n = positions.len();
        let [first, second, third] = thirds(n);
        let uniform = (self.mutation_rate * second as f64).round() as usize;
        resample_section(&mut positions, first..first + second, uniform, ctx.bounds, rng);

        let decay = (1.0 - ctx.fraction()).powf(5.0 * ctx.bounds.dimension() as f64);
        let decaying = (decay * third as f64).round() as usize;
        resample_section(&mut positions, first + second..n, decaying, ctx.bounds, rng);

        positions
    }

    fn select<R: Rng>(
        &mut self,
        _ctx: &GenerationContext<'_>,
        _population: Vec<Candidate>,
        offspring: &[Candidate],
        rng: &mut R,
    ) -> Vec<Candidate> {
        for (pbest, current) in self.personal_best.iter_mut().zip(offspring) {
            let replace = current.dominates(pbest)
                || (!pbest.dominates(current) && rng.random::<f64>() > 0.5);
            if replace {
                *pbest = current.clone();
            }
        }
        offspring.to_vec()
    }
}

/// Executes MOPSO.
pub struct MopsoRunner;

impl MopsoRunner {
    /// Runs MOPSO to its generation budget.
    pub fn run<E: Evaluator>(
        problem: &E,
        config: &MopsoConfig,
    ) -> Result<ParetoResult, ConfigError> {
        Self::run_with(problem, config, &mut NoProgress, None)
    }

    /// Runs MOPSO with progress reporting and optional cancellation.
    pub fn run_with<E: Evaluator, P: ProgressObserver>(
        problem: &E,
        config: &MopsoConfig,
        observer: &mut P,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ParetoResult, ConfigError> {
        config.validate()?;
        Engine::new(problem, MopsoOperator::new(config), config.engine.clone())
            .run_with(observer, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::dominates;
    use crate::testing::Zdt1;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_thirds_cover_swarm() {
        for n in 2..50 {
            let sizes = thirds(n);
            assert_eq!(sizes.iter().sum::<usize>(), n, "n = {n}");
        }
        assert_eq!(thirds(9), [3, 3, 3]);
        assert_eq!(thirds(10), [4, 3, 3]);
        assert_eq!(thirds(11), [4, 4, 3]);
    }

    #[test]
    fn test_velocity_clamped() {
        let bounds = Bounds::new(vec![0.0, 0.0], vec![10.0, 10.0]).unwrap();
        let config = MopsoConfig::default().with_max_velocity(5.0);
        let mut op = MopsoOperator::new(&config);
        let population = vec![Candidate::from_parts(vec![0.0, 0.0], vec![0.0, 0.0])];
        let mut rng = StdRng::seed_from_u64(3);
        op.initialize(population, &bounds, &mut rng);

        for _ in 0..50 {
            let next = op.fly(0, &[0.0, 0.0], &[10.0, 10.0], &bounds, &mut rng);
            for (d, x) in next.iter().enumerate() {
                assert!(x.abs() <= 0.5 + 1e-12);
                assert!(op.velocities[0][d].abs() <= 0.5 + 1e-12);
            }
        }
    }

    #[test]
    fn test_velocity_reflects_at_bound() {
        let bounds = Bounds::new(vec![0.0], vec![1.0]).unwrap();
        let config = MopsoConfig::default()
            .with_coefficients(1.0, 0.0, 0.0)
            .with_max_velocity(50.0);
        let mut op = MopsoOperator::new(&config);
        let mut rng = StdRng::seed_from_u64(3);
        op.initialize(
            vec![Candidate::from_parts(vec![0.9], vec![0.0, 0.0])],
            &bounds,
            &mut rng,
        );
        op.velocities[0][0] = 0.3;

        let next = op.fly(0, &[0.9], &[0.9], &bounds, &mut rng);
        assert!((next[0] - 1.2).abs() < 1e-12);
        assert!((op.velocities[0][0] + 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_personal_best_replaced_when_dominated() {
        let bounds = Bounds::new(vec![0.0], vec![1.0]).unwrap();
        let mut op = MopsoOperator::new(&MopsoConfig::default());
        let mut rng = StdRng::seed_from_u64(4);
        let start = vec![Candidate::from_parts(vec![0.5], vec![2.0, 2.0])];
        op.initialize(start.clone(), &bounds, &mut rng);

        let ctx = GenerationContext {
            generation: 0,
            max_generations: 10,
            bounds: &bounds,
        };
        let better = vec![Candidate::from_parts(vec![0.4], vec![1.0, 1.0])];
        op.select(&ctx, start.clone(), &better, &mut rng);
        assert_eq!(op.personal_best()[0].objectives, vec![1.0, 1.0]);

        let worse = vec![Candidate::from_parts(vec![0.6], vec![3.0, 3.0])];
        op.select(&ctx, better, &worse, &mut rng);
        assert_eq!(op.personal_best()[0].objectives, vec![1.0, 1.0]);
    }

    #[test]
    fn test_zdt1_run() {
        let problem = Zdt1::new(5);
        let config = MopsoConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_archive_capacity(20)
            .with_seed(7);
        let result = MopsoRunner::run(&problem, &config).unwrap();

        assert_eq!(result.algorithm, "MOPSO");
        assert!(!result.archive.is_empty() && result.archive.len() <= 20);
        for a in &result.archive {
            for b in &result.archive {
                assert!(!dominates(&a.objectives, &b.objectives));
            }
        }
    }
}
