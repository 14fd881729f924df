//! MOGWO move operator and runner.
//!
//! Every wolf is pulled toward three archive leaders (alpha, beta, delta)
//! drawn by grid roulette, distinct whenever the archive is large enough:
//!
//! ```text
//! X_l  = L − A·|C·L − X|,   A = 2a·r1 − a,   C = 2·r2
//! X'   = (X_α + X_β + X_δ) / 3
//! ```
//!
//! `a` decreases linearly from `a_param` to 0 over the run, shifting the
//! pack from exploration (`|A| > 1`) to exploitation.

use super::config::MogwoConfig;
use crate::engine::{
    Engine, Evaluator, GenerationContext, NoProgress, ParetoResult, ProgressObserver,
    SearchOperator,
};
use crate::error::ConfigError;
use crate::pareto::{Archive, Candidate};
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Algorithm name reported in logs, progress events and errors.
pub const NAME: &str = "MOGWO";

/// Grey wolf position update.
#[derive(Debug, Clone)]
pub struct MogwoOperator {
    a_param: f64,
}

impl MogwoOperator {
    pub fn new(a_param: f64) -> Self {
        Self { a_param }
    }

    /// `a` at the given point of the run.
    pub fn control(&self, ctx: &GenerationContext<'_>) -> f64 {
        self.a_param * (1.0 - ctx.fraction())
    }
}

/// Draws `[alpha, beta, delta]` archive indices.
///
/// Delta is drawn first, beta excluding delta, alpha excluding both.
/// When the archive is too small to exclude, the previous pick is reused.
pub fn select_pack<R: Rng>(archive: &Archive, rng: &mut R) -> Option<[usize; 3]> {
    let delta = archive.select_leader_excluding(&[], rng)?;
    let beta = archive
        .select_leader_excluding(&[delta], rng)
        .unwrap_or(delta);
    let alpha = archive
        .select_leader_excluding(&[delta, beta], rng)
        .unwrap_or(beta);
    Some([alpha, beta, delta])
}

/// Moves `wolf` toward the three leaders.
fn hunt<R: Rng>(wolf: &[f64], leaders: [&[f64]; 3], a: f64, rng: &mut R) -> Vec<f64> {
    wolf.iter()
        .enumerate()
        .map(|(d, &x)| {
            let sum: f64 = leaders
                .iter()
                .map(|leader| {
                    let big_a = 2.0 * a * rng.random::<f64>() - a;
                    let c = 2.0 * rng.random::<f64>();
                    let distance = (c * leader[d] - x).abs();
                    leader[d] - big_a * distance
                })
                .sum();
            sum / 3.0
        })
        .collect()
}

impl SearchOperator for MogwoOperator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn population_holds_offspring(&self) -> bool {
        true
    }

    fn propose<R: Rng>(
        &mut self,
        ctx: &GenerationContext<'_>,
        population: &[Candidate],
        archive: &Archive,
        rng: &mut R,
    ) -> Vec<Vec<f64>> {
        let a = self.control(ctx);
        let members = archive.members();

        population
            .iter()
            .map(|wolf| match select_pack(archive, rng) {
                Some([alpha, beta, delta]) => hunt(
                    &wolf.position,
                    [
                        members[alpha].position.as_slice(),
                        members[beta].position.as_slice(),
                        members[delta].position.as_slice(),
                    ],
                    a,
                    rng,
                ),
                None => wolf.position.clone(),
            })
            .collect()
    }
}

/// Executes MOGWO.
///
/// # Usage
///
/// ```ignore
/// let config = MogwoConfig::default().with_seed(42);
/// let result = MogwoRunner::run(&problem, &config)?;
/// println!("{} non-dominated solutions", result.archive.len());
/// ```
pub struct MogwoRunner;

impl MogwoRunner {
    /// Runs MOGWO to its generation budget.
    pub fn run<E: Evaluator>(
        problem: &E,
        config: &MogwoConfig,
    ) -> Result<ParetoResult, ConfigError> {
        Self::run_with(problem, config, &mut NoProgress, None)
    }

    /// Runs MOGWO with progress reporting and optional cancellation.
    pub fn run_with<E: Evaluator, P: ProgressObserver>(
        problem: &E,
        config: &MogwoConfig,
        observer: &mut P,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ParetoResult, ConfigError> {
        config.validate()?;
        Engine::new(problem, MogwoOperator::new(config.a_param), config.engine.clone())
            .run_with(observer, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Bounds;
    use crate::pareto::{dominates, ArchiveConfig};
    use crate::testing::Zdt1;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn archive_of(points: &[[f64; 2]]) -> Archive {
        let members: Vec<Candidate> = points
            .iter()
            .map(|p| Candidate::from_parts(p.to_vec(), p.to_vec()))
            .collect();
        let mut rng = StdRng::seed_from_u64(0);
        Archive::from_population(&members, ArchiveConfig::default(), &mut rng)
    }

    #[test]
    fn test_pack_distinct_when_possible() {
        let archive = archive_of(&[[0.0, 4.0], [1.0, 3.0], [2.0, 2.0], [4.0, 0.0]]);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let [alpha, beta, delta] = select_pack(&archive, &mut rng).unwrap();
            assert_ne!(alpha, beta);
            assert_ne!(beta, delta);
            assert_ne!(alpha, delta);
        }
    }

    #[test]
    fn test_pack_single_member() {
        let archive = archive_of(&[[1.0, 1.0]]);
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(select_pack(&archive, &mut rng), Some([0, 0, 0]));
    }

    #[test]
    fn test_control_decreases_to_zero() {
        let bounds = Bounds::new(vec![0.0], vec![1.0]).unwrap();
        let op = MogwoOperator::new(2.0);
        let at = |generation| {
            op.control(&GenerationContext {
                generation,
                max_generations: 100,
                bounds: &bounds,
            })
        };
        assert!((at(0) - 2.0).abs() < 1e-12);
        assert!((at(50) - 1.0).abs() < 1e-12);
        assert!(at(99) < 0.05);
    }

    #[test]
    fn test_hunt_with_a_zero_stays_near_leaders() {
        // with a = 0 the wolf lands exactly on the leaders' mean
        let mut rng = StdRng::seed_from_u64(1);
        let moved = hunt(&[0.5], [&[0.1][..], &[0.2][..], &[0.3][..]], 0.0, &mut rng);
        assert!((moved[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_zdt1_run() {
        let problem = Zdt1::new(5);
        let config = MogwoConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_archive_capacity(20)
            .with_seed(42);
        let result = MogwoRunner::run(&problem, &config).unwrap();

        assert_eq!(result.algorithm, "MOGWO");
        assert_eq!(result.generations, 40);
        assert!(!result.archive.is_empty() && result.archive.len() <= 20);
        for a in &result.archive {
            assert!(a.position.iter().all(|&x| (0.0..=1.0).contains(&x)));
            for b in &result.archive {
                assert!(!dominates(&a.objectives, &b.objectives));
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let config = MogwoConfig::default().with_a_param(-1.0);
        assert!(matches!(
            MogwoRunner::run(&Zdt1::new(3), &config),
            Err(ConfigError::InvalidParameter { name: "a_param", .. })
        ));
    }
}
