//! oMOAHA operators and runner.
//!
//! The starting flock is the best `N` of a uniform sample and its three
//! opposition sets. Each generation every hummingbird picks a flight
//! pattern and forages:
//!
//! ```text
//! guided:      x' = t + n·D·(x − t)     t = most-unvisited flock mate
//! territorial: x' = b + n·D·b           b = self or a random archive member
//! ```
//!
//! with `n ~ N(0, 1)` and `D` the 0/1 flight mask. A child replaces its
//! parent when it dominates a member of the parent's stratum, or on a coin
//! flip when it neither dominates nor is dominated. The visit table tracks,
//! per bird, how long it has been since each flock mate was visited.

use super::config::MoahaConfig;
use crate::engine::{
    Bounds, Engine, Evaluator, GenerationContext, NoProgress, ParetoResult, ProgressObserver,
    SearchOperator,
};
use crate::error::ConfigError;
use crate::pareto::{
    counting_rank, determine_domination, dominance_cmp, Archive, Candidate, Dominance,
};
use rand::seq::index;
use rand::Rng;
use rand_distr::StandardNormal;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Algorithm name reported in logs, progress events and errors.
pub const NAME: &str = "oMOAHA";

/// Flight pattern, each drawn with probability 1/3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    /// A random subset of coordinates.
    Diagonal,
    /// Every coordinate.
    Omnidirectional,
    /// One random coordinate.
    Axial,
}

impl Flight {
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        let r: f64 = rng.random();
        if r < 1.0 / 3.0 {
            Flight::Diagonal
        } else if r > 2.0 / 3.0 {
            Flight::Omnidirectional
        } else {
            Flight::Axial
        }
    }

    /// 0/1 direction mask of length `dim`.
    ///
    /// A diagonal flight sets fewer than `dim − 1` coordinates when
    /// `dim > 3`, fewer than `dim` otherwise, and may set none.
    pub fn direction<R: Rng>(self, dim: usize, rng: &mut R) -> Vec<f64> {
        let mut mask = vec![0.0; dim];
        if dim == 0 {
            return mask;
        }
        match self {
            Flight::Diagonal => {
                let upper = if dim > 3 { dim - 1 } else { dim };
                let count = rng.random_range(0..upper);
                for d in index::sample(rng, dim, count) {
                    mask[d] = 1.0;
                }
            }
            Flight::Omnidirectional => mask.fill(1.0),
            Flight::Axial => mask[rng.random_range(0..dim)] = 1.0,
        }
        mask
    }
}

/// Opposite point `lb + ub − x`.
pub fn opposite(position: &[f64], bounds: &Bounds) -> Vec<f64> {
    position
        .iter()
        .enumerate()
        .map(|(d, &x)| bounds.lower()[d] + bounds.upper()[d] - x)
        .collect()
}

/// Quasi-opposite point: uniform between `x` and the midpoint.
pub fn quasi_opposite<R: Rng>(position: &[f64], bounds: &Bounds, rng: &mut R) -> Vec<f64> {
    let mid = bounds.midpoint();
    position
        .iter()
        .zip(&mid)
        .map(|(&x, &m)| {
            let r: f64 = rng.random();
            if x < m {
                x + (m - x) * r
            } else {
                m + (x - m) * r
            }
        })
        .collect()
}

/// Quasi-reflected point: uniform between the midpoint and the opposite.
pub fn quasi_reflected<R: Rng>(position: &[f64], bounds: &Bounds, rng: &mut R) -> Vec<f64> {
    let mid = bounds.midpoint();
    opposite(position, bounds)
        .into_iter()
        .zip(position.iter().zip(&mid))
        .map(|(opp, (&x, &m))| {
            let r: f64 = rng.random();
            if x < m {
                m + (opp - m) * r
            } else {
                m - (m - opp) * r
            }
        })
        .collect()
}

/// Flock mate with the highest visit level in `visits`, skipping `agent`.
///
/// Ties are broken uniformly among the tied mates that no other tied mate
/// dominates.
pub fn guided_target<R: Rng>(
    visits: &[f64],
    agent: usize,
    flock: &[Candidate],
    rng: &mut R,
) -> usize {
    let mut best = f64::NEG_INFINITY;
    let mut tied: Vec<usize> = Vec::new();
    for (i, &level) in visits.iter().enumerate() {
        if i == agent {
            continue;
        }
        if level > best {
            best = level;
            tied.clear();
            tied.push(i);
        } else if level == best {
            tied.push(i);
        }
    }

    match tied.len() {
        0 => agent,
        1 => tied[0],
        _ => {
            let mut subset: Vec<Candidate> = tied.iter().map(|&i| flock[i].clone()).collect();
            determine_domination(&mut subset);
            let open: Vec<usize> = tied
                .iter()
                .zip(&subset)
                .filter(|(_, c)| !c.dominated)
                .map(|(&i, _)| i)
                .collect();
            let pool = if open.is_empty() { &tied } else { &open };
            pool[rng.random_range(0..pool.len())]
        }
    }
}

fn max_off_diagonal(row: &[f64], i: usize) -> f64 {
    row.iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(_, &v)| v)
        .fold(f64::NEG_INFINITY, f64::max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Forage {
    Guided { target: usize },
    Territorial,
}

/// Hummingbird flock state: visit table plus the plan of the generation
/// in flight.
#[derive(Debug, Clone)]
pub struct MoahaOperator {
    population_size: usize,
    migration_interval: usize,

    visits: Vec<Vec<f64>>,
    plan: Vec<Forage>,
    strata: Vec<Vec<usize>>,
    stratum_of: Vec<usize>,
    migrating: bool,
}

impl MoahaOperator {
    pub fn new(config: &MoahaConfig) -> Self {
        Self {
            population_size: config.engine.population_size,
            migration_interval: config.migration_interval().max(1),
            visits: Vec::new(),
            plan: Vec::new(),
            strata: Vec::new(),
            stratum_of: Vec::new(),
            migrating: false,
        }
    }

    /// `N × N` visit table; row `i` holds how long bird `i` has not visited
    /// each flock mate.
    pub fn visit_table(&self) -> &[Vec<f64>] {
        &self.visits
    }

    /// Whether `child` replaces bird `agent`, judged against the bird's
    /// stratum at the start of the generation. The first mate that
    /// dominates or is dominated by the child settles the verdict.
    fn accepts<R: Rng>(
        &self,
        agent: usize,
        child: &Candidate,
        flock: &[Candidate],
        rng: &mut R,
    ) -> bool {
        let mates = self
            .stratum_of
            .get(agent)
            .and_then(|&s| self.strata.get(s));

        let mut verdict = Dominance::Neither;
        for &mate in mates.into_iter().flatten() {
            match dominance_cmp(&child.objectives, &flock[mate].objectives) {
                Dominance::Neither => continue,
                found => {
                    verdict = found;
                    break;
                }
            }
        }

        let coin: f64 = rng.random();
        match verdict {
            Dominance::Left => true,
            Dominance::Right => false,
            Dominance::Neither => coin > 0.5,
        }
    }

    /// Marks bird `agent` as freshly visited: every other bird's entry for
    /// it becomes its own off-diagonal maximum plus one.
    fn mark_visited(&mut self, agent: usize) {
        let maxima: Vec<f64> = self
            .visits
            .iter()
            .enumerate()
            .map(|(i, row)| max_off_diagonal(row, i))
            .collect();
        for (i, row) in self.visits.iter_mut().enumerate() {
            if i != agent {
                row[agent] = maxima[i] + 1.0;
            }
        }
    }

    fn rank_flock(&mut self, flock: &[Candidate]) {
        let mut ranked = flock.to_vec();
        self.strata = counting_rank(&mut ranked);
        self.stratum_of = vec![0; flock.len()];
        for (s, stratum) in self.strata.iter().enumerate() {
            for &i in stratum {
                self.stratum_of[i] = s;
            }
        }
    }
}

impl SearchOperator for MoahaOperator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn initial_extension<R: Rng>(
        &mut self,
        population: &[Candidate],
        bounds: &Bounds,
        rng: &mut R,
    ) -> Vec<Vec<f64>> {
        let mut extension = Vec::with_capacity(3 * population.len());
        extension.extend(population.iter().map(|c| opposite(&c.position, bounds)));
        extension.extend(
            population
                .iter()
                .map(|c| quasi_opposite(&c.position, bounds, rng)),
        );
        extension.extend(
            population
                .iter()
                .map(|c| quasi_reflected(&c.position, bounds, rng)),
        );
        extension
    }

    fn initialize<R: Rng>(
        &mut self,
        population: Vec<Candidate>,
        _bounds: &Bounds,
        _rng: &mut R,
    ) -> Vec<Candidate> {
        let mut pool = population;
        let strata = counting_rank(&mut pool);
        let n = self.population_size.min(pool.len());
        let order: Vec<usize> = strata.into_iter().flatten().take(n).collect();

        let mut slots: Vec<Option<Candidate>> = pool.into_iter().map(Some).collect();
        let flock: Vec<Candidate> = order.iter().filter_map(|&i| slots[i].take()).collect();

        self.visits = vec![vec![0.0; flock.len()]; flock.len()];
        flock
    }

    fn propose<R: Rng>(
        &mut self,
        ctx: &GenerationContext<'_>,
        population: &[Candidate],
        archive: &Archive,
        rng: &mut R,
    ) -> Vec<Vec<f64>> {
        let n = population.len();
        let dim = ctx.bounds.dimension();
        if self.visits.len() != n {
            self.visits = vec![vec![0.0; n]; n];
        }
        self.rank_flock(population);
        self.plan.clear();

        let members = archive.members();
        let mut proposals: Vec<Vec<f64>> = Vec::with_capacity(n);
        for (i, bird) in population.iter().enumerate() {
            let mask = Flight::draw(rng).direction(dim, rng);
            let x = &bird.position;

            if rng.random::<f64>() < 0.5 {
                let target = guided_target(&self.visits[i], i, population, rng);
                let step: f64 = rng.sample(StandardNormal);
                let t = &population[target].position;
                proposals.push(
                    (0..dim)
                        .map(|d| t[d] + step * mask[d] * (x[d] - t[d]))
                        .collect(),
                );
                self.plan.push(Forage::Guided { target });
            } else {
                let around_self = rng.random::<f64>() > 0.5;
                let step: f64 = rng.sample(StandardNormal);
                let base: &[f64] = if around_self || members.is_empty() {
                    x
                } else {
                    &members[rng.random_range(0..members.len())].position
                };
                proposals.push(
                    base.iter()
                        .zip(&mask)
                        .map(|(&b, &m)| b + step * m * b)
                        .collect(),
                );
                self.plan.push(Forage::Territorial);
            }
        }

        // the worst stratum is only known after foraging, so sample a
        // landing spot for every bird
        self.migrating = ctx.generation % self.migration_interval == 0;
        if self.migrating {
            proposals.extend((0..n).map(|_| ctx.bounds.sample(rng)));
        }

        proposals
    }

    fn select<R: Rng>(
        &mut self,
        ctx: &GenerationContext<'_>,
        population: Vec<Candidate>,
        offspring: &[Candidate],
        rng: &mut R,
    ) -> Vec<Candidate> {
        let mut flock = population;
        let n = flock.len();

        for (i, child) in offspring.iter().take(n).enumerate() {
            let accepted = self.accepts(i, child, &flock, rng);
            if let Some(Forage::Guided { target }) = self.plan.get(i) {
                self.visits[i][*target] = 0.0;
            }
            for level in self.visits[i].iter_mut() {
                *level += 1.0;
            }
            if accepted {
                flock[i] = child.clone();
                self.mark_visited(i);
            }
        }

        if !std::mem::take(&mut self.migrating) {
            return flock;
        }

        self.rank_flock(&flock);
        let migrants = self.strata.last().cloned().unwrap_or_default();
        log::debug!(
            "{NAME}: generation {}, migrating {} birds",
            ctx.generation,
            migrants.len()
        );
        for (k, &bird) in migrants.iter().enumerate() {
            if let Some(migrant) = offspring.get(n + k) {
                flock[bird] = migrant.clone();
                for level in self.visits[bird].iter_mut() {
                    *level += 1.0;
                }
                self.mark_visited(bird);
            }
        }

        flock
    }
}

/// Executes oMOAHA.
pub struct MoahaRunner;

impl MoahaRunner {
    /// Runs oMOAHA to its generation budget.
    pub fn run<E: Evaluator>(
        problem: &E,
        config: &MoahaConfig,
    ) -> Result<ParetoResult, ConfigError> {
        Self::run_with(problem, config, &mut NoProgress, None)
    }

    /// Runs oMOAHA with progress reporting and optional cancellation.
    pub fn run_with<E: Evaluator, P: ProgressObserver>(
        problem: &E,
        config: &MoahaConfig,
        observer: &mut P,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ParetoResult, ConfigError> {
        config.validate()?;
        Engine::new(problem, MoahaOperator::new(config), config.engine.clone())
            .run_with(observer, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::{dominates, ArchiveConfig};
    use crate::testing::Zdt1;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cand(position: &[f64], objs: &[f64]) -> Candidate {
        Candidate::from_parts(position.to_vec(), objs.to_vec())
    }

    fn unit_square() -> Bounds {
        Bounds::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_opposition_points() {
        let bounds = Bounds::new(vec![0.0, 0.0], vec![10.0, 10.0]).unwrap();
        let x = [2.0, 7.0];
        assert_eq!(opposite(&x, &bounds), vec![8.0, 3.0]);

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let q = quasi_opposite(&x, &bounds, &mut rng);
            assert!((2.0..=5.0).contains(&q[0]));
            assert!((5.0..=7.0).contains(&q[1]));

            let r = quasi_reflected(&x, &bounds, &mut rng);
            assert!((5.0..=8.0).contains(&r[0]));
            assert!((3.0..=5.0).contains(&r[1]));
        }
    }

    #[test]
    fn test_flight_masks() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(Flight::Omnidirectional.direction(4, &mut rng), vec![1.0; 4]);
        for _ in 0..50 {
            let axial = Flight::Axial.direction(6, &mut rng);
            assert_eq!(axial.iter().sum::<f64>(), 1.0);

            let diagonal = Flight::Diagonal.direction(6, &mut rng);
            assert!(diagonal.iter().sum::<f64>() < 5.0);
            assert!(diagonal.iter().all(|&m| m == 0.0 || m == 1.0));
        }
        assert!(Flight::Diagonal.direction(0, &mut rng).is_empty());
    }

    #[test]
    fn test_guided_target_single_maximum() {
        let flock = vec![cand(&[], &[1.0, 1.0]); 3];
        let mut rng = StdRng::seed_from_u64(3);
        // the agent's own entry is never a target
        assert_eq!(guided_target(&[9.0, 3.0, 1.0], 0, &flock, &mut rng), 1);
    }

    #[test]
    fn test_guided_target_tie_prefers_non_dominated() {
        let flock = vec![
            cand(&[], &[0.0, 0.0]),
            cand(&[], &[5.0, 5.0]),
            cand(&[], &[1.0, 1.0]),
            cand(&[], &[2.0, 2.0]),
        ];
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            assert_eq!(guided_target(&[9.0, 1.0, 7.0, 7.0], 0, &flock, &mut rng), 2);
        }
    }

    #[test]
    fn test_guided_target_tie_uses_flock_index() {
        let flock = vec![
            cand(&[], &[0.0, 0.0]),
            cand(&[], &[9.0, 9.0]),
            cand(&[], &[1.0, 2.0]),
            cand(&[], &[2.0, 1.0]),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 4];
        for _ in 0..100 {
            seen[guided_target(&[0.0, 1.0, 4.0, 4.0], 0, &flock, &mut rng)] = true;
        }
        assert_eq!(seen, [false, false, true, true]);
    }

    #[test]
    fn test_initialize_keeps_best_strata() {
        let config = MoahaConfig::default().with_population_size(2);
        let mut op = MoahaOperator::new(&config);
        let mut rng = StdRng::seed_from_u64(6);
        let pool = vec![
            cand(&[0.0], &[3.0, 3.0]),
            cand(&[1.0], &[1.0, 1.0]),
            cand(&[2.0], &[2.0, 2.0]),
            cand(&[3.0], &[0.5, 5.0]),
        ];
        let flock = op.initialize(pool, &unit_square(), &mut rng);
        let kept: Vec<f64> = flock.iter().map(|c| c.position[0]).collect();
        assert_eq!(kept, vec![1.0, 3.0]);
        assert_eq!(op.visit_table(), &[vec![0.0, 0.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn test_initial_extension_triples_sample() {
        let config = MoahaConfig::default().with_population_size(4);
        let mut op = MoahaOperator::new(&config);
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = unit_square();
        let sample: Vec<Candidate> = (0..4)
            .map(|_| cand(&bounds.sample(&mut rng), &[0.0, 0.0]))
            .collect();
        let extension = op.initial_extension(&sample, &bounds, &mut rng);
        assert_eq!(extension.len(), 12);
        assert_eq!(extension[0], opposite(&sample[0].position, &bounds));
    }

    #[test]
    fn test_select_accepts_dominating_child() {
        let bounds = unit_square();
        let config = MoahaConfig::default().with_population_size(3);
        let mut op = MoahaOperator::new(&config);
        let mut rng = StdRng::seed_from_u64(8);

        let flock = vec![
            cand(&[0.5, 0.5], &[2.0, 2.0]),
            cand(&[0.1, 0.9], &[1.0, 3.0]),
            cand(&[0.9, 0.1], &[3.0, 1.0]),
        ];
        let flock = op.initialize(flock, &bounds, &mut rng);
        let archive = Archive::from_population(&flock, ArchiveConfig::default(), &mut rng);
        let ctx = GenerationContext {
            generation: 1,
            max_generations: 10,
            bounds: &bounds,
        };

        let proposals = op.propose(&ctx, &flock, &archive, &mut rng);
        assert_eq!(proposals.len(), 3);

        let offspring = vec![
            cand(&[0.4, 0.4], &[0.5, 0.5]),
            cand(&[0.0, 0.0], &[5.0, 5.0]),
            cand(&[0.0, 0.0], &[6.0, 6.0]),
        ];
        let next = op.select(&ctx, flock.clone(), &offspring, &mut rng);

        assert_eq!(next[0].objectives, vec![0.5, 0.5]);
        assert_eq!(next[1], flock[1]);
        assert_eq!(next[2], flock[2]);

        let visits = op.visit_table();
        assert_eq!(visits[0], vec![1.0, 1.0, 1.0]);
        // bird 0 moved, so both others now see it as freshly visited
        assert!(visits[1][0] >= 1.0);
        assert!(visits[2][0] >= 1.0);
    }

    #[test]
    fn test_worst_stratum_migrates_on_schedule() {
        let bounds = unit_square();
        let config = MoahaConfig::default().with_population_size(3);
        let mut op = MoahaOperator::new(&config);
        let mut rng = StdRng::seed_from_u64(9);

        let flock = vec![
            cand(&[0.1, 0.1], &[1.0, 1.0]),
            cand(&[0.2, 0.2], &[2.0, 2.0]),
            cand(&[0.3, 0.3], &[3.0, 3.0]),
        ];
        let flock = op.initialize(flock, &bounds, &mut rng);
        let archive = Archive::from_population(&flock, ArchiveConfig::default(), &mut rng);

        let ctx = GenerationContext {
            generation: 0,
            max_generations: 10,
            bounds: &bounds,
        };
        let proposals = op.propose(&ctx, &flock, &archive, &mut rng);
        assert_eq!(proposals.len(), 6);

        let mut offspring = vec![cand(&[0.0, 0.0], &[9.0, 9.0]); 3];
        offspring.push(cand(&[0.7, 0.7], &[0.1, 0.1]));
        offspring.push(cand(&[0.8, 0.8], &[0.2, 0.2]));
        offspring.push(cand(&[0.9, 0.9], &[0.3, 0.3]));
        let next = op.select(&ctx, flock.clone(), &offspring, &mut rng);

        assert_eq!(next[0], flock[0]);
        assert_eq!(next[1], flock[1]);
        assert_eq!(next[2].objectives, vec![0.1, 0.1]);
        assert_eq!(op.visit_table()[2], vec![2.0, 2.0, 2.0]);

        // interval is 2·3 = 6; generation 1 has no migration
        let ctx = GenerationContext {
            generation: 1,
            max_generations: 10,
            bounds: &bounds,
        };
        assert_eq!(op.propose(&ctx, &next, &archive, &mut rng).len(), 3);
    }

    #[test]
    fn test_migrants_ranked_after_foraging() {
        let bounds = unit_square();
        let config = MoahaConfig::default().with_population_size(3);
        let mut op = MoahaOperator::new(&config);
        let mut rng = StdRng::seed_from_u64(10);

        let flock = vec![
            cand(&[0.1, 0.1], &[1.0, 1.0]),
            cand(&[0.2, 0.2], &[2.0, 2.0]),
            cand(&[0.3, 0.3], &[3.0, 3.0]),
        ];
        let flock = op.initialize(flock, &bounds, &mut rng);
        let archive = Archive::from_population(&flock, ArchiveConfig::default(), &mut rng);
        let ctx = GenerationContext {
            generation: 0,
            max_generations: 10,
            bounds: &bounds,
        };
        op.propose(&ctx, &flock, &archive, &mut rng);

        // bird 2 (worst at the start) forages past everyone
        let offspring = vec![
            cand(&[0.0, 0.0], &[9.0, 9.0]),
            cand(&[0.0, 0.0], &[9.0, 9.0]),
            cand(&[0.4, 0.4], &[0.5, 0.5]),
            cand(&[0.7, 0.7], &[4.0, 0.1]),
            cand(&[0.8, 0.8], &[4.0, 0.2]),
            cand(&[0.9, 0.9], &[4.0, 0.3]),
        ];
        let next = op.select(&ctx, flock.clone(), &offspring, &mut rng);

        assert_eq!(next[0], flock[0]);
        assert_eq!(next[1].objectives, vec![4.0, 0.1]);
        assert_eq!(next[2].objectives, vec![0.5, 0.5]);
    }

    #[test]
    fn test_zdt1_run() {
        let problem = Zdt1::new(5);
        let config = MoahaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_archive_capacity(20)
            .with_seed(13);
        let result = MoahaRunner::run(&problem, &config).unwrap();

        assert_eq!(result.algorithm, "oMOAHA");
        assert_eq!(result.generations, 40);
        assert!(!result.archive.is_empty() && result.archive.len() <= 20);
        for a in &result.archive {
            for b in &result.archive {
                assert!(!dominates(&a.objectives, &b.objectives));
            }
        }
    }
}
