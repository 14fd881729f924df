//! Bounded archive of mutually non-dominated candidates.
//!
//! The archive is merged with each generation's non-dominated offspring,
//! filtered back to a Pareto set, and truncated to capacity by one of two
//! interchangeable policies:
//!
//! - [`Truncation::GridRoulette`]: removal biased toward crowded hypercube
//!   cells (MOGWO, MOPSO).
//! - [`Truncation::Decd`]: dynamic crowding-distance elimination, one
//!   candidate at a time with incremental neighbour updates (oMOAHA).
//!
//! # Invariants
//!
//! After every [`Archive::update`]: no member dominates another, no two
//! members share an objective vector, `len() <= capacity`, and every member
//! carries a grid cell for the current hypercube.

use super::candidate::Candidate;
use super::dominance::pareto_filter;
use super::grid::{cell_groups, Hypercube};
use super::leader::{roulette_wheel, select_leader, select_leader_excluding};
use crate::error::ConfigError;
use rand::Rng;
use std::cmp::Ordering;

/// Archive truncation policy. One policy is used for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Truncation {
    /// Remove a random member of a cell drawn with probability
    /// `∝ count^gamma`. A `gamma` of zero is treated as one.
    GridRoulette { gamma: f64 },

    /// Dynamic crowding-distance elimination.
    #[default]
    Decd,
}

/// Archive and hypercube parameters.
///
/// # Examples
///
/// ```
/// use u_pareto::pareto::{ArchiveConfig, Truncation};
///
/// let config = ArchiveConfig::default()
///     .with_capacity(50)
///     .with_divisions(8)
///     .with_truncation(Truncation::GridRoulette { gamma: 2.0 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveConfig {
    /// Maximum number of members kept after pruning (`C`).
    pub capacity: usize,

    /// Hypercube buckets per objective (`G`).
    pub divisions: usize,

    /// Fraction of each objective's range added on both sides of the grid.
    pub padding: f64,

    /// Leader selection pressure `β` in `quality = 10 / count^β`.
    pub leader_pressure: f64,

    /// Truncation policy applied when the archive overflows.
    pub truncation: Truncation,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            divisions: 10,
            padding: 0.1,
            leader_pressure: 1.0,
            truncation: Truncation::default(),
        }
    }
}

impl ArchiveConfig {
    /// Sets the archive capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of hypercube buckets per objective.
    pub fn with_divisions(mut self, divisions: usize) -> Self {
        self.divisions = divisions;
        self
    }

    /// Sets the grid padding fraction.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Sets the leader selection pressure.
    pub fn with_leader_pressure(mut self, pressure: f64) -> Self {
        self.leader_pressure = pressure;
        self
    }

    /// Sets the truncation policy.
    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::invalid("capacity", "must be at least 1"));
        }
        if self.divisions == 0 {
            return Err(ConfigError::invalid("divisions", "must be at least 1"));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConfigError::invalid("padding", "must be finite and non-negative"));
        }
        if !self.leader_pressure.is_finite() || self.leader_pressure < 0.0 {
            return Err(ConfigError::invalid(
                "leader_pressure",
                "must be finite and non-negative",
            ));
        }
        if let Truncation::GridRoulette { gamma } = self.truncation {
            if !gamma.is_finite() || gamma < 0.0 {
                return Err(ConfigError::invalid("gamma", "must be finite and non-negative"));
            }
        }
        Ok(())
    }
}

/// Merges `incoming` into a copy of `archive` and keeps the Pareto set.
///
/// Archive members come first, so on identical objective vectors the
/// existing member is kept.
pub fn merge(archive: &[Candidate], incoming: &[Candidate]) -> Vec<Candidate> {
    let mut union: Vec<Candidate> = Vec::with_capacity(archive.len() + incoming.len());
    union.extend_from_slice(archive);
    union.extend_from_slice(incoming);
    pareto_filter(&mut union)
}

/// Removes `excess` members, drawing cells with probability `∝ count^gamma`.
///
/// Members must carry grid cells from a hypercube built over `members`.
/// The relative order of survivors is preserved.
pub fn truncate_grid_roulette<R: Rng>(
    members: Vec<Candidate>,
    excess: usize,
    gamma: f64,
    rng: &mut R,
) -> Vec<Candidate> {
    if excess == 0 {
        return members;
    }
    if excess >= members.len() {
        return Vec::new();
    }

    let gamma = if gamma == 0.0 { 1.0 } else { gamma };

    let mut cells: Vec<Vec<usize>> = cell_groups(&members, 0..members.len())
        .into_iter()
        .map(|(_, group)| group)
        .collect();
    let mut removed = vec![false; members.len()];

    for _ in 0..excess {
        let weights: Vec<f64> = cells.iter().map(|c| (c.len() as f64).powf(gamma)).collect();
        let cell = roulette_wheel(&weights, rng)
            .unwrap_or_else(|| rng.random_range(0..cells.len()));
        let slot = rng.random_range(0..cells[cell].len());
        let victim = cells[cell].swap_remove(slot);
        removed[victim] = true;
        if cells[cell].is_empty() {
            cells.remove(cell);
        }
        log::trace!("grid roulette removed member {victim} from cell {cell}");
    }

    members
        .into_iter()
        .zip(removed)
        .filter_map(|(c, gone)| (!gone).then_some(c))
        .collect()
}

/// Dynamic crowding-distance elimination.
///
/// Removes `excess` members one at a time, always the one with the
/// smallest total crowding distance. Per objective, the two extremes get
/// `+∞` and interior members `|next − prev| / |max − min|`; a zero range
/// also yields `+∞`. The total is the sum over objectives, `+∞` if any
/// term is. After each removal only the removed member's neighbours are
/// recomputed on each axis; an axis is renormalized (without re-sorting)
/// only when one of its extremes was removed.
///
/// Survivors keep their relative order and carry their final total in
/// `crowding_distance`.
///
/// # Example
///
/// ```
/// use u_pareto::pareto::{decd, Candidate};
///
/// let members: Vec<Candidate> = [[0.0, 4.0], [1.0, 3.0], [1.1, 2.9], [4.0, 0.0]]
///     .iter()
///     .map(|o| Candidate::from_parts(vec![], o.to_vec()))
///     .collect();
/// let kept = decd(members, 1);
/// assert_eq!(kept.len(), 3);
/// assert!(kept.iter().any(|c| c.objectives == vec![0.0, 4.0]));
/// assert!(kept.iter().any(|c| c.objectives == vec![4.0, 0.0]));
/// ```
pub fn decd(members: Vec<Candidate>, excess: usize) -> Vec<Candidate> {
    if excess == 0 {
        return members;
    }
    if excess >= members.len() {
        return Vec::new();
    }

    let mut state = DecdState::new(&members);
    let mut alive = vec![true; members.len()];

    for _ in 0..excess {
        let Some(victim) = state.pick_victim(&alive) else {
            break;
        };
        if state.infinite_terms(victim) > 0 {
            log::debug!("DECD removing member {victim} with no finite crowding distance left");
        }
        alive[victim] = false;
        state.remove(victim);
    }

    members
        .into_iter()
        .enumerate()
        .filter(|&(i, _)| alive[i])
        .map(|(i, mut c)| {
            c.crowding_distance = state.total(i);
            c
        })
        .collect()
}

/// Linked per-objective orderings used by [`decd`].
struct DecdState {
    /// `values[j][i]`: objective `j` of member `i`.
    values: Vec<Vec<f64>>,
    prev: Vec<Vec<Option<usize>>>,
    next: Vec<Vec<Option<usize>>>,
    head: Vec<Option<usize>>,
    tail: Vec<Option<usize>>,
    /// `terms[j][i]`: distance contribution of objective `j` to member `i`.
    terms: Vec<Vec<f64>>,
}

impl DecdState {
    fn new(members: &[Candidate]) -> Self {
        let n = members.len();
        let m = members.first().map_or(0, |c| c.objectives.len());

        let mut state = Self {
            values: (0..m)
                .map(|j| members.iter().map(|c| c.objectives[j]).collect())
                .collect(),
            prev: vec![vec![None; n]; m],
            next: vec![vec![None; n]; m],
            head: vec![None; m],
            tail: vec![None; m],
            terms: vec![vec![0.0; n]; m],
        };

        for j in 0..m {
            let mut order: Vec<usize> = (0..n).collect();
            let column = &state.values[j];
            order.sort_by(|&a, &b| column[a].partial_cmp(&column[b]).unwrap_or(Ordering::Equal));

            for w in order.windows(2) {
                state.next[j][w[0]] = Some(w[1]);
                state.prev[j][w[1]] = Some(w[0]);
            }
            state.head[j] = order.first().copied();
            state.tail[j] = order.last().copied();
            state.renormalize_axis(j);
        }

        state
    }

    fn range(&self, j: usize) -> f64 {
        match (self.head[j], self.tail[j]) {
            (Some(h), Some(t)) => (self.values[j][t] - self.values[j][h]).abs(),
            _ => 0.0,
        }
    }

    fn term(&self, j: usize, i: usize) -> f64 {
        let (Some(p), Some(n)) = (self.prev[j][i], self.next[j][i]) else {
            return f64::INFINITY;
        };
        let range = self.range(j);
        if range == 0.0 || !range.is_finite() {
            return f64::INFINITY;
        }
        (self.values[j][n] - self.values[j][p]).abs() / range
    }

    fn renormalize_axis(&mut self, j: usize) {
        let mut cursor = self.head[j];
        while let Some(i) = cursor {
            self.terms[j][i] = self.term(j, i);
            cursor = self.next[j][i];
        }
    }

    fn remove(&mut self, i: usize) {
        for j in 0..self.values.len() {
            let p = self.prev[j][i];
            let n = self.next[j][i];

            match p {
                Some(p) => self.next[j][p] = n,
                None => self.head[j] = n,
            }
            match n {
                Some(n) => self.prev[j][n] = p,
                None => self.tail[j] = p,
            }
            self.prev[j][i] = None;
            self.next[j][i] = None;

            if p.is_none() || n.is_none() {
                // an extreme left: the axis range changed
                self.renormalize_axis(j);
            } else {
                for k in [p, n].into_iter().flatten() {
                    self.terms[j][k] = self.term(j, k);
                }
            }
        }
    }

    fn infinite_terms(&self, i: usize) -> usize {
        self.terms.iter().filter(|axis| axis[i].is_infinite()).count()
    }

    fn finite_sum(&self, i: usize) -> f64 {
        self.terms
            .iter()
            .map(|axis| axis[i])
            .filter(|t| t.is_finite())
            .sum()
    }

    fn total(&self, i: usize) -> f64 {
        if self.infinite_terms(i) > 0 {
            f64::INFINITY
        } else {
            self.finite_sum(i)
        }
    }

    /// Alive member with the smallest total distance. When none is finite,
    /// the member extreme on the fewest axes goes first.
    fn pick_victim(&self, alive: &[bool]) -> Option<usize> {
        (0..alive.len())
            .filter(|&i| alive[i])
            .map(|i| (self.infinite_terms(i), self.finite_sum(i), i))
            .min_by(|a, b| {
                a.0.cmp(&b.0)
                    .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
                    .then_with(|| a.2.cmp(&b.2))
            })
            .map(|(_, _, i)| i)
    }
}

/// Bounded archive with its hypercube.
#[derive(Debug, Clone)]
pub struct Archive {
    members: Vec<Candidate>,
    grid: Option<Hypercube>,
    config: ArchiveConfig,
}

impl Archive {
    /// Creates an empty archive.
    pub fn new(config: ArchiveConfig) -> Self {
        Self {
            members: Vec::new(),
            grid: None,
            config,
        }
    }

    /// Seeds an archive from an evaluated population.
    pub fn from_population<R: Rng>(
        population: &[Candidate],
        config: ArchiveConfig,
        rng: &mut R,
    ) -> Self {
        let mut archive = Self::new(config);
        archive.update(population, rng);
        archive
    }

    /// Merges the non-dominated part of `incoming`, prunes to capacity and
    /// rebuilds the grid.
    pub fn update<R: Rng>(&mut self, incoming: &[Candidate], rng: &mut R) {
        let mut fresh = incoming.to_vec();
        let fresh = pareto_filter(&mut fresh);

        self.members = merge(&self.members, &fresh);
        self.rebuild_grid();
        self.prune(rng);
    }

    /// Truncates to capacity with the configured policy.
    fn prune<R: Rng>(&mut self, rng: &mut R) {
        let excess = self.members.len().saturating_sub(self.config.capacity);
        if excess == 0 {
            return;
        }

        let members = std::mem::take(&mut self.members);
        self.members = match self.config.truncation {
            Truncation::GridRoulette { gamma } => {
                truncate_grid_roulette(members, excess, gamma, rng)
            }
            Truncation::Decd => decd(members, excess),
        };
        log::trace!("archive pruned by {excess} to {}", self.members.len());
        self.rebuild_grid();
    }

    fn rebuild_grid(&mut self) {
        self.grid = Hypercube::build(&self.members, self.config.divisions, self.config.padding);
        if let Some(grid) = &self.grid {
            grid.assign(&mut self.members);
        }
    }

    /// Draws a leader by grid roulette. `None` only if the archive is empty.
    pub fn select_leader<R: Rng>(&self, rng: &mut R) -> Option<&Candidate> {
        select_leader(&self.members, self.config.leader_pressure, rng).map(|i| &self.members[i])
    }

    /// Draws a leader index, skipping `excluded` member indices.
    pub fn select_leader_excluding<R: Rng>(
        &self,
        excluded: &[usize],
        rng: &mut R,
    ) -> Option<usize> {
        select_leader_excluding(&self.members, excluded, self.config.leader_pressure, rng)
    }

    /// Current members.
    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the archive holds no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Maximum size after pruning.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Hypercube over the current members.
    pub fn grid(&self) -> Option<&Hypercube> {
        self.grid.as_ref()
    }

    /// Archive parameters.
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Consumes the archive, returning its members.
    pub fn into_members(self) -> Vec<Candidate> {
        self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::dominates;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cand(objs: &[f64]) -> Candidate {
        Candidate::from_parts(objs.to_vec(), objs.to_vec())
    }

    /// Points on the front x + y = 10.
    fn front(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| {
                let x = 10.0 * i as f64 / (n - 1) as f64;
                cand(&[x, 10.0 - x])
            })
            .collect()
    }

    fn assert_pareto_set(members: &[Candidate]) {
        for (i, a) in members.iter().enumerate() {
            for (j, b) in members.iter().enumerate() {
                if i != j {
                    assert!(!dominates(&a.objectives, &b.objectives));
                    assert_ne!(a.objectives, b.objectives);
                }
            }
        }
    }

    // ---- merge ----

    #[test]
    fn test_merge_drops_dominated() {
        // archive {A, B} with A dominating B, newcomer C dominated by A
        let a = cand(&[1.0, 1.0]);
        let b = cand(&[2.0, 2.0]);
        let c = cand(&[1.5, 3.0]);
        let merged = merge(&[a.clone(), b], &[c]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].objectives, a.objectives);
    }

    #[test]
    fn test_merge_keeps_existing_on_tie() {
        let mut old = cand(&[1.0, 2.0]);
        old.position = vec![0.0];
        let mut new = cand(&[1.0, 2.0]);
        new.position = vec![1.0];
        let merged = merge(&[old], &[new]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].position, vec![0.0]);
    }

    // ---- DECD ----

    #[test]
    fn test_decd_prunes_to_size() {
        let mut members = front(8);
        for (c, cell) in members.iter_mut().zip([1, 2, 1, 3, 2, 1, 4, 4]) {
            c.grid_cell = cell;
        }
        let originals: Vec<Vec<f64>> = members.iter().map(|c| c.objectives.clone()).collect();

        let kept = decd(members, 2);
        assert_eq!(kept.len(), 6);
        for c in &kept {
            assert!(originals.contains(&c.objectives));
        }
    }

    #[test]
    fn test_decd_removes_most_crowded() {
        // (4.9, 5.1) sits next to (5, 5): tight neighbour gaps on both axes
        let members = vec![
            cand(&[0.0, 10.0]),
            cand(&[2.5, 7.5]),
            cand(&[4.9, 5.1]),
            cand(&[5.0, 5.0]),
            cand(&[7.5, 2.5]),
            cand(&[10.0, 0.0]),
        ];
        let kept = decd(members, 1);
        assert_eq!(kept.len(), 5);
        let removed_one = !kept.iter().any(|c| c.objectives == vec![4.9, 5.1])
            || !kept.iter().any(|c| c.objectives == vec![5.0, 5.0]);
        assert!(removed_one);
    }

    #[test]
    fn test_decd_keeps_extremes() {
        let kept = decd(front(10), 7);
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().any(|c| c.objectives[0] == 0.0));
        assert!(kept.iter().any(|c| c.objectives[0] == 10.0));
    }

    #[test]
    fn test_decd_zero_range_is_infinite_not_nan() {
        let members = vec![cand(&[1.0, 5.0]), cand(&[2.0, 5.0]), cand(&[3.0, 5.0])];
        let kept = decd(members, 1);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|c| !c.crowding_distance.is_nan()));
    }

    #[test]
    fn test_decd_down_to_one() {
        let kept = decd(front(4), 3);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_decd_excess_edge_cases() {
        assert_eq!(decd(front(3), 0).len(), 3);
        assert!(decd(front(3), 3).is_empty());
    }

    #[test]
    fn test_decd_incremental_matches_recomputation() {
        // after removing one interior point, the survivors' distances must
        // equal a fresh computation over the survivors
        let members = vec![
            cand(&[0.0, 10.0]),
            cand(&[1.0, 8.0]),
            cand(&[1.5, 7.6]),
            cand(&[4.0, 4.0]),
            cand(&[6.0, 2.5]),
            cand(&[10.0, 0.0]),
        ];
        let once = decd(members, 1);
        assert_eq!(once.len(), 5);
        let rebuilt = DecdState::new(&once);
        for (i, c) in once.iter().enumerate() {
            let expected = rebuilt.total(i);
            if expected.is_infinite() {
                assert!(c.crowding_distance.is_infinite());
            } else {
                assert!((c.crowding_distance - expected).abs() < 1e-12);
            }
        }
    }

    // ---- grid roulette ----

    #[test]
    fn test_grid_roulette_prunes_crowded_cells() {
        let mut members = front(6);
        for (c, cell) in members.iter_mut().zip([0, 0, 0, 0, 0, 9]) {
            c.grid_cell = cell;
        }
        let mut rng = StdRng::seed_from_u64(11);
        let mut lone_survived = 0;
        for _ in 0..200 {
            let kept = truncate_grid_roulette(members.clone(), 1, 1.0, &mut rng);
            assert_eq!(kept.len(), 5);
            if kept.iter().any(|c| c.grid_cell == 9) {
                lone_survived += 1;
            }
        }
        // removal probability for the lone cell is 1/6
        assert!(lone_survived > 140, "lone member survived {lone_survived}/200");
    }

    #[test]
    fn test_grid_roulette_gamma_zero_treated_as_one() {
        let members = front(5);
        let mut rng = StdRng::seed_from_u64(2);
        let kept = truncate_grid_roulette(members, 2, 0.0, &mut rng);
        assert_eq!(kept.len(), 3);
    }

    // ---- Archive ----

    #[test]
    fn test_archive_update_respects_capacity() {
        let mut rng = StdRng::seed_from_u64(3);
        for truncation in [Truncation::Decd, Truncation::GridRoulette { gamma: 2.0 }] {
            let config = ArchiveConfig::default()
                .with_capacity(5)
                .with_truncation(truncation);
            let archive = Archive::from_population(&front(20), config, &mut rng);
            assert_eq!(archive.len(), 5);
            assert_pareto_set(archive.members());
            assert!(archive.grid().is_some());
        }
    }

    #[test]
    fn test_archive_members_are_copies() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut population = front(4);
        let archive = Archive::from_population(&population, ArchiveConfig::default(), &mut rng);
        population[0].objectives[0] = -100.0;
        assert!(archive.members().iter().all(|c| c.objectives[0] >= 0.0));
    }

    #[test]
    fn test_archive_grid_cells_current() {
        let mut rng = StdRng::seed_from_u64(5);
        let archive = Archive::from_population(
            &front(12),
            ArchiveConfig::default().with_capacity(6).with_divisions(4),
            &mut rng,
        );
        let grid = archive.grid().unwrap();
        for c in archive.members() {
            assert_eq!(grid.locate(&c.objectives).0, c.grid_cell);
        }
    }

    #[test]
    fn test_archive_leader_from_members() {
        let mut rng = StdRng::seed_from_u64(6);
        let archive = Archive::from_population(&front(8), ArchiveConfig::default(), &mut rng);
        let leader = archive.select_leader(&mut rng).unwrap();
        assert!(archive.members().contains(leader));
        assert!(Archive::new(ArchiveConfig::default())
            .select_leader(&mut rng)
            .is_none());
    }

    #[test]
    fn test_config_validate() {
        assert!(ArchiveConfig::default().validate().is_ok());
        assert!(ArchiveConfig::default().with_capacity(0).validate().is_err());
        assert!(ArchiveConfig::default().with_divisions(0).validate().is_err());
        assert!(ArchiveConfig::default()
            .with_truncation(Truncation::GridRoulette { gamma: -1.0 })
            .validate()
            .is_err());
        assert_eq!(ArchiveConfig::default().with_padding(-0.5).padding, 0.0);
    }

    // ---- properties ----

    fn point() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.0f64..100.0, 2)
    }

    proptest! {
        #[test]
        fn prop_archive_invariant_after_cycles(
            batches in prop::collection::vec(prop::collection::vec(point(), 1..15), 1..6),
            capacity in 1usize..8,
            grid_policy in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let truncation = if grid_policy {
                Truncation::GridRoulette { gamma: 2.0 }
            } else {
                Truncation::Decd
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let mut archive = Archive::new(
                ArchiveConfig::default().with_capacity(capacity).with_truncation(truncation),
            );
            for batch in batches {
                let incoming: Vec<Candidate> = batch.iter().map(|p| cand(p)).collect();
                let before = merge(archive.members(), &pareto_filter(&mut incoming.clone())).len();
                archive.update(&incoming, &mut rng);
                prop_assert!(archive.len() <= capacity);
                prop_assert_eq!(archive.len(), before.min(capacity));
                for (i, a) in archive.members().iter().enumerate() {
                    for (j, b) in archive.members().iter().enumerate() {
                        if i != j {
                            prop_assert!(!dominates(&a.objectives, &b.objectives));
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_decd_never_removes_extreme_first(
            xs in prop::collection::btree_set(0u32..1000, 4..20),
            excess_seed in any::<usize>(),
        ) {
            // distinct x on a strictly decreasing front: extremes are unique
            let members: Vec<Candidate> = xs
                .iter()
                .map(|&x| cand(&[x as f64, 1000.0 - x as f64]))
                .collect();
            let n = members.len();
            let excess = excess_seed % (n - 2) + 1;
            let kept = decd(members, excess);
            let min_x = *xs.iter().next().unwrap() as f64;
            let max_x = *xs.iter().next_back().unwrap() as f64;
            prop_assert!(kept.iter().any(|c| c.objectives[0] == min_x));
            prop_assert!(kept.iter().any(|c| c.objectives[0] == max_x));
        }
    }
}
