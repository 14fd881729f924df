//! Evaluated points in search space.

use std::collections::BTreeMap;

/// Output of one call to an evaluator.
///
/// `objectives` is the only field the engine reads. Constraint penalties are
/// expected to be folded into `objectives` already; the named maps travel
/// with the candidate for reporting only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Objective vector, minimization convention.
    pub objectives: Vec<f64>,

    /// Objective values keyed by name.
    pub named_objectives: BTreeMap<String, f64>,

    /// Order in which the named objectives map onto `objectives`.
    pub objective_order: Vec<String>,

    /// Constraint penalties keyed by constraint name.
    pub penalties: BTreeMap<String, f64>,
}

impl Evaluation {
    /// An evaluation carrying only an objective vector.
    pub fn from_objectives(objectives: Vec<f64>) -> Self {
        Self {
            objectives,
            ..Self::default()
        }
    }
}

/// Pareto rank, tagged with the strategy that produced it.
///
/// The two strategies stratify a population differently and are consumed
/// by different algorithm families, so a rank from one is never compared
/// against a rank from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    /// `1 +` the number of candidates that dominate this one.
    Counting(usize),

    /// Index of the non-dominated front (0 = Pareto front).
    Front(usize),
}

impl Rank {
    /// The raw rank level, whatever the strategy.
    pub fn level(self) -> usize {
        match self {
            Rank::Counting(n) | Rank::Front(n) => n,
        }
    }
}

/// One evaluated point in search space.
///
/// A candidate is an owned value: copying it into the archive is an
/// explicit `clone()`, so mutating the population in a later generation
/// never reaches archive state.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Decision vector, length = problem dimension.
    pub position: Vec<f64>,

    /// Objective vector, length = objective count.
    pub objectives: Vec<f64>,

    /// Reporting-only objective values keyed by name.
    pub named_objectives: BTreeMap<String, f64>,

    /// Reporting-only objective key order.
    pub objective_order: Vec<String>,

    /// Reporting-only constraint penalties.
    pub penalties: BTreeMap<String, f64>,

    /// Set by [`determine_domination`](super::determine_domination).
    pub dominated: bool,

    /// Number of candidates dominating this one (front ranking).
    pub domination_count: usize,

    /// Indices of candidates this one dominates (front ranking).
    pub domination_set: Vec<usize>,

    /// Last rank assigned, if any.
    pub rank: Option<Rank>,

    /// Crowding distance among rank-mates.
    pub crowding_distance: f64,

    /// Flattened hypercube cell id.
    pub grid_cell: usize,

    /// Per-objective bucket in the hypercube.
    pub grid_sub_index: Vec<usize>,
}

impl Candidate {
    /// Builds a candidate from a position and its evaluation.
    pub fn new(position: Vec<f64>, evaluation: Evaluation) -> Self {
        Self {
            position,
            objectives: evaluation.objectives,
            named_objectives: evaluation.named_objectives,
            objective_order: evaluation.objective_order,
            penalties: evaluation.penalties,
            dominated: false,
            domination_count: 0,
            domination_set: Vec::new(),
            rank: None,
            crowding_distance: 0.0,
            grid_cell: 0,
            grid_sub_index: Vec::new(),
        }
    }

    /// Builds a candidate from raw vectors. Mostly useful in tests.
    pub fn from_parts(position: Vec<f64>, objectives: Vec<f64>) -> Self {
        Self::new(position, Evaluation::from_objectives(objectives))
    }

    /// Number of objectives.
    pub fn objective_count(&self) -> usize {
        self.objectives.len()
    }

    /// Whether this candidate Pareto-dominates `other`.
    pub fn dominates(&self, other: &Candidate) -> bool {
        super::dominates(&self.objectives, &other.objectives)
    }

    /// Clears all bookkeeping written by the dominance engine, grid and
    /// crowding passes.
    pub fn reset_bookkeeping(&mut self) {
        self.dominated = false;
        self.domination_count = 0;
        self.domination_set.clear();
        self.rank = None;
        self.crowding_distance = 0.0;
        self.grid_cell = 0;
        self.grid_sub_index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_moves_evaluation_fields() {
        let mut eval = Evaluation::from_objectives(vec![1.0, 2.0]);
        eval.named_objectives.insert("cost".into(), 1.0);
        eval.penalties.insert("overlap".into(), 0.0);
        eval.objective_order = vec!["cost".into(), "risk".into()];

        let c = Candidate::new(vec![0.5], eval);
        assert_eq!(c.objectives, vec![1.0, 2.0]);
        assert_eq!(c.named_objectives["cost"], 1.0);
        assert_eq!(c.objective_order.len(), 2);
        assert!(!c.dominated);
        assert!(c.rank.is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Candidate::from_parts(vec![1.0, 2.0], vec![3.0, 4.0]);
        let mut copy = original.clone();
        copy.position[0] = 99.0;
        copy.objectives[1] = -1.0;
        assert_eq!(original.position, vec![1.0, 2.0]);
        assert_eq!(original.objectives, vec![3.0, 4.0]);
    }

    #[test]
    fn test_rank_level() {
        assert_eq!(Rank::Counting(3).level(), 3);
        assert_eq!(Rank::Front(0).level(), 0);
        assert_ne!(Rank::Counting(1), Rank::Front(1));
    }

    #[test]
    fn test_reset_bookkeeping() {
        let mut c = Candidate::from_parts(vec![0.0], vec![1.0, 1.0]);
        c.dominated = true;
        c.domination_count = 2;
        c.domination_set = vec![1, 2];
        c.rank = Some(Rank::Front(1));
        c.grid_cell = 7;
        c.grid_sub_index = vec![1, 3];
        c.reset_bookkeeping();
        assert!(!c.dominated);
        assert_eq!(c.domination_count, 0);
        assert!(c.domination_set.is_empty());
        assert!(c.rank.is_none());
        assert_eq!(c.grid_cell, 0);
    }
}
