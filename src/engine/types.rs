//! Contracts between the generic iteration loop, the problem and the
//! algorithm family.
//!
//! - [`Evaluator`]: the problem. Maps a decision vector to objectives.
//! - [`SearchOperator`]: the algorithm family. Proposes new positions from
//!   the population and the archive, and picks the next population.

use crate::error::ConfigError;
use crate::pareto::{Archive, Candidate, Evaluation};
use rand::Rng;

/// Defines a multi-objective minimization problem.
///
/// # Thread Safety
///
/// `Evaluator` must be `Send + Sync`: positions are evaluated concurrently
/// on a worker pool and every call receives only its own position.
///
/// # Implementing
///
/// ```ignore
/// struct Schaffer;
///
/// impl Evaluator for Schaffer {
///     type Report = f64;
///     fn dimension(&self) -> usize { 1 }
///     fn lower_bound(&self) -> &[f64] { &[-10.0] }
///     fn upper_bound(&self) -> &[f64] { &[10.0] }
///     fn number_of_objectives(&self) -> usize { 2 }
///     fn evaluate(&self, x: &[f64]) -> Evaluation {
///         Evaluation::from_objectives(vec![x[0] * x[0], (x[0] - 2.0).powi(2)])
///     }
///     fn decode_for_reporting(&self, x: &[f64]) -> f64 { x[0] }
/// }
/// ```
pub trait Evaluator: Send + Sync {
    /// Domain view of a position, produced only for reporting.
    type Report;

    /// Number of decision variables.
    fn dimension(&self) -> usize;

    /// Per-coordinate lower bounds, length = [`dimension`](Self::dimension).
    fn lower_bound(&self) -> &[f64];

    /// Per-coordinate upper bounds, length = [`dimension`](Self::dimension).
    fn upper_bound(&self) -> &[f64];

    /// Length of every objective vector returned by [`evaluate`](Self::evaluate).
    fn number_of_objectives(&self) -> usize;

    /// Whether objectives are minimized. Only `true` is supported.
    fn minimizes(&self) -> bool {
        true
    }

    /// Evaluates one position. Assumed total and deterministic.
    fn evaluate(&self, position: &[f64]) -> Evaluation;

    /// Decodes a position into its domain representation.
    fn decode_for_reporting(&self, position: &[f64]) -> Self::Report;
}

/// Validated box constraints of the search space.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Checks lengths and ordering of the bound vectors.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, ConfigError> {
        if lower.is_empty() || lower.len() != upper.len() {
            return Err(ConfigError::BoundsMismatch {
                dimension: lower.len().max(upper.len()),
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        for (index, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(ConfigError::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Reads and validates the bounds an evaluator declares.
    pub fn from_evaluator<E: Evaluator>(evaluator: &E) -> Result<Self, ConfigError> {
        let dimension = evaluator.dimension();
        let lower = evaluator.lower_bound();
        let upper = evaluator.upper_bound();
        if dimension == 0 || lower.len() != dimension || upper.len() != dimension {
            return Err(ConfigError::BoundsMismatch {
                dimension,
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        Self::new(lower.to_vec(), upper.to_vec())
    }

    /// Number of coordinates.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Width of coordinate `i`.
    pub fn range(&self, i: usize) -> f64 {
        self.upper[i] - self.lower[i]
    }

    /// Centre of the box.
    pub fn midpoint(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| (lo + hi) / 2.0)
            .collect()
    }

    /// Clamps every coordinate into its bound.
    pub fn clip(&self, position: &mut [f64]) {
        for ((x, &lo), &hi) in position.iter_mut().zip(&self.lower).zip(&self.upper) {
            *x = if x.is_nan() { lo } else { x.clamp(lo, hi) };
        }
    }

    /// Whether coordinate `i` of `value` lies outside its bound.
    pub fn violates(&self, i: usize, value: f64) -> bool {
        value < self.lower[i] || value > self.upper[i]
    }

    /// Uniform sample inside the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| lo + rng.random::<f64>() * (hi - lo))
            .collect()
    }
}

/// Read-only view of the run handed to the operator each generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    /// Zero-based generation index.
    pub generation: usize,

    /// Total generation budget.
    pub max_generations: usize,

    /// Search-space box.
    pub bounds: &'a Bounds,
}

impl GenerationContext<'_> {
    /// `generation / max_generations`, in `[0, 1)`.
    pub fn fraction(&self) -> f64 {
        if self.max_generations == 0 {
            return 1.0;
        }
        self.generation as f64 / self.max_generations as f64
    }
}

/// Family-specific move and selection logic.
///
/// The engine owns evaluation, clipping and the archive; the operator only
/// ever sees evaluated candidates and returns raw positions. Positions it
/// returns are clipped to the bounds before evaluation.
pub trait SearchOperator {
    /// Algorithm name used in logs and progress events.
    fn name(&self) -> &'static str;

    /// Extra positions evaluated alongside the initial uniform sample.
    ///
    /// The default adds nothing.
    fn initial_extension<R: Rng>(
        &mut self,
        _population: &[Candidate],
        _bounds: &Bounds,
        _rng: &mut R,
    ) -> Vec<Vec<f64>> {
        Vec::new()
    }

    /// Reduces the evaluated initial set (sample plus extension) to the
    /// starting population and sets up per-agent state.
    ///
    /// The default keeps the population unchanged.
    fn initialize<R: Rng>(
        &mut self,
        population: Vec<Candidate>,
        _bounds: &Bounds,
        _rng: &mut R,
    ) -> Vec<Candidate> {
        population
    }

    /// Proposes the positions to evaluate this generation.
    fn propose<R: Rng>(
        &mut self,
        ctx: &GenerationContext<'_>,
        population: &[Candidate],
        archive: &Archive,
        rng: &mut R,
    ) -> Vec<Vec<f64>>;

    /// Builds the next population from the current one and the evaluated
    /// proposals, in proposal order.
    ///
    /// The default replaces the population with the offspring.
    fn select<R: Rng>(
        &mut self,
        _ctx: &GenerationContext<'_>,
        _population: Vec<Candidate>,
        offspring: &[Candidate],
        _rng: &mut R,
    ) -> Vec<Candidate> {
        offspring.to_vec()
    }

    /// Whether [`select`](Self::select) always returns every offspring.
    ///
    /// When `true` the engine feeds the archive from the new population
    /// alone; otherwise the offspring are merged as well.
    fn population_holds_offspring(&self) -> bool {
        false
    }
}
