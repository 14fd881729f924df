//! Hypercube discretization of objective space.
//!
//! Each objective axis is cut into `G` buckets. The outer buckets are
//! open-ended (`-∞` and `+∞` boundaries) so every real value maps inside;
//! the `G − 1` inner boundaries are evenly spaced across the padded
//! min/max of the archive. Cells are identified by flattening the
//! per-axis bucket indices row-major (last objective varies fastest).
//!
//! The grid has no identity across generations: it is rebuilt every time
//! the archive changes.
//!
//! # References
//!
//! - Coello Coello et al. (2004), "Handling Multiple Objectives With
//!   Particle Swarm Optimization"
//! - Mirjalili et al. (2016), "Multi-objective grey wolf optimizer"

use super::candidate::Candidate;
use std::collections::BTreeMap;

/// Numerator of the cell quality `QUALITY_SCALE / count^β`.
pub const QUALITY_SCALE: f64 = 10.0;

/// Objective-space grid built over an archive.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypercube {
    /// `boundaries[j]` holds the `G + 1` boundaries of objective `j`.
    boundaries: Vec<Vec<f64>>,
    divisions: usize,
}

impl Hypercube {
    /// Builds the grid over the objective vectors of `members`.
    ///
    /// Returns `None` for an empty member set, where no range exists.
    ///
    /// # Panics
    ///
    /// Panics if `divisions` is zero.
    pub fn build(members: &[Candidate], divisions: usize, padding: f64) -> Option<Self> {
        let m = members.first()?.objectives.len();
        let columns: Vec<Vec<f64>> = (0..m)
            .map(|j| members.iter().map(|c| c.objectives[j]).collect())
            .collect();
        Some(Self::from_columns(&columns, divisions, padding))
    }

    /// Builds the grid from per-objective value columns.
    ///
    /// `columns[j]` holds the values of objective `j` across the archive.
    /// Each axis spans `[min − padding·range, max + padding·range]` over
    /// the finite values. Infinite and NaN values fall into the outer
    /// buckets; an axis with no finite value is centred on zero.
    ///
    /// # Example
    ///
    /// ```
    /// use u_pareto::pareto::Hypercube;
    ///
    /// let grid = Hypercube::from_columns(&[vec![10.0, 15.0, 12.0, 20.0, 8.0]], 4, 0.1);
    /// let b = grid.boundaries(0);
    /// assert!(b[0].is_infinite() && b[4].is_infinite());
    /// assert!((b[1] - 6.8).abs() < 1e-9);
    /// assert!((b[3] - 21.2).abs() < 1e-9);
    /// ```
    pub fn from_columns(columns: &[Vec<f64>], divisions: usize, padding: f64) -> Self {
        assert!(divisions > 0, "hypercube needs at least one division");

        let boundaries = columns
            .iter()
            .map(|values| {
                let (min, max) = finite_range(values);
                let pad = match (max - min) * padding {
                    p if p.is_finite() => p,
                    _ => 0.0,
                };

                let mut axis = Vec::with_capacity(divisions + 1);
                axis.push(f64::NEG_INFINITY);
                axis.extend(linspace(min - pad, max + pad, divisions - 1));
                axis.push(f64::INFINITY);
                axis
            })
            .collect();

        Self {
            boundaries,
            divisions,
        }
    }

    /// Number of buckets per objective (`G`).
    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// Number of objectives the grid spans.
    pub fn objective_count(&self) -> usize {
        self.boundaries.len()
    }

    /// The `G + 1` boundaries of one objective axis.
    pub fn boundaries(&self, objective: usize) -> &[f64] {
        &self.boundaries[objective]
    }

    /// Maps an objective vector to `(cell id, per-objective sub-index)`.
    ///
    /// On each axis the sub-index is one less than the position of the
    /// first boundary `≥ value`, always within `[0, G − 1]`.
    pub fn locate(&self, objectives: &[f64]) -> (usize, Vec<usize>) {
        debug_assert_eq!(objectives.len(), self.boundaries.len());

        let last = self.divisions - 1;
        let sub_index: Vec<usize> = self
            .boundaries
            .iter()
            .zip(objectives)
            .map(|(axis, &value)| {
                axis.iter()
                    .skip(1)
                    .position(|&b| b >= value)
                    .unwrap_or(last) // NaN
                    .min(last)
            })
            .collect();

        (cell_id(&sub_index, self.divisions), sub_index)
    }

    /// Writes `grid_cell` and `grid_sub_index` on every member.
    pub fn assign(&self, members: &mut [Candidate]) {
        for c in members.iter_mut() {
            let (cell, sub_index) = self.locate(&c.objectives);
            c.grid_cell = cell;
            c.grid_sub_index = sub_index;
        }
    }
}

/// Flattens per-axis bucket indices into one cell id (row-major).
pub fn cell_id(sub_index: &[usize], divisions: usize) -> usize {
    sub_index
        .iter()
        .fold(0usize, |acc, &s| acc.wrapping_mul(divisions).wrapping_add(s))
}

/// Total number of cells for `objectives` axes, or `None` on overflow.
pub fn cell_capacity(divisions: usize, objectives: usize) -> Option<usize> {
    let exp = u32::try_from(objectives).ok()?;
    divisions.checked_pow(exp)
}

/// Occupied cells of `members` with their member counts, by ascending id.
pub fn occupied_cells(members: &[Candidate]) -> Vec<(usize, usize)> {
    cell_groups(members, 0..members.len())
        .into_iter()
        .map(|(cell, group)| (cell, group.len()))
        .collect()
}

/// Groups the member indices in `subset` by grid cell, by ascending id.
///
/// Indices keep their iteration order inside each group.
pub(crate) fn cell_groups(
    members: &[Candidate],
    subset: impl IntoIterator<Item = usize>,
) -> Vec<(usize, Vec<usize>)> {
    let mut cells: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in subset {
        cells.entry(members[i].grid_cell).or_default().push(i);
    }
    cells.into_iter().collect()
}

/// Attractiveness of a cell with `count` members: `10 / count^β`.
///
/// A `pressure` of zero is treated as one.
pub fn quality(count: usize, pressure: f64) -> f64 {
    let beta = if pressure == 0.0 { 1.0 } else { pressure };
    QUALITY_SCALE / (count as f64).powf(beta)
}

/// Min and max over the finite entries of `values`, `(0, 0)` if none.
fn finite_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

/// `num` evenly spaced points from `start` to `stop` inclusive.
///
/// A single point sits at the midpoint. Interpolates rather than stepping
/// so a span wider than `f64::MAX` stays finite.
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start / 2.0 + stop / 2.0],
        _ => (0..num)
            .map(|i| {
                let t = i as f64 / (num - 1) as f64;
                start * (1.0 - t) + stop * t
            })
            .collect(),
    }
}
