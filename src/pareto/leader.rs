//! Roulette-wheel leader selection over hypercube cells.
//!
//! Sparse cells have higher [`quality`] and are drawn more often, which
//! steers the search toward unexplored regions of the Pareto front.

use super::candidate::Candidate;
use super::grid::{cell_groups, quality};
use rand::Rng;

/// Selects a leader from `members` using their assigned grid cells.
///
/// Returns the index of the chosen member, or `None` if `members` is empty.
pub fn select_leader<R: Rng>(members: &[Candidate], pressure: f64, rng: &mut R) -> Option<usize> {
    select_leader_excluding(members, &[], pressure, rng)
}

/// Like [`select_leader`], skipping the member indices in `excluded`.
///
/// Used by algorithms that need several distinct guides per move.
/// Returns `None` when every member is excluded.
///
/// # Algorithm
///
/// 1. Group eligible members by grid cell
/// 2. Draw a cell by roulette wheel weighted by `quality(count, pressure)`
/// 3. Pick one member of that cell uniformly
///
/// If no cell can be drawn the pick falls back to a uniform draw over all
/// eligible members.
pub fn select_leader_excluding<R: Rng>(
    members: &[Candidate],
    excluded: &[usize],
    pressure: f64,
    rng: &mut R,
) -> Option<usize> {
    let eligible: Vec<usize> = (0..members.len())
        .filter(|i| !excluded.contains(i))
        .collect();
    if eligible.is_empty() {
        return None;
    }

    let cells: Vec<Vec<usize>> = cell_groups(members, eligible.iter().copied())
        .into_iter()
        .map(|(_, group)| group)
        .collect();
    let weights: Vec<f64> = cells.iter().map(|c| quality(c.len(), pressure)).collect();

    let chosen = roulette_wheel(&weights, rng).and_then(|cell| cells.get(cell));
    match chosen {
        Some(cell_members) if !cell_members.is_empty() => {
            Some(cell_members[rng.random_range(0..cell_members.len())])
        }
        _ => {
            log::warn!(
                "leader selection found no usable cell among {} members; picking uniformly",
                eligible.len()
            );
            Some(eligible[rng.random_range(0..eligible.len())])
        }
    }
}

/// Roulette wheel over non-negative weights.
///
/// Draws `r` uniformly in `[0, total)` and returns the first index whose
/// cumulative weight exceeds `r`. Returns `None` if the weights are empty
/// or their total is not a positive finite number.
pub(crate) fn roulette_wheel<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || !total.is_finite() || total <= 0.0 {
        return None;
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return Some(i);
        }
    }

    Some(weights.len() - 1) // floating-point fallback
}
