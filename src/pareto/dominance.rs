//! Pareto dominance bookkeeping.
//!
//! All objectives are **minimized**. Two ranking strategies live here and
//! are kept apart on purpose:
//!
//! - [`counting_rank`]: rank = number of dominators + 1, one O(m·n²) pass.
//! - [`front_rank`]: fast non-dominated sort producing explicit fronts
//!   (Deb et al., 2002).
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use super::candidate::{Candidate, Rank};

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other (includes equal vectors).
    Neither,
}

/// Compares two objective vectors for Pareto dominance in one pass.
pub fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(a.len(), b.len(), "objective vectors must have equal length");

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Whether `a` Pareto-dominates `b`.
///
/// True iff `a` is no worse than `b` in every objective and strictly better
/// in at least one. Equal vectors dominate neither.
///
/// ```
/// use u_pareto::pareto::dominates;
///
/// assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
/// assert!(!dominates(&[1.0, 2.0], &[1.0, 2.0]));
/// assert!(!dominates(&[1.0, 4.0], &[2.0, 3.0]));
/// ```
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Marks every strictly dominated member of `set`.
///
/// O(m·n²). Equal objective vectors are mutually non-dominating, so the
/// result does not depend on the order members are scanned in.
pub fn determine_domination(set: &mut [Candidate]) {
    for c in set.iter_mut() {
        c.dominated = false;
    }

    let n = set.len();
    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&set[i].objectives, &set[j].objectives) {
                Dominance::Left => set[j].dominated = true,
                Dominance::Right => set[i].dominated = true,
                Dominance::Neither => {}
            }
        }
    }
}

/// Returns clones of all members with `dominated == false`.
///
/// Exact duplicates of an objective vector are kept once: the first one
/// seen wins. Applying this to its own output is a no-op.
pub fn non_dominated(set: &[Candidate]) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::new();
    for c in set.iter().filter(|c| !c.dominated) {
        if out.iter().any(|kept| kept.objectives == c.objectives) {
            continue;
        }
        out.push(c.clone());
    }
    out
}

/// [`determine_domination`] followed by [`non_dominated`].
pub fn pareto_filter(set: &mut [Candidate]) -> Vec<Candidate> {
    determine_domination(set);
    non_dominated(set)
}

/// Counting rank: `rank = 1 + number of dominators`.
///
/// Returns indices grouped by rank level in ascending order; empty levels
/// are skipped, so `strata[0]` always holds the non-dominated members.
///
/// # Example
///
/// ```
/// use u_pareto::pareto::{counting_rank, Candidate, Rank};
///
/// let mut set = vec![
///     Candidate::from_parts(vec![], vec![1.0, 1.0]),
///     Candidate::from_parts(vec![], vec![2.0, 2.0]),
///     Candidate::from_parts(vec![], vec![3.0, 3.0]),
/// ];
/// let strata = counting_rank(&mut set);
/// assert_eq!(set[2].rank, Some(Rank::Counting(3)));
/// assert_eq!(strata, vec![vec![0], vec![1], vec![2]]);
/// ```
pub fn counting_rank(set: &mut [Candidate]) -> Vec<Vec<usize>> {
    let n = set.len();
    let mut dominators = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&set[i].objectives, &set[j].objectives) {
                Dominance::Left => dominators[j] += 1,
                Dominance::Right => dominators[i] += 1,
                Dominance::Neither => {}
            }
        }
    }

    let max_level = dominators.iter().copied().max().unwrap_or(0);
    let mut levels: Vec<Vec<usize>> = vec![Vec::new(); max_level + 1];
    for (i, c) in set.iter_mut().enumerate() {
        c.rank = Some(Rank::Counting(dominators[i] + 1));
        levels[dominators[i]].push(i);
    }

    levels.retain(|level| !level.is_empty());
    levels
}

/// Fast non-dominated sort.
///
/// Fills each member's `domination_set` and `domination_count`, then peels
/// fronts: front 0 is fully non-dominated, front k+1 holds the members that
/// become non-dominated once fronts 0..=k are removed. `domination_count` is
/// decremented as fronts peel off and ends at zero for every member.
///
/// # Complexity
///
/// O(m·n²) where m = number of objectives, n = number of candidates
///
/// # Example
///
/// ```
/// use u_pareto::pareto::{front_rank, Candidate, Rank};
///
/// let mut set = vec![
///     Candidate::from_parts(vec![], vec![1.0, 5.0]),
///     Candidate::from_parts(vec![], vec![3.0, 3.0]),
///     Candidate::from_parts(vec![], vec![5.0, 1.0]),
///     Candidate::from_parts(vec![], vec![4.0, 4.0]), // dominated by [1]
/// ];
/// let fronts = front_rank(&mut set);
/// assert_eq!(fronts, vec![vec![0, 1, 2], vec![3]]);
/// assert_eq!(set[3].rank, Some(Rank::Front(1)));
/// ```
pub fn front_rank(set: &mut [Candidate]) -> Vec<Vec<usize>> {
    let n = set.len();
    if n == 0 {
        return Vec::new();
    }

    for c in set.iter_mut() {
        c.domination_set.clear();
        c.domination_count = 0;
    }

    let mut front_0 = Vec::new();

    // Compute dominance relationships
    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&set[i].objectives, &set[j].objectives) {
                Dominance::Left => {
                    set[i].domination_set.push(j);
                    set[j].domination_count += 1;
                }
                Dominance::Right => {
                    set[j].domination_set.push(i);
                    set[i].domination_count += 1;
                }
                Dominance::Neither => {}
            }
        }

        if set[i].domination_count == 0 {
            set[i].rank = Some(Rank::Front(0));
            front_0.push(i);
        }
    }

    // Build subsequent fronts
    let mut fronts = vec![front_0];
    loop {
        let level = fronts.len();
        let mut next_front = Vec::new();

        if let Some(current) = fronts.last() {
            for &i in current {
                let dominated = std::mem::take(&mut set[i].domination_set);
                for &j in &dominated {
                    set[j].domination_count -= 1;
                    if set[j].domination_count == 0 {
                        set[j].rank = Some(Rank::Front(level));
                        next_front.push(j);
                    }
                }
                set[i].domination_set = dominated;
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    fronts
}
