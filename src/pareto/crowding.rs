//! Crowding distance among rank-mates (NSGA-II).
//!
//! Measures how spread out solutions are in objective space. Higher distance
//! means the solution is more isolated. Boundary solutions of every objective
//! receive `f64::INFINITY`.
//!
//! This is the one-shot, per-front assignment used for survivor selection.
//! Archive pruning uses the incremental variant in
//! [`archive`](super::archive).

use super::candidate::Candidate;
use std::cmp::Ordering;

/// Crowding distance of each objective vector among its rank-mates.
///
/// Per objective the vectors are ordered by value; the two extremes become
/// boundary points (`+∞`) and every interior point gains the gap between
/// its two neighbours divided by the axis span. Axes whose span is zero
/// or not finite add nothing.
///
/// # Complexity
///
/// O(m · n log n)
///
/// # Example
///
/// ```
/// use u_pareto::pareto::crowding_distance;
///
/// let front: [&[f64]; 3] = [&[1.0, 5.0], &[3.0, 3.0], &[5.0, 1.0]];
/// let d = crowding_distance(&front);
/// assert!(d[0].is_infinite() && d[2].is_infinite());
/// assert_eq!(d[1], 2.0);
/// ```
pub fn crowding_distance(front: &[&[f64]]) -> Vec<f64> {
    let n = front.len();
    let mut distance = vec![0.0; n];
    if n <= 2 {
        distance.fill(f64::INFINITY);
        return distance;
    }

    let mut order: Vec<usize> = (0..n).collect();
    for axis in 0..front[0].len() {
        order.sort_by(|&a, &b| front[a][axis].total_cmp(&front[b][axis]));
        let value = |k: usize| front[order[k]][axis];

        let span = value(n - 1) - value(0);
        if span > 0.0 && span.is_finite() {
            for k in 1..n - 1 {
                distance[order[k]] += (value(k + 1) - value(k - 1)) / span;
            }
        }
        distance[order[0]] = f64::INFINITY;
        distance[order[n - 1]] = f64::INFINITY;
    }
    distance
}

/// Writes `crowding_distance` on every member, computed front by front.
///
/// `fronts` holds indices into `set` as returned by
/// [`front_rank`](super::front_rank) or [`counting_rank`](super::counting_rank).
pub fn assign_crowding_distance(set: &mut [Candidate], fronts: &[Vec<usize>]) {
    for front in fronts {
        let rows: Vec<&[f64]> = front.iter().map(|&i| set[i].objectives.as_slice()).collect();
        let distance = crowding_distance(&rows);
        for (&i, d) in front.iter().zip(distance) {
            set[i].crowding_distance = d;
        }
    }
}

/// Orders candidates by rank level ascending, then crowding distance
/// descending. Candidates without a rank sort last.
pub fn crowded_comparison(a: &Candidate, b: &Candidate) -> Ordering {
    let level = |c: &Candidate| c.rank.map_or(usize::MAX, |r| r.level());
    level(a).cmp(&level(b)).then_with(|| {
        b.crowding_distance
            .partial_cmp(&a.crowding_distance)
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::{front_rank, Rank};

    fn distances(rows: &[Vec<f64>]) -> Vec<f64> {
        let view: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
        crowding_distance(&view)
    }

    #[test]
    fn test_crowding_single() {
        let dist = distances(&[vec![1.0, 2.0]]);
        assert_eq!(dist.len(), 1);
        assert!(dist[0].is_infinite());
        assert!(distances(&[]).is_empty());
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let dist = distances(&[
            vec![0.0, 4.0],
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            vec![3.0, 1.0],
            vec![4.0, 0.0],
        ]);
        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        assert!((dist[1] - dist[2]).abs() < 1e-10);
        assert!((dist[2] - dist[3]).abs() < 1e-10);
        // each axis contributes 2/4
        assert!((dist[2] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let dist = distances(&[vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]]);
        assert!(dist[0].is_infinite());
        assert!(dist[2].is_infinite());
        assert!(dist[1].is_finite());
    }

    #[test]
    fn test_crowding_infinite_axis_is_not_nan() {
        let dist = distances(&[
            vec![0.0, f64::INFINITY],
            vec![1.0, 2.0],
            vec![2.0, 1.0],
            vec![3.0, 0.0],
        ]);
        assert!(dist.iter().all(|d| !d.is_nan()));
        assert!((dist[1] - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_assign_per_front() {
        let mut set: Vec<Candidate> = [
            [1.0, 5.0],
            [3.0, 3.0],
            [5.0, 1.0],
            [4.0, 4.0],
            [6.0, 6.0],
        ]
        .iter()
        .map(|o| Candidate::from_parts(vec![], o.to_vec()))
        .collect();

        let fronts = front_rank(&mut set);
        assign_crowding_distance(&mut set, &fronts);

        assert!(set[0].crowding_distance.is_infinite());
        assert!(set[1].crowding_distance.is_finite());
        // singleton fronts are boundary points
        assert!(set[3].crowding_distance.is_infinite());
        assert!(set[4].crowding_distance.is_infinite());
    }

    #[test]
    fn test_crowded_comparison_order() {
        let mut a = Candidate::from_parts(vec![], vec![0.0]);
        let mut b = Candidate::from_parts(vec![], vec![0.0]);
        let mut c = Candidate::from_parts(vec![], vec![0.0]);
        a.rank = Some(Rank::Front(0));
        a.crowding_distance = 0.5;
        b.rank = Some(Rank::Front(0));
        b.crowding_distance = f64::INFINITY;
        c.rank = Some(Rank::Front(1));
        c.crowding_distance = f64::INFINITY;

        let mut v = [c.clone(), a.clone(), b.clone()];
        v.sort_by(crowded_comparison);
        assert_eq!(v[0].crowding_distance, f64::INFINITY);
        assert_eq!(v[0].rank, Some(Rank::Front(0)));
        assert_eq!(v[1].crowding_distance, 0.5);
        assert_eq!(v[2].rank, Some(Rank::Front(1)));
    }
}
