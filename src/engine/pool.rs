//! Concurrent evaluation of positions.

use super::types::Evaluator;
use crate::error::ConfigError;
use crate::pareto::Candidate;
use rayon::prelude::*;
use rayon::ThreadPool;

/// How positions are evaluated.
pub(crate) enum EvaluationPool {
    Sequential,
    /// Rayon's global pool.
    Global,
    /// A dedicated pool with a fixed number of workers.
    Bounded(ThreadPool),
}

impl EvaluationPool {
    pub(crate) fn new(parallel: bool, workers: Option<usize>) -> Result<Self, ConfigError> {
        if !parallel {
            return Ok(Self::Sequential);
        }
        match workers {
            None => Ok(Self::Global),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                Ok(Self::Bounded(pool))
            }
        }
    }

    /// Evaluates every position, preserving order.
    ///
    /// Each task writes only its own output slot.
    pub(crate) fn evaluate<E: Evaluator>(
        &self,
        evaluator: &E,
        positions: Vec<Vec<f64>>,
    ) -> Vec<Candidate> {
        let eval = |position: Vec<f64>| {
            let evaluation = evaluator.evaluate(&position);
            Candidate::new(position, evaluation)
        };

        match self {
            Self::Sequential => positions.into_iter().map(eval).collect(),
            Self::Global => positions.into_par_iter().map(eval).collect(),
            Self::Bounded(pool) => pool.install(|| positions.into_par_iter().map(eval).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::Evaluation;

    struct Square;

    impl Evaluator for Square {
        type Report = ();
        fn dimension(&self) -> usize {
            1
        }
        fn lower_bound(&self) -> &[f64] {
            &[-1.0]
        }
        fn upper_bound(&self) -> &[f64] {
            &[1.0]
        }
        fn number_of_objectives(&self) -> usize {
            2
        }
        fn evaluate(&self, x: &[f64]) -> Evaluation {
            Evaluation::from_objectives(vec![x[0] * x[0], (x[0] - 1.0).powi(2)])
        }
        fn decode_for_reporting(&self, _x: &[f64]) {}
    }

    #[test]
    fn test_all_modes_agree() {
        let positions: Vec<Vec<f64>> = (0..50).map(|i| vec![i as f64 / 50.0]).collect();
        let sequential = EvaluationPool::new(false, None)
            .unwrap()
            .evaluate(&Square, positions.clone());
        let global = EvaluationPool::new(true, None)
            .unwrap()
            .evaluate(&Square, positions.clone());
        let bounded = EvaluationPool::new(true, Some(2))
            .unwrap()
            .evaluate(&Square, positions.clone());

        assert_eq!(sequential, global);
        assert_eq!(sequential, bounded);
        for (c, p) in sequential.iter().zip(&positions) {
            assert_eq!(&c.position, p);
        }
    }
}
