//! Domain-agnostic multi-objective metaheuristics with a shared Pareto
//! archive.
//!
//! Every family minimizes a vector of objectives over a box-bounded
//! continuous search space and returns a bounded set of mutually
//! non-dominated candidates:
//!
//! - **MOGWO**: Multi-Objective Grey Wolf Optimizer. Wolves move toward
//!   three archive leaders drawn from sparse hypercube cells.
//! - **MOPSO**: Multi-Objective Particle Swarm Optimization with personal
//!   bests, archive leaders and decaying swarm mutation.
//! - **NSGA-II**: elitist real-coded GA with rank and crowding survival.
//! - **oMOAHA**: opposition-based multi-objective artificial hummingbird
//!   algorithm with a visit table and guided/territorial foraging.
//!
//! # Architecture
//!
//! - [`pareto`]: candidates, dominance, ranking, crowding, the adaptive
//!   hypercube and the bounded [`pareto::Archive`] with its two truncation
//!   policies (grid roulette and DECD).
//! - [`engine`]: the [`engine::Evaluator`] and [`engine::SearchOperator`]
//!   contracts and the generic [`engine::Engine`] loop that owns
//!   evaluation, clipping, archive maintenance, progress and cancellation.
//! - One module per family, each a `SearchOperator` plus a config and a
//!   runner.
//!
//! The crate has no domain-specific concepts: objectives, constraints
//! (folded into objectives as penalties) and decoding are supplied by the
//! caller's `Evaluator`.

pub mod engine;
pub mod error;
pub mod moaha;
pub mod mogwo;
pub mod mopso;
pub mod nsga2;
pub mod pareto;

#[cfg(test)]
pub(crate) mod testing {
    use crate::engine::Evaluator;
    use crate::pareto::Evaluation;

    /// ZDT1 benchmark on `[0, 1]^dim`. The Pareto front is
    /// `f2 = 1 − sqrt(f1)` at `x2..xn = 0`.
    pub struct Zdt1 {
        lower: Vec<f64>,
        upper: Vec<f64>,
    }

    impl Zdt1 {
        pub fn new(dim: usize) -> Self {
            Self {
                lower: vec![0.0; dim],
                upper: vec![1.0; dim],
            }
        }
    }

    impl Evaluator for Zdt1 {
        type Report = Vec<f64>;

        fn dimension(&self) -> usize {
            self.lower.len()
        }

        fn lower_bound(&self) -> &[f64] {
            &self.lower
        }

        fn upper_bound(&self) -> &[f64] {
            &self.upper
        }

        fn number_of_objectives(&self) -> usize {
            2
        }

        fn evaluate(&self, x: &[f64]) -> Evaluation {
            let f1 = x[0];
            let tail = (x.len() - 1).max(1) as f64;
            let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / tail;
            let f2 = g * (1.0 - (f1 / g).sqrt());
            Evaluation::from_objectives(vec![f1, f2])
        }

        fn decode_for_reporting(&self, x: &[f64]) -> Vec<f64> {
            x.to_vec()
        }
    }
}
