//! Non-dominated Sorting Genetic Algorithm II (NSGA-II).
//!
//! Elitist real-coded GA: blend crossover and Gaussian mutation produce
//! offspring, and the next population is the best `N` of parents ∪
//! offspring under rank-then-crowding order. Ranking is either the fast
//! non-dominated sort or counting rank, see [`RankStrategy`].
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: rates, mutation step and ranking strategy
//! - [`Nsga2Operator`]: variation and survivor selection
//! - [`Nsga2Runner`]: executes the algorithm
//!
//! # References
//!
//! - Deb, Pratap, Agarwal & Meyarivan (2002), "A Fast and Elitist
//!   Multiobjective Genetic Algorithm: NSGA-II"

mod config;
mod runner;

pub use config::{Nsga2Config, RankStrategy};
pub use runner::{blend_crossover, gaussian_mutation, survivors, Nsga2Operator, Nsga2Runner, NAME};
