//! Multi-Objective Grey Wolf Optimizer (MOGWO).
//!
//! Grey wolf hunting dynamics driven by an external Pareto archive: each
//! wolf follows three leaders drawn from sparse hypercube cells, and the
//! archive is pruned by grid-density roulette.
//!
//! # References
//!
//! - Mirjalili, Mirjalili & Lewis (2014), "Grey Wolf Optimizer"
//! - Mirjalili et al. (2016), "Multi-objective grey wolf optimizer: A novel
//!   algorithm for multi-criterion optimization"

mod config;
mod runner;

pub use config::MogwoConfig;
pub use runner::{select_pack, MogwoOperator, MogwoRunner, NAME};
