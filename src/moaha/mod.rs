//! Opposition-based Multi-Objective Artificial Hummingbird Algorithm
//! (oMOAHA).
//!
//! The flock starts from the best `N` of a uniform sample together with its
//! opposite, quasi-opposite and quasi-reflected points. Birds then forage
//! along diagonal, omnidirectional or axial flights, either toward the
//! flock mate they have left unvisited the longest or around a territory.
//! The worst stratum migrates to fresh uniform positions every
//! `migration_factor · N` generations.
//!
//! # Key Types
//!
//! - [`MoahaConfig`]: engine settings and migration period
//! - [`MoahaOperator`]: foraging, acceptance and visit table
//! - [`MoahaRunner`]: executes the algorithm
//!
//! # References
//!
//! - Zhao, Wang & Mirjalili (2022), "Artificial hummingbird algorithm: A new
//!   bio-inspired optimizer with its engineering applications"
//! - Zhao et al. (2022), "An effective multi-objective artificial
//!   hummingbird algorithm with dynamic elimination-based crowding distance
//!   for solving engineering design problems"
//! - Tizhoosh (2005), "Opposition-Based Learning: A New Scheme for Machine
//!   Intelligence"

mod config;
mod runner;

pub use config::MoahaConfig;
pub use runner::{
    guided_target, opposite, quasi_opposite, quasi_reflected, Flight, MoahaOperator, MoahaRunner,
    NAME,
};
