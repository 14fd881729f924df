//! Multi-Objective Particle Swarm Optimization (MOPSO).
//!
//! Particles fly toward their personal best and an archive leader drawn
//! from sparse hypercube cells. Part of the swarm is re-sampled every
//! generation, at a rate that decays over the run.
//!
//! # References
//!
//! - Coello Coello, Pulido & Lechuga (2004), "Handling Multiple Objectives
//!   With Particle Swarm Optimization"

mod config;
mod runner;

pub use config::MopsoConfig;
pub use runner::{thirds, MopsoOperator, MopsoRunner, NAME};
