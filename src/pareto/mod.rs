//! Pareto archive core.
//!
//! Shared machinery every archive-based multi-objective algorithm in this
//! crate is built on. All objectives are minimized.
//!
//! # Key Types
//!
//! - [`Candidate`]: An evaluated point with its dominance, rank, crowding
//!   and grid bookkeeping
//! - [`Hypercube`]: Objective-space grid rebuilt from the archive
//! - [`Archive`]: Bounded non-dominated set with pluggable [`Truncation`]
//!
//! # Operations
//!
//! - Dominance: [`dominates`], [`determine_domination`], [`non_dominated`],
//!   [`counting_rank`], [`front_rank`]
//! - Diversity: [`crowding_distance`], [`decd`], [`quality`]
//! - Guidance: [`select_leader`], [`select_leader_excluding`]
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Coello Coello et al. (2004), "Handling Multiple Objectives With Particle Swarm Optimization"
//! - Kukkonen & Deb (2006), "Improved Pruning of Non-Dominated Solutions Based on Crowding Distance"

mod archive;
mod candidate;
mod crowding;
mod dominance;
mod grid;
mod leader;

pub use archive::{decd, merge, truncate_grid_roulette, Archive, ArchiveConfig, Truncation};
pub use candidate::{Candidate, Evaluation, Rank};
pub use crowding::{assign_crowding_distance, crowded_comparison, crowding_distance};
pub use dominance::{
    counting_rank, determine_domination, dominance_cmp, dominates, front_rank, non_dominated,
    pareto_filter, Dominance,
};
pub use grid::{cell_capacity, cell_id, occupied_cells, quality, Hypercube, QUALITY_SCALE};
pub use leader::{select_leader, select_leader_excluding};
