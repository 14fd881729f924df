//! Generic archive-based iteration loop.
//!
//! The engine owns everything the algorithm families share: uniform
//! initialization, bound clipping, concurrent evaluation, the archive,
//! progress reporting, cancellation and seeding. A family plugs in as a
//! [`SearchOperator`]; a problem plugs in as an [`Evaluator`].
//!
//! # Key Types
//!
//! - [`Engine`]: Executes the loop
//! - [`EngineConfig`]: Population, budget, archive, parallelism, seed
//! - [`ParetoResult`]: Final archive with run statistics
//! - [`ProgressObserver`]: Per-generation and completion notifications

mod config;
mod pool;
mod progress;
mod runner;
mod types;

pub use config::EngineConfig;
pub use progress::{
    ChannelProgress, Completion, NoProgress, ProgressEvent, ProgressMessage, ProgressObserver,
    RecordingProgress,
};
pub use runner::{validate_problem, Engine, ParetoResult, MIN_OBJECTIVES};
pub use types::{Bounds, Evaluator, GenerationContext, SearchOperator};
