//! Shared run configuration.
//!
//! [`EngineConfig`] holds the parameters every algorithm family needs:
//! population size, generation budget, archive settings, parallelism and
//! seeding. Family configs embed it.

use crate::error::ConfigError;
use crate::pareto::ArchiveConfig;

/// Configuration of the generic iteration loop.
///
/// # Defaults
///
/// ```
/// use u_pareto::engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.archive.capacity, 100);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Number of agents (`N`).
    pub population_size: usize,

    /// Number of generations (`T`).
    pub max_generations: usize,

    /// Archive capacity, grid and truncation settings.
    pub archive: ArchiveConfig,

    /// Whether to evaluate positions concurrently.
    pub parallel: bool,

    /// Worker threads for evaluation.
    ///
    /// `None` uses rayon's global pool. Ignored when `parallel` is false.
    pub workers: Option<usize>,

    /// Random seed for reproducibility. `None` draws one from entropy.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked between
    /// generations.
    pub time_limit_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 100,
            archive: ArchiveConfig::default(),
            parallel: true,
            workers: None,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Replaces the archive settings.
    pub fn with_archive(mut self, archive: ArchiveConfig) -> Self {
        self.archive = archive;
        self
    }

    /// Sets the archive capacity.
    pub fn with_archive_capacity(mut self, capacity: usize) -> Self {
        self.archive.capacity = capacity;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Bounds the evaluation pool to `n` worker threads.
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::invalid("population_size", "must be at least 2"));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::invalid("workers", "must be at least 1"));
        }
        self.archive.validate()
    }
}
