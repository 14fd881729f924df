//! oMOAHA configuration.

use crate::engine::EngineConfig;
use crate::error::ConfigError;
use crate::pareto::{ArchiveConfig, Truncation};

/// Configuration for the opposition-based multi-objective artificial
/// hummingbird algorithm.
///
/// # Defaults
///
/// ```
/// use u_pareto::moaha::MoahaConfig;
/// use u_pareto::pareto::Truncation;
///
/// let config = MoahaConfig::default();
/// assert_eq!(config.engine.population_size, 100);
/// assert_eq!(config.engine.max_generations, 300);
/// assert_eq!(config.migration_factor, 2);
/// assert_eq!(config.engine.archive.truncation, Truncation::Decd);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoahaConfig {
    /// Population, budget, archive and runtime settings.
    pub engine: EngineConfig,

    /// The worst stratum migrates every `migration_factor · N` generations,
    /// starting at generation 0.
    pub migration_factor: usize,
}

impl Default for MoahaConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default()
                .with_max_generations(300)
                .with_archive(ArchiveConfig::default().with_truncation(Truncation::Decd)),
            migration_factor: 2,
        }
    }
}

impl MoahaConfig {
    /// Replaces the engine settings.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the number of hummingbirds.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.engine.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.engine.max_generations = n;
        self
    }

    /// Sets the archive capacity.
    pub fn with_archive_capacity(mut self, capacity: usize) -> Self {
        self.engine.archive.capacity = capacity;
        self
    }

    /// Sets the migration period multiplier.
    pub fn with_migration_factor(mut self, factor: usize) -> Self {
        self.migration_factor = factor;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.engine.seed = Some(seed);
        self
    }

    /// Generations between two migrations.
    pub fn migration_interval(&self) -> usize {
        self.migration_factor
            .saturating_mul(self.engine.population_size)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.migration_factor == 0 {
            return Err(ConfigError::invalid("migration_factor", "must be at least 1"));
        }
        self.engine.validate()
    }
}
