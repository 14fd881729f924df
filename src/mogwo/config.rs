//! MOGWO configuration.

use crate::engine::EngineConfig;
use crate::error::ConfigError;
use crate::pareto::{ArchiveConfig, Truncation};

/// Configuration for the multi-objective grey wolf optimizer.
///
/// # Defaults
///
/// ```
/// use u_pareto::mogwo::MogwoConfig;
/// use u_pareto::pareto::Truncation;
///
/// let config = MogwoConfig::default();
/// assert_eq!(config.a_param, 2.0);
/// assert_eq!(config.engine.archive.leader_pressure, 4.0);
/// assert_eq!(config.engine.archive.truncation, Truncation::GridRoulette { gamma: 2.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MogwoConfig {
    /// Population, budget, archive and runtime settings.
    pub engine: EngineConfig,

    /// Initial value of the control parameter `a`, decreased linearly to 0.
    pub a_param: f64,
}

impl Default for MogwoConfig {
    fn default() -> Self {
        let archive = ArchiveConfig::default()
            .with_divisions(10)
            .with_padding(0.1)
            .with_leader_pressure(4.0)
            .with_truncation(Truncation::GridRoulette { gamma: 2.0 });
        Self {
            engine: EngineConfig::default()
                .with_max_generations(300)
                .with_archive(archive),
            a_param: 2.0,
        }
    }
}

impl MogwoConfig {
    /// Replaces the engine settings.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the number of wolves.
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

    /// Sets the initial `a`.
    pub fn with_a_param(mut self, a: f64) -> Self {
        self.a_param = a;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.engine.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.a_param.is_finite() || self.a_param <= 0.0 {
            return Err(ConfigError::invalid("a_param", "must be finite and positive"));
        }
        self.engine.validate()
    }
}
