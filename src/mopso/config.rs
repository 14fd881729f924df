//! MOPSO configuration.

use crate::engine::EngineConfig;
use crate::error::ConfigError;
use crate::pareto::{ArchiveConfig, Truncation};

/// Configuration for multi-objective particle swarm optimization.
///
/// # Defaults
///
/// ```
/// use u_pareto::mopso::MopsoConfig;
///
/// let config = MopsoConfig::default();
/// assert_eq!(config.inertia, 0.4);
/// assert_eq!(config.cognitive, 2.0);
/// assert_eq!(config.social, 2.0);
/// assert_eq!(config.engine.archive.divisions, 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MopsoConfig {
    /// Population, budget, archive and runtime settings.
    pub engine: EngineConfig,

    /// Inertia weight `w`.
    pub inertia: f64,

    /// Personal-best acceleration `c1`.
    pub cognitive: f64,

    /// Leader acceleration `c2`.
    pub social: f64,

    /// Velocity limit as a percentage of each coordinate's range.
    pub max_velocity: f64,

    /// Fraction of the second swarm third re-sampled each generation.
    pub mutation_rate: f64,
}

impl Default for MopsoConfig {
    fn default() -> Self {
        let archive = ArchiveConfig::default()
            .with_divisions(20)
            .with_padding(0.0)
            .with_leader_pressure(1.0)
            .with_truncation(Truncation::Decd);
        Self {
            engine: EngineConfig::default()
                .with_max_generations(300)
                .with_archive(archive),
            inertia: 0.4,
            cognitive: 2.0,
            social: 2.0,
            max_velocity: 5.0,
            mutation_rate: 0.5,
        }
    }
}

impl MopsoConfig {
    /// Replaces the engine settings.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the swarm size.
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

    /// Sets the archive truncation policy.
    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.engine.archive.truncation = truncation;
        self
    }

    /// Sets `w`, `c1` and `c2`.
    pub fn with_coefficients(mut self, inertia: f64, cognitive: f64, social: f64) -> Self {
        self.inertia = inertia;
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    /// Sets the velocity limit (percent of range).
    pub fn with_max_velocity(mut self, percent: f64) -> Self {
        self.max_velocity = percent;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.engine.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(name, "must be finite and non-negative"));
            }
        }
        if !self.max_velocity.is_finite() || self.max_velocity <= 0.0 {
            return Err(ConfigError::invalid("max_velocity", "must be finite and positive"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::invalid("mutation_rate", "must lie in [0, 1]"));
        }
        self.engine.validate()
    }
}
