//! NSGA-II configuration.

use crate::engine::EngineConfig;
use crate::error::ConfigError;
use crate::pareto::{ArchiveConfig, Truncation};

/// Pareto ranking used for survivor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankStrategy {
    /// Fast non-dominated sort into explicit fronts.
    #[default]
    Front,

    /// `1 +` number of dominators.
    Counting,
}

/// Configuration for NSGA-II.
///
/// # Defaults
///
/// ```
/// use u_pareto::nsga2::{Nsga2Config, RankStrategy};
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.crossover_rate, 0.7);
/// assert_eq!(config.mutation_rate, 0.4);
/// assert_eq!(config.rank, RankStrategy::Front);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Population, budget, archive and runtime settings.
    pub engine: EngineConfig,

    /// Fraction of `N` produced by blend crossover (rounded to pairs).
    pub crossover_rate: f64,

    /// Fraction of `N` produced by Gaussian mutation.
    pub mutation_rate: f64,

    /// Fraction of genes perturbed per mutant (at least one when positive).
    pub mutation_strength: f64,

    /// Mutation step as a fraction of each coordinate's range.
    pub sigma: f64,

    /// Ranking used for survivor selection.
    pub rank: RankStrategy,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default()
                .with_max_generations(300)
                .with_archive(ArchiveConfig::default().with_truncation(Truncation::Decd)),
            crossover_rate: 0.7,
            mutation_rate: 0.4,
            mutation_strength: 0.01,
            sigma: 0.1,
            rank: RankStrategy::Front,
        }
    }
}

impl Nsga2Config {
    /// Replaces the engine settings.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the population size.
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

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the fraction of genes perturbed per mutant.
    pub fn with_mutation_strength(mut self, mu: f64) -> Self {
        self.mutation_strength = mu.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation step.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Sets the survivor ranking.
    pub fn with_rank(mut self, rank: RankStrategy) -> Self {
        self.rank = rank;
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
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("mutation_strength", self.mutation_strength),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(name, "must lie in [0, 1]"));
            }
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(ConfigError::invalid("sigma", "must be finite and non-negative"));
        }
        self.engine.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        assert!(Nsga2Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_sigma() {
        assert!(Nsga2Config::default().with_sigma(-1.0).validate().is_err());
        assert!(Nsga2Config::default()
            .with_sigma(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rates_clamped() {
        let config = Nsga2Config::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.2);
        assert_eq!(config.crossover_rate, 1.0);
        assert_eq!(config.mutation_rate, 0.0);
    }
}
