//! Optimization configuration.
//!
//! Load run configuration from TOML or JSON, or build it in code with the
//! `with_*` setters.
//!
//! # Examples
//!
//! ```
//! use u_workforce::config::{Algorithm, OptimizationConfig};
//! use std::time::Duration;
//!
//! let config = OptimizationConfig::from_toml_str(r#"
//!     algorithm = "simulated_annealing"
//!     max_iterations = 500
//!     time_limit_secs = 5
//!
//!     [weights]
//!     efficiency = 0.5
//!     safety_compliance = 0.5
//! "#).unwrap();
//!
//! assert_eq!(config.algorithm, Algorithm::SimulatedAnnealing);
//! assert_eq!(config.time_limit(), Duration::from_secs(5));
//! assert!((config.weights.skill_utilization - 0.2).abs() < 1e-10);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Priority-driven greedy construction.
    Greedy,
    /// Population-based genetic search.
    Genetic,
    /// Single-state simulated annealing.
    SimulatedAnnealing,
    /// Greedy → annealing → seeded genetic search.
    #[default]
    Hybrid,
}

impl Algorithm {
    /// Name stamped on the optimization result.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::Genetic => "genetic",
            Algorithm::SimulatedAnnealing => "simulated_annealing",
            Algorithm::Hybrid => "hybrid",
        }
    }
}

/// Objective weights. Not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    pub efficiency: f64,
    pub skill_utilization: f64,
    pub satisfaction: f64,
    pub cost_optimization: f64,
    pub safety_compliance: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            efficiency: 0.3,
            skill_utilization: 0.2,
            satisfaction: 0.2,
            cost_optimization: 0.15,
            safety_compliance: 0.15,
        }
    }
}

impl ObjectiveWeights {
    /// Creates a weight set.
    pub fn new(
        efficiency: f64,
        skill_utilization: f64,
        satisfaction: f64,
        cost_optimization: f64,
        safety_compliance: f64,
    ) -> Self {
        Self {
            efficiency,
            skill_utilization,
            satisfaction,
            cost_optimization,
            safety_compliance,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.efficiency
            + self.skill_utilization
            + self.satisfaction
            + self.cost_optimization
            + self.safety_compliance
    }
}

/// Model feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    /// Scale efficiency by `1 - fatigue`.
    pub fatigue_modeling: bool,
    /// Skill decay over idle time (recorded only).
    pub skill_decay: bool,
    /// Bonus for workers with more than 500 practice hours.
    pub learning_curve: bool,
    /// Seasonal demand adjustment (recorded only).
    pub seasonal_adjustment: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            fatigue_modeling: true,
            skill_decay: false,
            learning_curve: true,
            seasonal_adjustment: false,
        }
    }
}

/// Configuration of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OptimizationConfig {
    /// Strategy to run.
    pub algorithm: Algorithm,
    /// Objective weights.
    pub weights: ObjectiveWeights,
    /// Iteration budget (annealing iterations, genetic generations).
    pub max_iterations: usize,
    /// Genetic search stops once top-5 score variance drops below this.
    pub convergence_threshold: f64,
    /// Genetic population size.
    pub population_size: usize,
    /// Probability of mutating a genetic offspring.
    pub mutation_rate: f64,
    /// Wall-clock budget (seconds).
    pub time_limit_secs: u64,
    /// Model feature toggles.
    pub features: FeatureToggles,
    /// Random seed for reproducible runs.
    pub random_seed: Option<u64>,
    /// Evaluate genetic populations in parallel.
    pub parallel: bool,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Hybrid,
            weights: ObjectiveWeights::default(),
            max_iterations: 1000,
            convergence_threshold: 0.001,
            population_size: 50,
            mutation_rate: 0.1,
            time_limit_secs: 30,
            features: FeatureToggles::default(),
            random_seed: None,
            parallel: true,
        }
    }
}

impl OptimizationConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the time limit (seconds).
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Sets the feature toggles.
    pub fn with_features(mut self, features: FeatureToggles) -> Self {
        self.features = features;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Wall-clock budget.
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    /// Checks that search parameters are usable.
    ///
    /// Objective weights are not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("max_iterations must be > 0".into()));
        }
        if self.population_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "population_size must be >= 2, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::Invalid(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "convergence_threshold must be a non-negative number, got {}",
                self.convergence_threshold
            )));
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::Invalid("time_limit_secs must be > 0".into()));
        }
        Ok(())
    }
}
