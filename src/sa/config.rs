//! Simulated annealing configuration.

use std::time::Instant;

use u_metaheur::sa::CoolingSchedule;

/// Starting temperature.
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 100.0;
/// Geometric cooling factor applied every iteration.
pub const DEFAULT_COOLING_RATE: f64 = 0.995;
/// Temperature below which the search stops.
pub const DEFAULT_MIN_TEMPERATURE: f64 = 0.01;

/// Simulated annealing parameters.
///
/// Cooling is geometric: `T(k) = T0 × rate^k`.
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Initial temperature T0.
    pub initial_temperature: f64,
    /// Multiplicative cooling rate, in (0, 1).
    pub cooling_rate: f64,
    /// Stop once the temperature falls below this value.
    pub min_temperature: f64,
    /// Iteration budget.
    pub max_iterations: usize,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Wall-clock cut-off.
    pub deadline: Option<Instant>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            cooling_rate: DEFAULT_COOLING_RATE,
            min_temperature: DEFAULT_MIN_TEMPERATURE,
            max_iterations: 1000,
            seed: None,
            deadline: None,
        }
    }
}

impl SaConfig {
    /// Sets the initial temperature.
    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Sets the geometric cooling factor.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the stopping temperature.
    pub fn with_min_temperature(mut self, temperature: f64) -> Self {
        self.min_temperature = temperature;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the wall-clock cut-off.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Temperature after `iterations` cooling steps.
    pub fn temperature_at(&self, iterations: usize) -> f64 {
        self.initial_temperature * self.cooling_rate.powf(iterations as f64)
    }

    /// Settings for the `u-metaheur` annealing loop: geometric cooling with
    /// one iteration per temperature step.
    pub fn annealing_settings(&self) -> u_metaheur::sa::SaConfig {
        let mut settings = u_metaheur::sa::SaConfig::default()
            .with_initial_temperature(self.initial_temperature)
            .with_min_temperature(self.min_temperature)
            .with_cooling(CoolingSchedule::Geometric {
                alpha: self.cooling_rate,
            })
            .with_iterations_per_temperature(1)
            .with_max_iterations(self.max_iterations);
        settings.seed = self.seed;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SaConfig::default();
        assert!((c.initial_temperature - 100.0).abs() < 1e-10);
        assert!((c.cooling_rate - 0.995).abs() < 1e-10);
        assert!((c.min_temperature - 0.01).abs() < 1e-10);
    }

    #[test]
    fn test_temperature_at() {
        let c = SaConfig::default();
        assert!((c.temperature_at(0) - 100.0).abs() < 1e-10);
        assert!((c.temperature_at(1) - 99.5).abs() < 1e-10);
        assert!(c.temperature_at(1838) < 0.01);
        assert!(c.temperature_at(1837) >= 0.01);
    }

    #[test]
    fn test_temperature_at_large_counts() {
        let c = SaConfig::default();
        let huge = i32::MAX as usize + 10;
        assert_eq!(c.temperature_at(huge), 0.0);
        assert!(c.temperature_at(huge) <= c.temperature_at(1838));
    }

    #[test]
    fn test_annealing_settings() {
        let c = SaConfig::default().with_max_iterations(250).with_seed(Some(9));
        let settings = c.annealing_settings();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.iterations_per_temperature, 1);
        assert_eq!(settings.max_iterations, 250);
        assert_eq!(settings.seed, Some(9));
        assert!(matches!(
            settings.cooling,
            CoolingSchedule::Geometric { alpha } if (alpha - 0.995).abs() < 1e-10
        ));
    }
}
