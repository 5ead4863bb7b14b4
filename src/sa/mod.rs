//! Simulated Annealing (SA).
//!
//! A single-solution trajectory search over placement lists. Accepts
//! worsening moves with a probability that decreases as the temperature
//! cools, allowing the search to escape local optima. The annealing loop
//! is `u_metaheur::sa::SaRunner`; this module supplies the problem and the
//! settings.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod problem;
mod runner;

pub use config::{
    SaConfig, DEFAULT_COOLING_RATE, DEFAULT_INITIAL_TEMPERATURE, DEFAULT_MIN_TEMPERATURE,
};
pub use problem::AnnealingProblem;
pub use runner::{SaResult, SaRunner};
