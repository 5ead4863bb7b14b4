//! Workforce-to-task assignment optimizer.
//!
//! Assigns workers to tasks across a day's time slots, balancing five
//! weighted objectives: efficiency, skill utilization, worker satisfaction,
//! cost and safety compliance.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Grid`, `TimeSlot`, `WorkerAvailability`,
//!   `Task`, `Assignment`, `Constraint`, `OptimizationResult`
//! - **`config`**: `OptimizationConfig` (TOML/JSON loadable), weights, feature toggles
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling refs, ranges)
//! - **`index`**: Dense index over a grid; the `Placement` triple the searches work on
//! - **`evaluation`**: Skill matching and the five-objective evaluator
//! - **`scheduler`**: Deterministic greedy constructor
//! - **`ga`**: Genetic algorithm on the `u-metaheur` GA traits (elitism, tournament, rayon-parallel fitness)
//! - **`sa`**: Simulated annealing on `u_metaheur::sa` (geometric cooling, Metropolis acceptance)
//! - **`hybrid`**: Greedy → SA → GA pipeline
//! - **`audit`**: Pluggable constraint rules and suggestion sources
//! - **`optimizer`**: The `optimize` facade
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications, methods and models"
//! - Talbi (2009), "Metaheuristics: From Design to Implementation"

pub mod audit;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod hybrid;
pub mod index;
pub mod models;
pub mod optimizer;
pub mod sa;
pub mod scheduler;
pub mod validation;

pub use config::{Algorithm, OptimizationConfig};
pub use error::{ConfigError, OptimizeError};
pub use optimizer::{optimize, Optimizer};
