//! Genetic algorithm over placement lists.
//!
//! A generational GA with elitism, tournament selection, midpoint crossover
//! and task-swap mutation, built on the `u-metaheur` GA traits. Fitness is
//! the negated overall score (minimized). Fitness evaluation within a
//! generation runs on rayon's pool when enabled; breeding happens only after
//! every evaluation completes.
//!
//! # Submodules
//!
//! - `chromosome`: encoding and operators
//! - `problem`: [`u_metaheur::ga::GaProblem`] implementation
//! - `runner`: configuration and the generation loop
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection, and the Effects of Noise"

mod chromosome;
mod problem;
mod runner;

pub use chromosome::{midpoint_crossover, task_swap_mutation, AssignmentChromosome};
pub use problem::AssignmentProblem;
pub use runner::{GaConfig, GaResult, GaRunner, CONVERGENCE_CHECK_AFTER, CONVERGENCE_SAMPLE};
