//! Assignment evaluation.
//!
//! Scores a candidate assignment set on five objectives (efficiency,
//! skill utilization, satisfaction, cost, safety) and combines them with
//! caller-supplied weights.
//!
//! # Submodules
//!
//! - [`matching`]: per (worker, task) skill match, learning-curve bonus and
//!   qualification checks
//! - `objectives`: the [`Evaluator`] and the grid-level [`evaluate`] entry point

pub mod matching;
mod objectives;

pub use objectives::{evaluate, Evaluator, UNIT_COST_PER_LEVEL_HOUR};
