//! Greedy construction.
//!
//! Provides a fast, deterministic, priority-driven constructor. It is not
//! optimal, but yields the baseline the metaheuristics refine.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod greedy;

pub use greedy::GreedyScheduler;
