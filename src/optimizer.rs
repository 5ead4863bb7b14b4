//! Optimizer facade.
//!
//! Validates the input, runs the configured strategy, writes the resulting
//! assignments back into the grid and attaches an [`OptimizationResult`]
//! (scores, audit output and run metadata).
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use u_workforce::config::{Algorithm, OptimizationConfig};
//! use u_workforce::models::{Grid, SkillRequirement, Task, TimeSlot, WorkerAvailability, WorkerSkill};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//! let grid = Grid::new(date, "assembly")
//!     .with_time_slots(TimeSlot::sequence("S", date, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30, 4))
//!     .with_worker(WorkerAvailability::new("E1").with_skill(WorkerSkill::new("weld", 4, 0.9)))
//!     .with_worker(WorkerAvailability::new("E2").with_skill(WorkerSkill::new("paint", 3, 0.8)))
//!     .with_task(Task::new("T1").with_skill(SkillRequirement::new("weld", 2, 1.0)))
//!     .with_task(Task::new("T2").with_skill(SkillRequirement::new("paint", 2, 1.0)));
//!
//! let config = OptimizationConfig::default()
//!     .with_algorithm(Algorithm::Greedy)
//!     .with_seed(7);
//! let optimized = u_workforce::optimize(grid, &config).unwrap();
//!
//! let result = optimized.optimization_result.as_ref().unwrap();
//! assert_eq!(result.algorithm, "greedy");
//! assert_eq!(optimized.assignments.len(), 8);
//! ```

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::audit::{ConstraintChecker, SuggestionGenerator};
use crate::config::{Algorithm, OptimizationConfig};
use crate::error::OptimizeError;
use crate::evaluation::Evaluator;
use crate::ga::{GaConfig, GaRunner};
use crate::hybrid::{run_hybrid, HybridConfig};
use crate::index::{Placement, ProblemIndex};
use crate::models::{Grid, ObjectiveScores, OptimizationResult, SearchProgress};
use crate::sa::{SaConfig, SaRunner};
use crate::scheduler::GreedyScheduler;
use crate::validation::{find_double_bookings, validate_grid};

/// Strategy output before it is written back into the grid.
struct SearchOutcome {
    placements: Vec<Placement>,
    iterations: usize,
    generations: usize,
    timed_out: bool,
}

/// Runs optimizations with a fixed audit setup.
///
/// Install custom constraint rules or suggestion sources here; the free
/// function [`optimize`] uses the built-in ones.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    checker: ConstraintChecker,
    suggestions: SuggestionGenerator,
}

impl Optimizer {
    /// Creates an optimizer with the built-in audit rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the constraint checker.
    pub fn with_checker(mut self, checker: ConstraintChecker) -> Self {
        self.checker = checker;
        self
    }

    /// Sets the suggestion generator.
    pub fn with_suggestions(mut self, suggestions: SuggestionGenerator) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Optimizes a grid.
    ///
    /// # Errors
    /// - [`OptimizeError::InvalidConfig`] if the configuration is unusable
    /// - [`OptimizeError::InvalidInput`] with every problem found in the grid
    ///
    /// Hitting the time limit is not an error; the result's
    /// [`SearchProgress`] records it.
    pub fn optimize(&self, mut grid: Grid, config: &OptimizationConfig) -> Result<Grid, OptimizeError> {
        config.validate()?;
        validate_grid(&grid)?;

        for (worker, slot, count) in find_double_bookings(&grid) {
            warn!(%worker, %slot, count, "worker double-booked in input");
        }

        let started = Instant::now();
        // a limit too large to represent as an instant means no limit
        let deadline = started.checked_add(config.time_limit());
        info!(
            algorithm = config.algorithm.name(),
            slots = grid.time_slots.len(),
            workers = grid.workers.len(),
            tasks = grid.tasks.len(),
            "optimization started"
        );
        if config.features.skill_decay || config.features.seasonal_adjustment {
            debug!(
                skill_decay = config.features.skill_decay,
                seasonal_adjustment = config.features.seasonal_adjustment,
                "feature flags recorded without scoring effect"
            );
        }

        let (assignments, scores, outcome) = {
            let index = ProblemIndex::new(&grid, config.features);
            let evaluator = Evaluator::new(&index, config.weights);
            let outcome = run_strategy(&evaluator, config, deadline);
            let scores = evaluator.score(&outcome.placements);
            (index.to_assignments(&outcome.placements), scores, outcome)
        };
        grid.assignments = assignments;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        if outcome.timed_out {
            warn!(elapsed_ms, "time limit reached, returning best solution found");
        }

        let violations = self.checker.check(&grid);
        let suggestions = self.suggestions.generate(&grid);
        info!(
            algorithm = config.algorithm.name(),
            overall = scores.overall,
            assignments = grid.assignments.len(),
            violations = violations.len(),
            elapsed_ms,
            "optimization finished"
        );

        grid.optimization_result = Some(OptimizationResult {
            scores,
            violations,
            suggestions,
            timestamp: Utc::now(),
            algorithm: config.algorithm.name().to_string(),
            parameters: config.clone(),
            progress: SearchProgress {
                iterations: outcome.iterations,
                generations: outcome.generations,
                elapsed_ms,
                timed_out: outcome.timed_out,
            },
        });
        Ok(grid)
    }
}

/// Optimizes a grid with the built-in audit rules.
///
/// See [`Optimizer::optimize`].
pub fn optimize(grid: Grid, config: &OptimizationConfig) -> Result<Grid, OptimizeError> {
    Optimizer::new().optimize(grid, config)
}

/// Re-scores a grid's current assignments under a configuration.
pub fn score_grid(grid: &Grid, config: &OptimizationConfig) -> ObjectiveScores {
    crate::evaluation::evaluate(grid, config.weights, config.features)
}

fn run_strategy(
    evaluator: &Evaluator<'_, '_>,
    config: &OptimizationConfig,
    deadline: Option<Instant>,
) -> SearchOutcome {
    match config.algorithm {
        Algorithm::Greedy => SearchOutcome {
            placements: GreedyScheduler::new().schedule(evaluator.index()),
            iterations: 0,
            generations: 0,
            timed_out: false,
        },
        Algorithm::SimulatedAnnealing => {
            let initial = GreedyScheduler::new().schedule(evaluator.index());
            let sa = SaConfig::default()
                .with_max_iterations(config.max_iterations)
                .with_seed(config.random_seed)
                .with_deadline(deadline);
            let result = SaRunner::run(evaluator, initial, &sa);
            SearchOutcome {
                placements: result.best,
                iterations: result.iterations,
                generations: 0,
                timed_out: result.timed_out,
            }
        }
        Algorithm::Genetic => {
            let ga = GaConfig::default()
                .with_population_size(config.population_size)
                .with_max_generations(config.max_iterations)
                .with_mutation_rate(config.mutation_rate)
                .with_convergence_threshold(config.convergence_threshold)
                .with_seed(config.random_seed)
                .with_parallel(config.parallel)
                .with_deadline(deadline);
            let result = GaRunner::run(evaluator, &ga, Vec::new());
            SearchOutcome {
                placements: result.best,
                iterations: 0,
                generations: result.generations,
                timed_out: result.timed_out,
            }
        }
        Algorithm::Hybrid => {
            let hybrid = HybridConfig {
                max_iterations: config.max_iterations,
                population_size: config.population_size,
                mutation_rate: config.mutation_rate,
                convergence_threshold: config.convergence_threshold,
                seed: config.random_seed,
                parallel: config.parallel,
                deadline,
            };
            let report = run_hybrid(evaluator, &hybrid);
            SearchOutcome {
                placements: report.placements,
                iterations: report.sa_iterations,
                generations: report.ga_generations,
                timed_out: report.timed_out,
            }
        }
    }
}
