//! Simulated annealing runs over one evaluator.

use tracing::{trace, warn};

use super::problem::AnnealingProblem;
use super::SaConfig;
use crate::evaluation::Evaluator;
use crate::index::Placement;
use crate::models::ObjectiveScores;

/// Simulated annealing outcome.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// Best state ever visited.
    pub best: Vec<Placement>,
    /// Scores of `best`.
    pub scores: ObjectiveScores,
    /// Iterations performed.
    pub iterations: usize,
    /// Temperature after `iterations` cooling steps.
    pub final_temperature: f64,
    /// Neighbors accepted as the new current state.
    pub accepted: usize,
    /// Stopped on the deadline.
    pub timed_out: bool,
}

/// Runs simulated annealing from an initial placement list.
pub struct SaRunner;

impl SaRunner {
    /// Anneals `initial` and returns the best state found.
    ///
    /// # Algorithm
    /// 1. Neighbor: reassign one random placement to a random active task.
    /// 2. Accept improving neighbors; accept worsening ones with
    ///    probability `exp(Δ / T)` (Metropolis).
    /// 3. Track best-ever on strict improvement.
    /// 4. `T ← T × cooling_rate`; stop when `T` reaches `min_temperature` or
    ///    the iteration budget is spent.
    ///
    /// The loop is `u_metaheur::sa::SaRunner` with geometric cooling and one
    /// iteration per temperature step; the deadline reaches it through the
    /// cancel flag. An empty state, or a grid without active tasks, still
    /// cools but never changes. A zero budget or settings the loop rejects
    /// return `initial` untouched.
    pub fn run(evaluator: &Evaluator<'_, '_>, initial: Vec<Placement>, config: &SaConfig) -> SaResult {
        let settings = config.annealing_settings();
        if config.max_iterations == 0 {
            return Self::unchanged(evaluator, initial, config);
        }
        if let Err(reason) = settings.validate() {
            warn!(%reason, "annealing settings rejected, keeping the initial state");
            return Self::unchanged(evaluator, initial, config);
        }

        let problem = AnnealingProblem::new(evaluator, initial).with_deadline(config.deadline);
        let cancel = problem.cancel_flag();
        let result = u_metaheur::sa::SaRunner::run_with_cancel(&problem, &settings, Some(cancel));

        if result.cancelled {
            warn!(iterations = result.iterations, "SA deadline reached");
        }
        let final_temperature = config.temperature_at(result.iterations);
        trace!(
            iterations = result.iterations,
            accepted = result.accepted_moves,
            improving = result.improving_moves,
            temperature = final_temperature,
            best = -result.best_cost,
            "SA finished"
        );

        let scores = evaluator.score(&result.best);
        SaResult {
            best: result.best,
            scores,
            iterations: result.iterations,
            final_temperature,
            accepted: result.accepted_moves,
            timed_out: result.cancelled,
        }
    }

    fn unchanged(
        evaluator: &Evaluator<'_, '_>,
        initial: Vec<Placement>,
        config: &SaConfig,
    ) -> SaResult {
        let scores = evaluator.score(&initial);
        SaResult {
            best: initial,
            scores,
            iterations: 0,
            final_temperature: config.initial_temperature,
            accepted: 0,
            timed_out: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeatureToggles, ObjectiveWeights};
    use crate::index::ProblemIndex;
    use crate::models::{Grid, SkillRequirement, Task, TimeSlot, WorkerAvailability, WorkerSkill};
    use chrono::{NaiveDate, NaiveTime};
    use std::time::{Duration, Instant};

    fn sample_grid() -> Grid {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        Grid::new(date, "d")
            .with_time_slots(TimeSlot::sequence(
                "S",
                date,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                30,
                3,
            ))
            .with_worker(WorkerAvailability::new("E1").with_skill(WorkerSkill::new("weld", 5, 1.0)))
            .with_worker(WorkerAvailability::new("E2").with_skill(WorkerSkill::new("paint", 4, 0.9)))
            .with_task(Task::new("T1").with_skill(SkillRequirement::new("weld", 3, 1.0)))
            .with_task(Task::new("T2").with_skill(SkillRequirement::new("paint", 2, 1.0)))
    }

    // deliberately mismatched start
    fn crossed() -> Vec<Placement> {
        (0..3)
            .flat_map(|s| [Placement::new(s, 0, 1), Placement::new(s, 1, 0)])
            .collect()
    }

    #[test]
    fn test_temperature_follows_geometric_schedule() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let config = SaConfig::default().with_max_iterations(50).with_seed(Some(42));

        let result = SaRunner::run(&evaluator, crossed(), &config);
        assert_eq!(result.iterations, 50);
        let expected = 100.0 * 0.995_f64.powi(50);
        assert!((result.final_temperature - expected).abs() < 1e-9);
    }

    #[test]
    fn test_stops_below_min_temperature() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let config = SaConfig::default().with_max_iterations(10_000).with_seed(Some(42));

        let result = SaRunner::run(&evaluator, crossed(), &config);
        assert_eq!(result.iterations, 1838);
        assert!(result.final_temperature < 0.01);
        assert!((result.final_temperature - config.temperature_at(1838)).abs() < 1e-9);
    }

    #[test]
    fn test_best_never_regresses() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let initial = crossed();
        let initial_score = evaluator.overall(&initial);

        let config = SaConfig::default().with_max_iterations(500).with_seed(Some(7));
        let result = SaRunner::run(&evaluator, initial, &config);
        assert!(result.scores.overall >= initial_score);
        assert!((result.scores.overall - evaluator.overall(&result.best)).abs() < 1e-10);
    }

    #[test]
    fn test_improves_mismatched_start() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let initial = crossed();
        let initial_score = evaluator.overall(&initial);

        let config = SaConfig::default().with_max_iterations(2000).with_seed(Some(42));
        let result = SaRunner::run(&evaluator, initial, &config);
        assert!(result.scores.overall > initial_score);
        assert!(result.accepted > 0);
    }

    #[test]
    fn test_neighbors_stay_in_catalog() {
        let grid = sample_grid().with_task(Task::new("T3").with_active(false));
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());

        let config = SaConfig::default().with_max_iterations(300).with_seed(Some(42));
        let result = SaRunner::run(&evaluator, crossed(), &config);
        assert_eq!(result.best.len(), 6);
        assert!(result.best.iter().all(|p| p.task < 2 && p.slot < 3));
    }

    #[test]
    fn test_empty_state_only_cools() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let config = SaConfig::default().with_max_iterations(20).with_seed(Some(42));

        let result = SaRunner::run(&evaluator, Vec::new(), &config);
        assert!(result.best.is_empty());
        assert_eq!(result.iterations, 20);
        assert!((result.final_temperature - config.temperature_at(20)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_budget_keeps_initial() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let config = SaConfig::default().with_max_iterations(0).with_seed(Some(42));

        let result = SaRunner::run(&evaluator, crossed(), &config);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, crossed());
        assert!((result.final_temperature - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejected_settings_keep_initial() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let config = SaConfig::default().with_cooling_rate(1.5).with_seed(Some(42));

        let result = SaRunner::run(&evaluator, crossed(), &config);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, crossed());
        assert!(!result.timed_out);
    }

    #[test]
    fn test_expired_deadline_returns_initial() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let past = Instant::now() - Duration::from_millis(1);
        let config = SaConfig::default().with_deadline(Some(past)).with_seed(Some(42));

        let result = SaRunner::run(&evaluator, crossed(), &config);
        assert!(result.timed_out);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, crossed());
    }
}
