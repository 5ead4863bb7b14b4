//! Annealing problem over placement lists.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::prelude::IndexedRandom;
use rand::Rng;
use u_metaheur::sa::SaProblem;

use crate::evaluation::Evaluator;
use crate::index::Placement;

/// Workforce assignment as an SA problem.
///
/// The start state is fixed (usually the greedy baseline); cost is the
/// negated overall score. A neighbor reassigns one random placement to a
/// random active task. When a deadline is set, generating a neighbor past
/// it raises the cancel flag the annealing loop polls.
pub struct AnnealingProblem<'e, 'i, 'g> {
    evaluator: &'e Evaluator<'i, 'g>,
    initial: Vec<Placement>,
    deadline: Option<Instant>,
    cancel: Arc<AtomicBool>,
}

impl<'e, 'i, 'g> AnnealingProblem<'e, 'i, 'g> {
    /// Creates a problem starting from `initial`.
    pub fn new(evaluator: &'e Evaluator<'i, 'g>, initial: Vec<Placement>) -> Self {
        Self {
            evaluator,
            initial,
            deadline: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the wall-clock cut-off. A deadline already in the past raises
    /// the cancel flag immediately.
    pub fn with_deadline(self, deadline: Option<Instant>) -> Self {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            self.cancel.store(true, Ordering::Relaxed);
        }
        Self { deadline, ..self }
    }

    /// Flag raised once the deadline passes.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// The start state.
    pub fn initial(&self) -> &[Placement] {
        &self.initial
    }
}

impl SaProblem for AnnealingProblem<'_, '_, '_> {
    type Solution = Vec<Placement>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<Placement> {
        self.initial.clone()
    }

    fn cost(&self, solution: &Vec<Placement>) -> f64 {
        -self.evaluator.overall(solution)
    }

    fn neighbor<R: Rng>(&self, solution: &Vec<Placement>, rng: &mut R) -> Vec<Placement> {
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.cancel.store(true, Ordering::Relaxed);
        }

        let mut next = solution.clone();
        if !next.is_empty() {
            if let Some(&task) = self.evaluator.index().active_tasks().choose(rng) {
                let i = rng.random_range(0..next.len());
                next[i].task = task;
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeatureToggles, ObjectiveWeights};
    use crate::index::ProblemIndex;
    use crate::models::{Grid, Task, TimeSlot, WorkerAvailability};
    use chrono::{NaiveDate, NaiveTime};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn sample_grid() -> Grid {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        Grid::new(date, "d")
            .with_time_slots(TimeSlot::sequence(
                "S",
                date,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                30,
                2,
            ))
            .with_worker(WorkerAvailability::new("E1"))
            .with_task(Task::new("T1"))
            .with_task(Task::new("T2").with_active(false))
            .with_task(Task::new("T3"))
    }

    #[test]
    fn test_neighbor_changes_at_most_one_task() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let start = vec![Placement::new(0, 0, 0), Placement::new(1, 0, 0)];
        let problem = AnnealingProblem::new(&evaluator, start.clone());
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..50 {
            let next = problem.neighbor(&start, &mut rng);
            let changed = next.iter().zip(&start).filter(|(a, b)| a != b).count();
            assert!(changed <= 1);
            assert!(next.iter().all(|p| p.task != 1));
            assert_eq!(next.iter().map(|p| p.slot).collect::<Vec<_>>(), vec![0, 1]);
        }
        assert!(!problem.cancel_flag().load(Ordering::Relaxed));
    }

    #[test]
    fn test_cost_is_negated_overall() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let start = vec![Placement::new(0, 0, 0)];
        let problem = AnnealingProblem::new(&evaluator, start.clone());

        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(problem.initial_solution(&mut rng), start);
        assert!((problem.cost(&start) + evaluator.overall(&start)).abs() < 1e-10);
    }

    #[test]
    fn test_past_deadline_raises_cancel() {
        let grid = sample_grid();
        let index = ProblemIndex::new(&grid, FeatureToggles::default());
        let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
        let past = Instant::now() - Duration::from_millis(1);

        let problem = AnnealingProblem::new(&evaluator, Vec::new()).with_deadline(Some(past));
        assert!(problem.cancel_flag().load(Ordering::Relaxed));

        let future = Instant::now() + Duration::from_secs(3600);
        let problem = AnnealingProblem::new(&evaluator, Vec::new()).with_deadline(Some(future));
        assert!(!problem.cancel_flag().load(Ordering::Relaxed));
    }
}
