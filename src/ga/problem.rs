//! GA problem definition for workforce assignment.
//!
//! Connects the placement-list encoding to the `u-metaheur` GA traits:
//! random initialization, fitness as the negated overall score, midpoint
//! crossover and task-swap mutation.

use rand::Rng;
use u_metaheur::ga::GaProblem;

use super::chromosome::{midpoint_crossover, task_swap_mutation, AssignmentChromosome};
use crate::evaluation::Evaluator;

/// Workforce assignment as a GA problem.
///
/// # Example
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use rand::{rngs::SmallRng, SeedableRng};
/// use u_metaheur::ga::GaProblem;
/// use u_workforce::config::{FeatureToggles, ObjectiveWeights};
/// use u_workforce::evaluation::Evaluator;
/// use u_workforce::ga::AssignmentProblem;
/// use u_workforce::index::ProblemIndex;
/// use u_workforce::models::{Grid, Task, TimeSlot, WorkerAvailability};
///
/// let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let grid = Grid::new(date, "line")
///     .with_time_slots(TimeSlot::sequence("S", date, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30, 2))
///     .with_worker(WorkerAvailability::new("E1"))
///     .with_task(Task::new("T1"));
/// let index = ProblemIndex::new(&grid, FeatureToggles::default());
/// let evaluator = Evaluator::new(&index, ObjectiveWeights::default());
/// let problem = AssignmentProblem::new(&evaluator);
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let individual = problem.create_individual(&mut rng);
/// assert_eq!(individual.len(), 2);
/// assert!(problem.evaluate(&individual) <= 0.0);
/// ```
#[derive(Clone, Copy)]
pub struct AssignmentProblem<'e, 'i, 'g> {
    evaluator: &'e Evaluator<'i, 'g>,
}

impl<'e, 'i, 'g> AssignmentProblem<'e, 'i, 'g> {
    /// Wraps an evaluator.
    pub fn new(evaluator: &'e Evaluator<'i, 'g>) -> Self {
        Self { evaluator }
    }

    /// The evaluator fitness is computed with.
    pub fn evaluator(&self) -> &'e Evaluator<'i, 'g> {
        self.evaluator
    }
}

impl GaProblem for AssignmentProblem<'_, '_, '_> {
    type Individual = AssignmentChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> AssignmentChromosome {
        AssignmentChromosome::random(self.evaluator.index(), rng)
    }

    fn evaluate(&self, individual: &AssignmentChromosome) -> f64 {
        -self.evaluator.overall(&individual.placements)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &AssignmentChromosome,
        parent2: &AssignmentChromosome,
        _rng: &mut R,
    ) -> Vec<AssignmentChromosome> {
        vec![midpoint_crossover(parent1, parent2)]
    }

    fn mutate<R: Rng>(&self, individual: &mut AssignmentChromosome, rng: &mut R) {
        task_swap_mutation(individual, rng);
    }
}
