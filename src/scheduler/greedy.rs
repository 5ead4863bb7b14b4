//! Priority-driven greedy constructor.
//!
//! # Algorithm
//!
//! 1. Visit slots in chronological order.
//! 2. Sort active tasks by priority (high first, stable for ties).
//! 3. For each task, pick the eligible worker maximizing
//!    `skill_match × time_of_day × (1 − fatigue)`.
//! 4. Charge the slot's duration against the worker's continuous-work
//!    budget on its first pick in the slot; an exhausted worker leaves the
//!    pool. A slot spent idle restores the full budget.
//!
//! No backtracking: tasks without an eligible worker stay unassigned.
//!
//! # Complexity
//! O(s * t * w) where s=slots, t=active tasks, w=workers.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use crate::index::{Placement, ProblemIndex};

/// Deterministic greedy constructor.
///
/// Workers may be picked for several tasks within one slot; the
/// double booking is reported by
/// [`find_double_bookings`](crate::validation::find_double_bookings)
/// once the placements are written back.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_workforce::config::FeatureToggles;
/// use u_workforce::index::ProblemIndex;
/// use u_workforce::models::{Grid, SkillRequirement, Task, TimeSlot, WorkerAvailability, WorkerSkill};
/// use u_workforce::scheduler::GreedyScheduler;
///
/// let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let grid = Grid::new(date, "assembly")
///     .with_time_slots(vec![TimeSlot::new("S1", date, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30)])
///     .with_worker(WorkerAvailability::new("E1").with_skill(WorkerSkill::new("weld", 3, 0.9)))
///     .with_task(Task::new("T1").with_skill(SkillRequirement::new("weld", 2, 1.0)));
///
/// let index = ProblemIndex::new(&grid, FeatureToggles::default());
/// let placements = GreedyScheduler::new().schedule(&index);
/// assert_eq!(placements.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyScheduler;

impl GreedyScheduler {
    /// Creates a new constructor.
    pub fn new() -> Self {
        Self
    }

    /// Builds a placement list for the indexed grid.
    pub fn schedule(&self, index: &ProblemIndex<'_>) -> Vec<Placement> {
        let worker_count = index.worker_count();
        let mut placements = Vec::new();

        let max_budget: Vec<i64> = (0..worker_count)
            .map(|w| index.worker(w).max_continuous_minutes)
            .collect();
        let mut budget = max_budget.clone();

        let task_order = Self::sort_tasks(index);

        for &slot in index.slots_in_order() {
            let duration = index.slot(slot).duration_minutes;
            let mut eligible: Vec<usize> = index
                .available_workers(slot)
                .filter(|&w| budget[w] > 0)
                .collect();
            let mut worked = vec![false; worker_count];

            for &task in &task_order {
                let Some(pos) = Self::best_worker(index, slot, task, &eligible) else {
                    continue;
                };
                let worker = eligible[pos];
                placements.push(Placement::new(slot, worker, task));

                if !worked[worker] {
                    worked[worker] = true;
                    budget[worker] -= duration;
                    if budget[worker] <= 0 {
                        eligible.remove(pos);
                    }
                }
            }

            // Idle slot = rest
            for w in 0..worker_count {
                if !worked[w] {
                    budget[w] = max_budget[w];
                }
            }
        }

        placements
    }

    /// Active tasks by priority rank, catalog order within a rank.
    fn sort_tasks(index: &ProblemIndex<'_>) -> Vec<usize> {
        let mut order = index.active_tasks().to_vec();
        order.sort_by_key(|&t| index.task(t).priority.rank());
        order
    }

    /// Position in `eligible` of the highest-scoring worker; earliest wins ties.
    /// A NaN score never displaces a numeric one.
    fn best_worker(
        index: &ProblemIndex<'_>,
        slot: usize,
        task: usize,
        eligible: &[usize],
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (pos, &worker) in eligible.iter().enumerate() {
            let score = index.skill_match(worker, task)
                * index.time_of_day_efficiency(worker, slot)
                * (1.0 - index.worker(worker).fatigue);
            match best {
                Some((_, best_score)) if score.is_nan() || score <= best_score => {}
                _ => best = Some((pos, score)),
            }
        }
        best.map(|(pos, _)| pos)
    }
}
