//! Dense index over a grid.
//!
//! Resolves slot, worker and task ids once into array positions and
//! precomputes every per-pair figure the search loops need. Strategies
//! manipulate [`Placement`]s (index triples) and only convert back to
//! id-based [`Assignment`]s when a run finishes.

use std::collections::HashMap;

use crate::config::FeatureToggles;
use crate::evaluation::matching::{holds_qualifications, learning_curve_bonus, skill_match};
use crate::models::{clamp_unit, Assignment, Grid, Task, TimeSlot, WorkerAvailability};

/// Index-based (slot, worker, task) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Index into `grid.time_slots`.
    pub slot: usize,
    /// Index into `grid.workers`.
    pub worker: usize,
    /// Index into `grid.tasks`.
    pub task: usize,
}

impl Placement {
    /// Creates a placement.
    #[inline]
    pub fn new(slot: usize, worker: usize, task: usize) -> Self {
        Self { slot, worker, task }
    }
}

/// Precomputed lookup tables for one grid and feature set.
///
/// Row-major tables: `worker * task_count + task` and `worker * slot_count + slot`.
#[derive(Debug, Clone)]
pub struct ProblemIndex<'a> {
    grid: &'a Grid,
    features: FeatureToggles,
    slot_order: Vec<usize>,
    active_tasks: Vec<usize>,
    slot_ids: HashMap<&'a str, usize>,
    worker_ids: HashMap<&'a str, usize>,
    task_ids: HashMap<&'a str, usize>,
    skill_match: Vec<f64>,
    learning_bonus: Vec<f64>,
    qualified: Vec<bool>,
    preferred: Vec<bool>,
    time_of_day: Vec<f64>,
    available: Vec<bool>,
}

impl<'a> ProblemIndex<'a> {
    /// Builds the index.
    ///
    /// Ids are assumed unique (see [`validate_grid`](crate::validation::validate_grid));
    /// on duplicates the first occurrence wins.
    pub fn new(grid: &'a Grid, features: FeatureToggles) -> Self {
        let slots = &grid.time_slots;
        let workers = &grid.workers;
        let tasks = &grid.tasks;

        let mut slot_order: Vec<usize> = (0..slots.len()).collect();
        slot_order.sort_by_key(|&i| (slots[i].date, slots[i].start_time));

        let active_tasks = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.active)
            .map(|(i, _)| i)
            .collect();

        let mut skill_match_table = Vec::with_capacity(workers.len() * tasks.len());
        let mut learning_bonus = Vec::with_capacity(workers.len() * tasks.len());
        let mut qualified = Vec::with_capacity(workers.len() * tasks.len());
        let mut preferred = Vec::with_capacity(workers.len() * tasks.len());
        for worker in workers {
            for task in tasks {
                skill_match_table.push(skill_match(worker, task));
                learning_bonus.push(learning_curve_bonus(worker, task));
                qualified.push(holds_qualifications(worker, task));
                preferred.push(worker.prefers(&task.category));
            }
        }

        let mut time_of_day = Vec::with_capacity(workers.len() * slots.len());
        let mut available = Vec::with_capacity(workers.len() * slots.len());
        for worker in workers {
            for slot in slots {
                time_of_day.push(worker.efficiency_at(slot.time_of_day()));
                available.push(worker.is_available_for(&slot.id));
            }
        }

        Self {
            grid,
            features,
            slot_order,
            active_tasks,
            slot_ids: first_positions(slots.iter().map(|s| s.id.as_str())),
            worker_ids: first_positions(workers.iter().map(|w| w.worker_id.as_str())),
            task_ids: first_positions(tasks.iter().map(|t| t.id.as_str())),
            skill_match: skill_match_table,
            learning_bonus,
            qualified,
            preferred,
            time_of_day,
            available,
        }
    }

    /// The indexed grid.
    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Feature toggles the index was built with.
    #[inline]
    pub fn features(&self) -> FeatureToggles {
        self.features
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.grid.time_slots.len()
    }

    #[inline]
    pub fn worker_count(&self) -> usize {
        self.grid.workers.len()
    }

    #[inline]
    pub fn task_count(&self) -> usize {
        self.grid.tasks.len()
    }

    #[inline]
    pub fn slot(&self, slot: usize) -> &'a TimeSlot {
        &self.grid.time_slots[slot]
    }

    #[inline]
    pub fn worker(&self, worker: usize) -> &'a WorkerAvailability {
        &self.grid.workers[worker]
    }

    #[inline]
    pub fn task(&self, task: usize) -> &'a Task {
        &self.grid.tasks[task]
    }

    /// Slot indices in chronological order.
    #[inline]
    pub fn slots_in_order(&self) -> &[usize] {
        &self.slot_order
    }

    /// Indices of active tasks, in catalog order.
    #[inline]
    pub fn active_tasks(&self) -> &[usize] {
        &self.active_tasks
    }

    /// Skill match of a worker on a task.
    #[inline]
    pub fn skill_match(&self, worker: usize, task: usize) -> f64 {
        self.skill_match[worker * self.task_count() + task]
    }

    /// Learning-curve multiplier (1.0 when the feature is off).
    #[inline]
    pub fn learning_bonus(&self, worker: usize, task: usize) -> f64 {
        if self.features.learning_curve {
            self.learning_bonus[worker * self.task_count() + task]
        } else {
            1.0
        }
    }

    /// Whether the worker holds every qualification of the task.
    #[inline]
    pub fn is_qualified(&self, worker: usize, task: usize) -> bool {
        self.qualified[worker * self.task_count() + task]
    }

    /// Whether the task's category is among the worker's preferences.
    #[inline]
    pub fn prefers(&self, worker: usize, task: usize) -> bool {
        self.preferred[worker * self.task_count() + task]
    }

    /// Time-of-day efficiency of a worker in a slot.
    #[inline]
    pub fn time_of_day_efficiency(&self, worker: usize, slot: usize) -> f64 {
        self.time_of_day[worker * self.slot_count() + slot]
    }

    /// Whether a worker can work a slot.
    #[inline]
    pub fn is_available(&self, worker: usize, slot: usize) -> bool {
        self.available[worker * self.slot_count() + slot]
    }

    /// Fatigue multiplier `1 - fatigue` (1.0 when fatigue modeling is off).
    #[inline]
    pub fn fatigue_factor(&self, worker: usize) -> f64 {
        if self.features.fatigue_modeling {
            1.0 - self.worker(worker).fatigue
        } else {
            1.0
        }
    }

    /// Effective efficiency of a placement, clamped to [0, 1].
    ///
    /// `skill_match × time_of_day × fatigue_factor × learning_bonus`
    pub fn efficiency(&self, p: Placement) -> f64 {
        clamp_unit(
            self.skill_match(p.worker, p.task)
                * self.time_of_day_efficiency(p.worker, p.slot)
                * self.fatigue_factor(p.worker)
                * self.learning_bonus(p.worker, p.task),
        )
    }

    /// Workers available in a slot, in roster order.
    pub fn available_workers(&self, slot: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.worker_count()).filter(move |&w| self.is_available(w, slot))
    }

    /// Resolves an id-based assignment. `None` if any id is unknown.
    pub fn placement_of(&self, assignment: &Assignment) -> Option<Placement> {
        Some(Placement {
            slot: *self.slot_ids.get(assignment.time_slot_id.as_str())?,
            worker: *self.worker_ids.get(assignment.employee_id.as_str())?,
            task: *self.task_ids.get(assignment.task_id.as_str())?,
        })
    }

    /// Converts a placement into an assignment with computed quality figures.
    pub fn to_assignment(&self, p: Placement) -> Assignment {
        Assignment::new(
            &self.slot(p.slot).id,
            &self.worker(p.worker).worker_id,
            &self.task(p.task).id,
        )
        .with_quality(self.efficiency(p), self.skill_match(p.worker, p.task))
    }

    /// Converts placements into assignments, preserving order.
    pub fn to_assignments(&self, placements: &[Placement]) -> Vec<Assignment> {
        placements.iter().map(|&p| self.to_assignment(p)).collect()
    }
}

fn first_positions<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut map = HashMap::new();
    for (i, id) in ids.enumerate() {
        map.entry(id).or_insert(i);
    }
    map
}
