//! Assignment grid.
//!
//! The grid is the unit of work handed to the optimizer: one department's
//! day, with its slots, roster, task catalog, constraints and the current
//! assignment list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Assignment, Constraint, OptimizationResult, Task, TimeSlot, WorkerAvailability};

/// One (date, department) assignment grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Work day.
    pub date: NaiveDate,
    /// Department identifier.
    pub department: String,
    /// Time slots of the day.
    pub time_slots: Vec<TimeSlot>,
    /// Worker roster.
    pub workers: Vec<WorkerAvailability>,
    /// Task catalog.
    pub tasks: Vec<Task>,
    /// Current assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Constraints audited after optimization.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Result of the latest optimization run.
    #[serde(default)]
    pub optimization_result: Option<OptimizationResult>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(date: NaiveDate, department: impl Into<String>) -> Self {
        Self {
            date,
            department: department.into(),
            time_slots: Vec::new(),
            workers: Vec::new(),
            tasks: Vec::new(),
            assignments: Vec::new(),
            constraints: Vec::new(),
            optimization_result: None,
        }
    }

    /// Sets the time slots.
    pub fn with_time_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.time_slots = slots;
        self
    }

    /// Adds a time slot.
    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Adds a worker.
    pub fn with_worker(mut self, worker: WorkerAvailability) -> Self {
        self.workers.push(worker);
        self
    }

    /// Adds a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds an assignment.
    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    /// Finds a worker by id.
    pub fn worker(&self, worker_id: &str) -> Option<&WorkerAvailability> {
        self.workers.iter().find(|w| w.worker_id == worker_id)
    }

    /// Finds a task by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Finds a slot by id.
    pub fn time_slot(&self, slot_id: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|s| s.id == slot_id)
    }

    /// All assignments of a worker.
    pub fn assignments_for_worker(&self, worker_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == worker_id)
            .collect()
    }

    /// All assignments in a slot.
    pub fn assignments_in_slot(&self, slot_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.time_slot_id == slot_id)
            .collect()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn sample_grid() -> Grid {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        Grid::new(date, "warehouse")
            .with_time_slots(TimeSlot::sequence(
                "S",
                date,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                30,
                2,
            ))
            .with_worker(WorkerAvailability::new("E1"))
            .with_worker(WorkerAvailability::new("E2"))
            .with_task(Task::new("T1"))
            .with_assignment(Assignment::new("S1", "E1", "T1"))
            .with_assignment(Assignment::new("S2", "E1", "T1"))
            .with_assignment(Assignment::new("S2", "E2", "T1"))
    }

    #[test]
    fn test_lookups() {
        let g = sample_grid();
        assert!(g.worker("E2").is_some());
        assert!(g.worker("E9").is_none());
        assert!(g.task("T1").is_some());
        assert!(g.time_slot("S2").is_some());
        assert_eq!(g.assignment_count(), 3);
    }

    #[test]
    fn test_assignment_queries() {
        let g = sample_grid();
        assert_eq!(g.assignments_for_worker("E1").len(), 2);
        assert_eq!(g.assignments_in_slot("S2").len(), 2);
        assert!(g.assignments_in_slot("S9").is_empty());
    }
}
