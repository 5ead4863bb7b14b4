//! Input validation for assignment grids.
//!
//! Checks structural integrity of a grid before optimization. Detects:
//! - Duplicate slot, worker and task IDs
//! - Assignments referencing unknown slots, workers or tasks
//! - Skill levels outside 1–5
//! - Fatigue, efficiency and requirement weights outside [0, 1]
//! - Time slots without a positive duration
//!
//! Double bookings (one worker holding several assignments in one slot)
//! are reported separately by [`find_double_bookings`] and never block a run.

use crate::models::{Grid, TimeOfDay, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An assignment references a slot that doesn't exist.
    UnknownTimeSlot,
    /// An assignment references a worker that doesn't exist.
    UnknownWorker,
    /// An assignment references a task that doesn't exist.
    UnknownTask,
    /// A skill level (held or required) is outside 1–5.
    InvalidSkillLevel,
    /// A unit-interval value is outside [0, 1] or not a number, or a slot
    /// duration is not positive.
    InvalidRange,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a grid.
///
/// Checks:
/// 1. No duplicate slot, worker or task IDs
/// 2. All assignment references point to existing slots, workers and tasks
/// 3. Held and required skill levels are within 1–5
/// 4. Fatigue, skill efficiency, time-of-day efficiency and requirement
///    weights are within [0, 1]
/// 5. Every time slot lasts at least one minute
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_grid(grid: &Grid) -> ValidationResult {
    let mut errors = Vec::new();

    let slot_ids = collect_ids(grid.time_slots.iter().map(|s| s.id.as_str()), "time slot", &mut errors);
    let worker_ids = collect_ids(grid.workers.iter().map(|w| w.worker_id.as_str()), "worker", &mut errors);
    let task_ids = collect_ids(grid.tasks.iter().map(|t| t.id.as_str()), "task", &mut errors);

    for slot in &grid.time_slots {
        if slot.duration_minutes <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRange,
                format!(
                    "Time slot '{}' has non-positive duration {} min",
                    slot.id, slot.duration_minutes
                ),
            ));
        }
    }

    // Worker profiles
    for worker in &grid.workers {
        if !in_unit_range(worker.fatigue) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRange,
                format!("Worker '{}' has fatigue {} outside [0, 1]", worker.worker_id, worker.fatigue),
            ));
        }
        for skill in &worker.skills {
            if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill.level) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSkillLevel,
                    format!(
                        "Worker '{}' has level {} for skill '{}'",
                        worker.worker_id, skill.level, skill.skill_id
                    ),
                ));
            }
            if !in_unit_range(skill.efficiency) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRange,
                    format!(
                        "Worker '{}' has efficiency {} for skill '{}'",
                        worker.worker_id, skill.efficiency, skill.skill_id
                    ),
                ));
            }
        }
        for time_of_day in TimeOfDay::ALL {
            if let Some(&efficiency) = worker.time_of_day_efficiency.get(&time_of_day) {
                if !in_unit_range(efficiency) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidRange,
                        format!(
                            "Worker '{}' has {:?} efficiency {} outside [0, 1]",
                            worker.worker_id, time_of_day, efficiency
                        ),
                    ));
                }
            }
        }
    }

    // Task requirements
    for task in &grid.tasks {
        for req in &task.required_skills {
            if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&req.min_level) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSkillLevel,
                    format!(
                        "Task '{}' requires level {} for skill '{}'",
                        task.id, req.min_level, req.skill_id
                    ),
                ));
            }
            if !in_unit_range(req.weight) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRange,
                    format!(
                        "Task '{}' has weight {} for skill '{}'",
                        task.id, req.weight, req.skill_id
                    ),
                ));
            }
        }
    }

    // Assignment references
    for a in &grid.assignments {
        if !slot_ids.contains(a.time_slot_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTimeSlot,
                format!("Assignment '{}' references unknown time slot '{}'", a.id(), a.time_slot_id),
            ));
        }
        if !worker_ids.contains(a.employee_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownWorker,
                format!("Assignment '{}' references unknown worker '{}'", a.id(), a.employee_id),
            ));
        }
        if !task_ids.contains(a.task_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTask,
                format!("Assignment '{}' references unknown task '{}'", a.id(), a.task_id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Finds workers holding more than one assignment in the same slot.
///
/// Returns `(worker_id, slot_id, count)` triples sorted by worker, then slot.
pub fn find_double_bookings(grid: &Grid) -> Vec<(String, String, usize)> {
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for a in &grid.assignments {
        *counts
            .entry((a.employee_id.as_str(), a.time_slot_id.as_str()))
            .or_insert(0) += 1;
    }

    let mut doubles: Vec<(String, String, usize)> = counts
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|((w, s), n)| (w.to_string(), s.to_string(), n))
        .collect();
    doubles.sort();
    doubles
}

fn collect_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    entity: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
    seen
}

#[inline]
fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
