//! Worker–task matching figures.
//!
//! Pure functions over the domain models. [`ProblemIndex`](crate::index::ProblemIndex)
//! evaluates them once per (worker, task) pair so the search loops never
//! touch string ids.

use crate::models::{clamp_unit, Task, WorkerAvailability};

/// Practice hours above which the learning-curve bonus starts.
pub const LEARNING_CURVE_THRESHOLD_HOURS: f64 = 500.0;
/// Practice hours past the threshold at which the bonus is maximal.
pub const LEARNING_CURVE_RAMP_HOURS: f64 = 1000.0;
/// Maximum learning-curve bonus (+20%).
pub const LEARNING_CURVE_MAX_BONUS: f64 = 0.2;
/// Factor applied when a critical requirement is below its minimum level.
pub const CRITICAL_SHORTFALL_FACTOR: f64 = 0.5;

/// Normalized [0, 1] score of how well `worker` satisfies `task`'s skill requirements.
///
/// Each requirement contributes `min(1, level / min_level)` weighted by its
/// weight. A missing skill counts as level 0. Any critical requirement
/// below its minimum halves the result. Tasks without requirements (or with
/// zero total weight) match fully.
pub fn skill_match(worker: &WorkerAvailability, task: &Task) -> f64 {
    if task.required_skills.is_empty() {
        return 1.0;
    }

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    let mut critical_shortfall = false;

    for req in &task.required_skills {
        let level = worker.skill_level(&req.skill_id);
        let coverage = if req.min_level == 0 {
            1.0
        } else {
            (level as f64 / req.min_level as f64).min(1.0)
        };
        weighted += req.weight * coverage;
        total_weight += req.weight;
        if req.critical && level < req.min_level {
            critical_shortfall = true;
        }
    }

    let base = if total_weight <= 0.0 {
        1.0
    } else {
        weighted / total_weight
    };
    let adjusted = if critical_shortfall {
        base * CRITICAL_SHORTFALL_FACTOR
    } else {
        base
    };
    clamp_unit(adjusted)
}

/// Learning-curve multiplier for `worker` on `task` (1.0 to 1.2).
///
/// Uses the highest practice hours among the worker's skills that the task
/// requires. Ramps linearly from 500 to 1500 hours.
pub fn learning_curve_bonus(worker: &WorkerAvailability, task: &Task) -> f64 {
    let hours = worker
        .skills
        .iter()
        .filter(|s| task.requires_skill(&s.skill_id))
        .map(|s| s.practice_hours)
        .fold(0.0_f64, f64::max);

    if hours <= LEARNING_CURVE_THRESHOLD_HOURS {
        return 1.0;
    }
    let ramp = ((hours - LEARNING_CURVE_THRESHOLD_HOURS) / LEARNING_CURVE_RAMP_HOURS).min(1.0);
    1.0 + LEARNING_CURVE_MAX_BONUS * ramp
}

/// Whether `worker` holds every qualification `task` requires.
pub fn holds_qualifications(worker: &WorkerAvailability, task: &Task) -> bool {
    task.required_qualifications
        .iter()
        .all(|q| worker.has_qualification(q))
}
