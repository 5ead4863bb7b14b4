//! Assignment model.
//!
//! An assignment records that a worker performs a task during a slot,
//! along with the quality figures computed when it was produced.

use serde::{Deserialize, Serialize};

/// Threshold above which both efficiency and skill match make an assignment optimal.
pub const OPTIMAL_THRESHOLD: f64 = 0.8;

/// A (slot, worker, task) assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Assigned slot id.
    pub time_slot_id: String,
    /// Assigned worker id.
    pub employee_id: String,
    /// Assigned task id.
    pub task_id: String,
    /// Expected working efficiency (0.0–1.0).
    pub efficiency: f64,
    /// Skill match between worker and task (0.0–1.0).
    pub skill_match: f64,
    /// `efficiency >= 0.8 && skill_match >= 0.8`.
    pub is_optimal: bool,
    /// Free-text conflict notes.
    #[serde(default)]
    pub conflicts: Vec<String>,
}

impl Assignment {
    /// Creates an assignment with zero efficiency and skill match.
    pub fn new(
        time_slot_id: impl Into<String>,
        employee_id: impl Into<String>,
        task_id: impl Into<String>,
    ) -> Self {
        Self {
            time_slot_id: time_slot_id.into(),
            employee_id: employee_id.into(),
            task_id: task_id.into(),
            efficiency: 0.0,
            skill_match: 0.0,
            is_optimal: false,
            conflicts: Vec::new(),
        }
    }

    /// Sets efficiency and skill match (both clamped to [0, 1]) and derives `is_optimal`.
    pub fn with_quality(mut self, efficiency: f64, skill_match: f64) -> Self {
        self.efficiency = clamp_unit(efficiency);
        self.skill_match = clamp_unit(skill_match);
        self.is_optimal =
            self.efficiency >= OPTIMAL_THRESHOLD && self.skill_match >= OPTIMAL_THRESHOLD;
        self
    }

    /// Adds a conflict note.
    pub fn with_conflict(mut self, conflict: impl Into<String>) -> Self {
        self.conflicts.push(conflict.into());
        self
    }

    /// Stable identifier: `"{slot}:{worker}:{task}"`.
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.time_slot_id, self.employee_id, self.task_id)
    }
}

/// Clamps to [0, 1], mapping NaN to 0.
#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
