//! Worker availability model.
//!
//! A worker is the resource that performs tasks. Each worker carries a
//! skill profile, held qualifications, a fatigue reading, a continuous-work
//! budget and a per-time-of-day efficiency table. Availability is expressed
//! as a list of slot ids the worker cannot work.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::TimeOfDay;

/// Lowest skill level.
pub const MIN_SKILL_LEVEL: u8 = 1;
/// Highest skill level.
pub const MAX_SKILL_LEVEL: u8 = 5;

/// A worker's availability and capability snapshot for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerAvailability {
    /// Unique worker (employee) identifier.
    pub worker_id: String,
    /// Display name.
    pub name: String,
    /// Skills with proficiency.
    pub skills: Vec<WorkerSkill>,
    /// Qualification (certificate/license) ids held.
    pub qualifications: Vec<String>,
    /// Current fatigue (0.0 = rested, 1.0 = exhausted).
    pub fatigue: f64,
    /// Maximum continuous work before a break (minutes).
    pub max_continuous_minutes: i64,
    /// Preferred task categories.
    pub preferred_categories: Vec<String>,
    /// Slot ids the worker is unavailable for.
    pub unavailable_slots: Vec<String>,
    /// Efficiency multiplier by time of day. Missing entries mean 1.0.
    #[serde(default)]
    pub time_of_day_efficiency: HashMap<TimeOfDay, f64>,
}

/// A skill held by a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSkill {
    /// Skill identifier.
    pub skill_id: String,
    /// Proficiency level (1–5).
    pub level: u8,
    /// Working efficiency at this skill (0.0–1.0).
    pub efficiency: f64,
    /// Accumulated practice hours.
    pub practice_hours: f64,
}

impl WorkerAvailability {
    /// Creates a rested worker with no skills and an 8-hour continuous budget.
    pub fn new(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            name: String::new(),
            skills: Vec::new(),
            qualifications: Vec::new(),
            fatigue: 0.0,
            max_continuous_minutes: 480,
            preferred_categories: Vec::new(),
            unavailable_slots: Vec::new(),
            time_of_day_efficiency: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: WorkerSkill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Adds a held qualification.
    pub fn with_qualification(mut self, qualification_id: impl Into<String>) -> Self {
        self.qualifications.push(qualification_id.into());
        self
    }

    /// Sets the current fatigue, clamped to [0, 1].
    pub fn with_fatigue(mut self, fatigue: f64) -> Self {
        self.fatigue = fatigue.clamp(0.0, 1.0);
        self
    }

    /// Sets the continuous-work budget (minutes).
    pub fn with_max_continuous_minutes(mut self, minutes: i64) -> Self {
        self.max_continuous_minutes = minutes;
        self
    }

    /// Adds a preferred task category.
    pub fn with_preferred_category(mut self, category: impl Into<String>) -> Self {
        self.preferred_categories.push(category.into());
        self
    }

    /// Marks a slot as unavailable.
    pub fn with_unavailable_slot(mut self, slot_id: impl Into<String>) -> Self {
        self.unavailable_slots.push(slot_id.into());
        self
    }

    /// Sets the efficiency multiplier for a time-of-day bucket.
    pub fn with_time_of_day_efficiency(mut self, time_of_day: TimeOfDay, efficiency: f64) -> Self {
        self.time_of_day_efficiency
            .insert(time_of_day, efficiency.clamp(0.0, 1.0));
        self
    }

    /// Returns the skill entry for `skill_id`, if held.
    pub fn skill(&self, skill_id: &str) -> Option<&WorkerSkill> {
        self.skills.iter().find(|s| s.skill_id == skill_id)
    }

    /// Skill level for `skill_id` (0 if not held).
    pub fn skill_level(&self, skill_id: &str) -> u8 {
        self.skill(skill_id).map(|s| s.level).unwrap_or(0)
    }

    /// Whether the worker holds a qualification.
    pub fn has_qualification(&self, qualification_id: &str) -> bool {
        self.qualifications.iter().any(|q| q == qualification_id)
    }

    /// Whether the worker is available for a slot.
    pub fn is_available_for(&self, slot_id: &str) -> bool {
        !self.unavailable_slots.iter().any(|s| s == slot_id)
    }

    /// Efficiency multiplier for a time-of-day bucket (1.0 if unspecified).
    pub fn efficiency_at(&self, time_of_day: TimeOfDay) -> f64 {
        self.time_of_day_efficiency
            .get(&time_of_day)
            .copied()
            .unwrap_or(1.0)
    }

    /// Mean skill level across all held skills (0.0 with no skills).
    pub fn average_skill_level(&self) -> f64 {
        if self.skills.is_empty() {
            return 0.0;
        }
        let total: f64 = self.skills.iter().map(|s| s.level as f64).sum();
        total / self.skills.len() as f64
    }

    /// Whether the worker prefers a task category.
    pub fn prefers(&self, category: &str) -> bool {
        self.preferred_categories.iter().any(|c| c == category)
    }
}

impl WorkerSkill {
    /// Creates a skill entry. Level is clamped to 1–5, efficiency to [0, 1].
    pub fn new(skill_id: impl Into<String>, level: u8, efficiency: f64) -> Self {
        Self {
            skill_id: skill_id.into(),
            level: level.clamp(MIN_SKILL_LEVEL, MAX_SKILL_LEVEL),
            efficiency: efficiency.clamp(0.0, 1.0),
            practice_hours: 0.0,
        }
    }

    /// Sets accumulated practice hours.
    pub fn with_practice_hours(mut self, hours: f64) -> Self {
        self.practice_hours = hours.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_builder() {
        let w = WorkerAvailability::new("E1")
            .with_name("Kim")
            .with_skill(WorkerSkill::new("forklift", 4, 0.9).with_practice_hours(620.0))
            .with_skill(WorkerSkill::new("picking", 2, 0.7))
            .with_qualification("forklift-license")
            .with_fatigue(0.25)
            .with_preferred_category("logistics")
            .with_unavailable_slot("S3")
            .with_time_of_day_efficiency(TimeOfDay::Night, 0.6);

        assert_eq!(w.worker_id, "E1");
        assert_eq!(w.skill_level("forklift"), 4);
        assert_eq!(w.skill_level("welding"), 0);
        assert!(w.has_qualification("forklift-license"));
        assert!(!w.has_qualification("crane"));
        assert!(w.is_available_for("S1"));
        assert!(!w.is_available_for("S3"));
        assert!(w.prefers("logistics"));
        assert!((w.efficiency_at(TimeOfDay::Night) - 0.6).abs() < 1e-10);
        assert!((w.efficiency_at(TimeOfDay::Morning) - 1.0).abs() < 1e-10);
        assert!((w.average_skill_level() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_skill_clamping() {
        let s = WorkerSkill::new("x", 9, 1.7).with_practice_hours(-3.0);
        assert_eq!(s.level, MAX_SKILL_LEVEL);
        assert!((s.efficiency - 1.0).abs() < 1e-10);
        assert!((s.practice_hours - 0.0).abs() < 1e-10);

        let w = WorkerAvailability::new("E1").with_fatigue(-0.5);
        assert!((w.fatigue - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_average_skill_level_empty() {
        let w = WorkerAvailability::new("E1");
        assert!((w.average_skill_level() - 0.0).abs() < 1e-10);
    }
}
