//! Task model.
//!
//! A task is a unit of work a worker can be placed on for a slot. Tasks
//! declare weighted skill requirements, required qualifications, a safety
//! classification and a dispatch priority.

use serde::{Deserialize, Serialize};

/// Dispatch priority. Greedy construction serves `High` tasks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank (lower = served first).
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// A task that workers can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Task category (matched against worker preferences).
    pub category: String,
    /// Weighted skill requirements.
    pub required_skills: Vec<SkillRequirement>,
    /// Qualification ids a worker must hold.
    pub required_qualifications: Vec<String>,
    /// Whether the task is safety-critical.
    pub hazardous: bool,
    /// Longest continuous stretch a worker may spend on the task (hours).
    pub max_continuous_hours: f64,
    /// Dispatch priority.
    pub priority: Priority,
    /// Inactive tasks are never assigned.
    pub active: bool,
}

/// A skill requirement of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequirement {
    /// Required skill id.
    pub skill_id: String,
    /// Minimum acceptable level (1–5).
    pub min_level: u8,
    /// Relative importance (0.0–1.0).
    pub weight: f64,
    /// Whether falling short of `min_level` is critical.
    pub critical: bool,
}

impl Task {
    /// Creates an active, non-hazardous, medium-priority task.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category: String::new(),
            required_skills: Vec::new(),
            required_qualifications: Vec::new(),
            hazardous: false,
            max_continuous_hours: 8.0,
            priority: Priority::Medium,
            active: true,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the task category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Adds a skill requirement.
    pub fn with_skill(mut self, requirement: SkillRequirement) -> Self {
        self.required_skills.push(requirement);
        self
    }

    /// Adds a required qualification.
    pub fn with_qualification(mut self, qualification_id: impl Into<String>) -> Self {
        self.required_qualifications.push(qualification_id.into());
        self
    }

    /// Marks the task as hazardous.
    pub fn hazardous(mut self) -> Self {
        self.hazardous = true;
        self
    }

    /// Sets the continuous-work cap (hours).
    pub fn with_max_continuous_hours(mut self, hours: f64) -> Self {
        self.max_continuous_hours = hours;
        self
    }

    /// Sets the dispatch priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Highest minimum level across requirements (1 with no requirements).
    pub fn minimum_required_level(&self) -> u8 {
        self.required_skills
            .iter()
            .map(|r| r.min_level)
            .max()
            .unwrap_or(1)
    }

    /// Whether the task requires a given skill.
    pub fn requires_skill(&self, skill_id: &str) -> bool {
        self.required_skills.iter().any(|r| r.skill_id == skill_id)
    }
}

impl SkillRequirement {
    /// Creates a non-critical requirement. Weight is clamped to [0, 1].
    pub fn new(skill_id: impl Into<String>, min_level: u8, weight: f64) -> Self {
        Self {
            skill_id: skill_id.into(),
            min_level,
            weight: weight.clamp(0.0, 1.0),
            critical: false,
        }
    }

    /// Marks the requirement as critical.
    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("T1")
            .with_name("Reach truck")
            .with_category("logistics")
            .with_skill(SkillRequirement::new("forklift", 3, 1.0).critical())
            .with_skill(SkillRequirement::new("picking", 2, 0.4))
            .with_qualification("forklift-license")
            .hazardous()
            .with_priority(Priority::High);

        assert_eq!(task.id, "T1");
        assert_eq!(task.category, "logistics");
        assert!(task.hazardous);
        assert!(task.active);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.minimum_required_level(), 3);
        assert!(task.requires_skill("picking"));
        assert!(!task.requires_skill("welding"));
        assert!(task.required_skills[0].critical);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_minimum_level_without_requirements() {
        assert_eq!(Task::new("T0").minimum_required_level(), 1);
    }

    #[test]
    fn test_weight_clamping() {
        let r = SkillRequirement::new("x", 2, 3.0);
        assert!((r.weight - 1.0).abs() < 1e-10);
    }
}
