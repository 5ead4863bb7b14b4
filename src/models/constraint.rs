//! Workforce constraints.
//!
//! Constraints are rules an assignment set is audited against after a
//! search finishes. They are scored, not solved: the search strategies
//! optimize the weighted objectives and the audit reports what breaks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Constraint category. Each category has a dedicated audit rule slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    /// Worker must meet the task's skill requirements.
    Skill,
    /// Worker must hold the task's qualifications.
    Qualification,
    /// Limit on uninterrupted working time.
    ContinuousWork,
    /// Minimum rest between working stretches.
    Rest,
    /// Equipment availability.
    Equipment,
    /// Worker preferences.
    Preference,
    /// Safety rules for hazardous work.
    Safety,
    /// Statutory labor rules.
    LaborLaw,
}

impl ConstraintType {
    /// All constraint types, in declaration order.
    pub const ALL: [ConstraintType; 8] = [
        ConstraintType::Skill,
        ConstraintType::Qualification,
        ConstraintType::ContinuousWork,
        ConstraintType::Rest,
        ConstraintType::Equipment,
        ConstraintType::Preference,
        ConstraintType::Safety,
        ConstraintType::LaborLaw,
    ];
}

/// Whether a violation blocks (hard) or merely penalizes (soft).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Hard,
    Soft,
}

/// A workforce constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    /// Unique constraint identifier.
    pub id: String,
    /// Constraint category.
    pub constraint_type: ConstraintType,
    /// Hard or soft.
    pub severity: Severity,
    /// Rule parameters (e.g. `"maxMinutes" => "240"`).
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    /// Inactive constraints are skipped by the audit.
    pub active: bool,
}

impl Constraint {
    /// Creates an active constraint with no parameters.
    pub fn new(id: impl Into<String>, constraint_type: ConstraintType, severity: Severity) -> Self {
        Self {
            id: id.into(),
            constraint_type,
            severity,
            parameters: HashMap::new(),
            active: true,
        }
    }

    /// Creates an active hard constraint.
    pub fn hard(id: impl Into<String>, constraint_type: ConstraintType) -> Self {
        Self::new(id, constraint_type, Severity::Hard)
    }

    /// Creates an active soft constraint.
    pub fn soft(id: impl Into<String>, constraint_type: ConstraintType) -> Self {
        Self::new(id, constraint_type, Severity::Soft)
    }

    /// Adds a rule parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Looks up a parameter.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(|s| s.as_str())
    }
}
