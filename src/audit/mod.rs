//! Post-search audit: constraint violations and improvement suggestions.
//!
//! Both halves are slot-based: one [`ConstraintRule`] per
//! [`ConstraintType`] and one [`SuggestionSource`] per [`SuggestionType`].
//! The built-in rules and sources report nothing; callers install real
//! ones through [`ConstraintChecker::with_rule`] and
//! [`SuggestionGenerator::with_source`].
//!
//! # Usage
//!
//! ```
//! use u_workforce::audit::{rules, ConstraintChecker};
//! use u_workforce::models::ConstraintType;
//!
//! let checker = ConstraintChecker::new()
//!     .with_rule(ConstraintType::Safety, rules::SafetyRule);
//! assert_eq!(checker.rule(ConstraintType::Safety).name(), "safety");
//! ```

mod checker;
pub mod rules;
mod suggestions;

pub use checker::ConstraintChecker;
pub use suggestions::{SuggestionGenerator, MAX_SUGGESTIONS};

use crate::models::{
    Constraint, ConstraintType, ConstraintViolation, Grid, Suggestion, SuggestionType,
};
use std::fmt::Debug;

/// Audits a finished grid against one constraint.
pub trait ConstraintRule: Send + Sync + Debug {
    /// Rule name.
    fn name(&self) -> &'static str;

    /// Returns the violations of `constraint` in `grid`'s assignments.
    fn check(&self, constraint: &Constraint, grid: &Grid) -> Vec<ConstraintViolation>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Proposes improvements for a finished grid.
pub trait SuggestionSource: Send + Sync + Debug {
    /// Source name.
    fn name(&self) -> &'static str;

    /// Returns suggestions in any order; the generator ranks them.
    fn suggest(&self, grid: &Grid) -> Vec<Suggestion>;
}

/// Builds a violation record carrying the constraint's id and severity.
pub fn violation(
    constraint: &Constraint,
    description: impl Into<String>,
    affected_assignments: Vec<String>,
    suggested_fix: impl Into<String>,
) -> ConstraintViolation {
    ConstraintViolation {
        constraint_id: constraint.id.clone(),
        severity: constraint.severity,
        description: description.into(),
        affected_assignments,
        suggested_fix: suggested_fix.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_violation_copies_constraint_fields() {
        let c = Constraint::soft("C7", ConstraintType::Preference);
        let v = violation(&c, "dislikes night work", vec!["S1:E1:T1".into()], "swap");
        assert_eq!(v.constraint_id, "C7");
        assert_eq!(v.severity, Severity::Soft);
        assert_eq!(v.affected_assignments, vec!["S1:E1:T1".to_string()]);
        assert_eq!(v.suggested_fix, "swap");
    }

    #[test]
    fn test_types_cover_slots() {
        assert_eq!(ConstraintType::ALL.len(), 8);
        assert_eq!(SuggestionType::ALL.len(), 4);
    }
}
