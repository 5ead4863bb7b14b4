//! Constraint violation checker.

use std::collections::HashMap;
use std::sync::Arc;

use super::rules::default_rule;
use super::ConstraintRule;
use crate::models::{ConstraintType, ConstraintViolation, Grid};

/// Dispatches each active constraint to the rule in its type's slot.
#[derive(Clone)]
pub struct ConstraintChecker {
    rules: HashMap<ConstraintType, Arc<dyn ConstraintRule>>,
}

impl ConstraintChecker {
    /// Creates a checker with the built-in rule in every slot.
    pub fn new() -> Self {
        Self {
            rules: ConstraintType::ALL
                .iter()
                .map(|&t| (t, default_rule(t)))
                .collect(),
        }
    }

    /// Replaces the rule for one constraint type.
    pub fn with_rule<R: ConstraintRule + 'static>(
        mut self,
        constraint_type: ConstraintType,
        rule: R,
    ) -> Self {
        self.rules.insert(constraint_type, Arc::new(rule));
        self
    }

    /// The rule installed for a constraint type.
    pub fn rule(&self, constraint_type: ConstraintType) -> Arc<dyn ConstraintRule> {
        self.rules
            .get(&constraint_type)
            .cloned()
            .unwrap_or_else(|| default_rule(constraint_type))
    }

    /// Checks every active constraint of the grid, in declaration order.
    pub fn check(&self, grid: &Grid) -> Vec<ConstraintViolation> {
        grid.constraints
            .iter()
            .filter(|c| c.active)
            .flat_map(|c| self.rule(c.constraint_type).check(c, grid))
            .collect()
    }
}

impl Default for ConstraintChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConstraintChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<(&str, &str)> = ConstraintType::ALL
            .iter()
            .filter_map(|t| self.rules.get(t).map(|r| (r.name(), r.description())))
            .collect();
        names.sort();
        f.debug_struct("ConstraintChecker")
            .field("rules", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::violation;
    use crate::models::{Assignment, Constraint, Severity, Task, WorkerAvailability};
    use chrono::NaiveDate;

    /// Flags every assignment on a hazardous task.
    #[derive(Debug)]
    struct HazardRule;

    impl ConstraintRule for HazardRule {
        fn name(&self) -> &'static str {
            "hazard"
        }

        fn check(&self, constraint: &Constraint, grid: &Grid) -> Vec<ConstraintViolation> {
            grid.assignments
                .iter()
                .filter(|a| grid.task(&a.task_id).is_some_and(|t| t.hazardous))
                .map(|a| violation(constraint, "hazardous task", vec![a.id()], "reassign"))
                .collect()
        }
    }

    fn sample_grid() -> Grid {
        Grid::new(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), "d")
            .with_worker(WorkerAvailability::new("E1"))
            .with_task(Task::new("T1").hazardous())
            .with_task(Task::new("T2"))
            .with_assignment(Assignment::new("S1", "E1", "T1"))
            .with_assignment(Assignment::new("S2", "E1", "T2"))
    }

    #[test]
    fn test_default_checker_reports_nothing() {
        let grid = sample_grid()
            .with_constraint(Constraint::hard("C1", ConstraintType::Safety))
            .with_constraint(Constraint::soft("C2", ConstraintType::Rest));
        assert!(ConstraintChecker::new().check(&grid).is_empty());
    }

    #[test]
    fn test_installed_rule_is_dispatched() {
        let grid = sample_grid()
            .with_constraint(Constraint::hard("C1", ConstraintType::Safety))
            .with_constraint(Constraint::soft("C2", ConstraintType::Rest));
        let checker = ConstraintChecker::new().with_rule(ConstraintType::Safety, HazardRule);

        let violations = checker.check(&grid);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint_id, "C1");
        assert_eq!(violations[0].severity, Severity::Hard);
        assert_eq!(violations[0].affected_assignments, vec!["S1:E1:T1".to_string()]);
    }

    #[test]
    fn test_inactive_constraints_skipped() {
        let grid = sample_grid()
            .with_constraint(Constraint::hard("C1", ConstraintType::Safety).with_active(false));
        let checker = ConstraintChecker::new().with_rule(ConstraintType::Safety, HazardRule);
        assert!(checker.check(&grid).is_empty());
    }

    #[test]
    fn test_rule_lookup() {
        let checker = ConstraintChecker::new().with_rule(ConstraintType::Skill, HazardRule);
        assert_eq!(checker.rule(ConstraintType::Skill).name(), "hazard");
        assert_eq!(checker.rule(ConstraintType::Rest).name(), "rest");
        assert!(format!("{checker:?}").contains("hazard"));
    }
}
