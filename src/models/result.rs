//! Optimization result model.
//!
//! Holds the five objective scores of a finished run, the audit output
//! (violations and suggestions) and the run metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Severity;
use crate::config::OptimizationConfig;

/// The five objective sub-scores plus their weighted sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveScores {
    /// Mean effective efficiency of assignments.
    pub efficiency: f64,
    /// Share of skill capacity actually exercised.
    pub skill_utilization: f64,
    /// Mean worker satisfaction.
    pub satisfaction: f64,
    /// Cost efficiency relative to the minimum-skill cost.
    pub cost_optimization: f64,
    /// Share of safety-compliant assignments.
    pub safety_compliance: f64,
    /// Weighted sum of the five scores.
    pub overall: f64,
}

/// A constraint violation found by the audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintViolation {
    /// Violated constraint id.
    pub constraint_id: String,
    /// Severity copied from the constraint.
    pub severity: Severity,
    /// Human-readable description.
    pub description: String,
    /// Ids of the affected assignments (see [`Assignment::id`](super::Assignment::id)).
    pub affected_assignments: Vec<String>,
    /// Suggested remedy.
    pub suggested_fix: String,
}

/// Category of an improvement suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    /// Swap tasks between two workers.
    TaskSwap,
    /// Insert a break.
    BreakTime,
    /// Move a task to a different worker.
    Reassignment,
    /// Train a worker in a skill.
    SkillTraining,
}

impl SuggestionType {
    /// All suggestion types, in declaration order.
    pub const ALL: [SuggestionType; 4] = [
        SuggestionType::TaskSwap,
        SuggestionType::BreakTime,
        SuggestionType::Reassignment,
        SuggestionType::SkillTraining,
    ];
}

/// Implementation effort tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

/// An improvement suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Suggestion category.
    pub suggestion_type: SuggestionType,
    /// Free-text description.
    pub description: String,
    /// Estimated efficiency gain (0.0–1.0).
    pub estimated_improvement: f64,
    /// Effort tier.
    pub effort: EffortLevel,
    /// How to put the suggestion into practice.
    pub implementation: String,
}

/// How far a search progressed before it returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProgress {
    /// Local-search iterations run (simulated annealing).
    pub iterations: usize,
    /// Generations run (genetic search).
    pub generations: usize,
    /// Wall-clock time spent (ms).
    pub elapsed_ms: u64,
    /// Whether the time limit cut the search short.
    pub timed_out: bool,
}

/// The outcome of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// Objective scores of the final assignment set.
    pub scores: ObjectiveScores,
    /// Audit violations.
    pub violations: Vec<ConstraintViolation>,
    /// Ranked suggestions (at most five).
    pub suggestions: Vec<Suggestion>,
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// Strategy that produced the assignments.
    pub algorithm: String,
    /// Configuration the run used.
    pub parameters: OptimizationConfig,
    /// Search progress annotation.
    pub progress: SearchProgress,
}

impl OptimizationResult {
    /// Number of hard-constraint violations.
    pub fn hard_violation_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Hard)
            .count()
    }

    /// Whether no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.hard_violation_count() == 0
    }
}
