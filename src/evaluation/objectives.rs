//! Weighted multi-objective evaluation.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Efficiency | Mean effective efficiency over assignments |
//! | Skill Utilization | Σ(level × eff × weight) exercised / Σ(level × eff) held |
//! | Satisfaction | 0.5 + 0.3 × preferred share + 0.2 × mean skill match, per worker |
//! | Cost Optimization | clamp(2 − actual / minimum cost, 0, 1) |
//! | Safety Compliance | Share of assignments that are not unqualified hazardous work |
//! | Overall | Weighted sum of the five |
//!
//! Every ratio guards its denominator. A grid with no workers or no tasks
//! scores zero across the board.

use std::collections::HashMap;

use crate::config::{FeatureToggles, ObjectiveWeights};
use crate::index::{Placement, ProblemIndex};
use crate::models::{Grid, ObjectiveScores};

/// Cost of one skill level for one hour of work.
pub const UNIT_COST_PER_LEVEL_HOUR: f64 = 15.0;

const SATISFACTION_BASE: f64 = 0.5;
const SATISFACTION_PREFERENCE_WEIGHT: f64 = 0.3;
const SATISFACTION_MATCH_WEIGHT: f64 = 0.2;

/// Scores placement sets against one indexed grid.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'i, 'g> {
    index: &'i ProblemIndex<'g>,
    weights: ObjectiveWeights,
}

impl<'i, 'g> Evaluator<'i, 'g> {
    /// Creates an evaluator.
    pub fn new(index: &'i ProblemIndex<'g>, weights: ObjectiveWeights) -> Self {
        Self { index, weights }
    }

    /// The underlying index.
    #[inline]
    pub fn index(&self) -> &'i ProblemIndex<'g> {
        self.index
    }

    /// Overall (weighted) score only.
    #[inline]
    pub fn overall(&self, placements: &[Placement]) -> f64 {
        self.score(placements).overall
    }

    /// Computes all five objective scores and their weighted sum.
    pub fn score(&self, placements: &[Placement]) -> ObjectiveScores {
        let index = self.index;
        if index.worker_count() == 0 || index.task_count() == 0 {
            return ObjectiveScores::default();
        }

        let efficiency = self.efficiency(placements);
        let skill_utilization = self.skill_utilization(placements);
        let satisfaction = self.satisfaction(placements);
        let cost_optimization = self.cost_optimization(placements);
        let safety_compliance = self.safety_compliance(placements);

        let w = &self.weights;
        let overall = w.efficiency * efficiency
            + w.skill_utilization * skill_utilization
            + w.satisfaction * satisfaction
            + w.cost_optimization * cost_optimization
            + w.safety_compliance * safety_compliance;

        ObjectiveScores {
            efficiency,
            skill_utilization,
            satisfaction,
            cost_optimization,
            safety_compliance,
            overall,
        }
    }

    fn efficiency(&self, placements: &[Placement]) -> f64 {
        if placements.is_empty() {
            return 0.0;
        }
        let total: f64 = placements.iter().map(|&p| self.index.efficiency(p)).sum();
        total / placements.len() as f64
    }

    fn skill_utilization(&self, placements: &[Placement]) -> f64 {
        let index = self.index;

        // worker → (skill id → highest requirement weight exercised)
        let mut exercised: Vec<HashMap<&str, f64>> = vec![HashMap::new(); index.worker_count()];
        for p in placements {
            let worker = index.worker(p.worker);
            for req in &index.task(p.task).required_skills {
                if worker.skill(&req.skill_id).is_some() {
                    let weight = exercised[p.worker]
                        .entry(req.skill_id.as_str())
                        .or_insert(0.0);
                    *weight = weight.max(req.weight);
                }
            }
        }

        let mut used = 0.0;
        let mut capacity = 0.0;
        for (w, skills) in exercised.iter().enumerate() {
            let worker = index.worker(w);
            for skill in &worker.skills {
                let potential = skill.level as f64 * skill.efficiency;
                capacity += potential;
                if let Some(weight) = skills.get(skill.skill_id.as_str()) {
                    used += potential * weight;
                }
            }
        }

        if capacity <= 0.0 {
            0.0
        } else {
            used / capacity
        }
    }

    fn satisfaction(&self, placements: &[Placement]) -> f64 {
        let index = self.index;
        let mut assigned = vec![0usize; index.worker_count()];
        let mut preferred = vec![0usize; index.worker_count()];
        let mut match_sum = vec![0.0; index.worker_count()];

        for p in placements {
            assigned[p.worker] += 1;
            if index.prefers(p.worker, p.task) {
                preferred[p.worker] += 1;
            }
            match_sum[p.worker] += index.skill_match(p.worker, p.task);
        }

        let mut total = 0.0;
        let mut counted = 0usize;
        for w in 0..index.worker_count() {
            if assigned[w] == 0 {
                continue;
            }
            let n = assigned[w] as f64;
            let score = SATISFACTION_BASE
                + SATISFACTION_PREFERENCE_WEIGHT * (preferred[w] as f64 / n)
                + SATISFACTION_MATCH_WEIGHT * (match_sum[w] / n);
            total += score.min(1.0);
            counted += 1;
        }

        if counted == 0 {
            0.0
        } else {
            total / counted as f64
        }
    }

    fn cost_optimization(&self, placements: &[Placement]) -> f64 {
        let index = self.index;
        let mut actual = 0.0;
        let mut minimum = 0.0;
        for p in placements {
            let hours = index.slot(p.slot).duration_hours();
            actual += index.worker(p.worker).average_skill_level() * UNIT_COST_PER_LEVEL_HOUR * hours;
            minimum +=
                index.task(p.task).minimum_required_level() as f64 * UNIT_COST_PER_LEVEL_HOUR * hours;
        }

        if placements.is_empty() || minimum <= 0.0 {
            return 0.0;
        }
        (2.0 - actual / minimum).clamp(0.0, 1.0)
    }

    fn safety_compliance(&self, placements: &[Placement]) -> f64 {
        if placements.is_empty() {
            return 1.0;
        }
        let index = self.index;
        let compliant = placements
            .iter()
            .filter(|p| !index.task(p.task).hazardous || index.is_qualified(p.worker, p.task))
            .count();
        compliant as f64 / placements.len() as f64
    }
}

/// Evaluates the grid's current assignment list.
///
/// Assignments with unknown references are skipped; run
/// [`validate_grid`](crate::validation::validate_grid) first to reject them.
pub fn evaluate(grid: &Grid, weights: ObjectiveWeights, features: FeatureToggles) -> ObjectiveScores {
    let index = ProblemIndex::new(grid, features);
    let placements: Vec<Placement> = grid
        .assignments
        .iter()
        .filter_map(|a| index.placement_of(a))
        .collect();
    Evaluator::new(&index, weights).score(&placements)
}
