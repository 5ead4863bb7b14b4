//! Built-in constraint rules.
//!
//! One rule per [`ConstraintType`]. None of them enforces anything yet:
//! each reports no violations until a real check is installed in its slot.
//!
//! # Categories
//!
//! - **Competence**: skill, qualification
//! - **Working time**: continuous work, rest, labor law
//! - **Workplace**: equipment, safety
//! - **People**: preference

use std::sync::Arc;

use super::ConstraintRule;
use crate::models::{Constraint, ConstraintType, ConstraintViolation, Grid};

/// Skill requirement rule.
#[derive(Debug, Clone, Copy)]
pub struct SkillRule;

impl ConstraintRule for SkillRule {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn check(&self, _constraint: &Constraint, _grid: &Grid) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    fn description(&self) -> &'static str {
        "Worker meets the task's skill requirements"
    }
}

/// Qualification rule.
#[derive(Debug, Clone, Copy)]
pub struct QualificationRule;

impl ConstraintRule for QualificationRule {
    fn name(&self) -> &'static str {
        "qualification"
    }

    fn check(&self, _constraint: &Constraint, _grid: &Grid) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    fn description(&self) -> &'static str {
        "Worker holds the task's qualifications"
    }
}

/// Continuous working time rule.
#[derive(Debug, Clone, Copy)]
pub struct ContinuousWorkRule;

impl ConstraintRule for ContinuousWorkRule {
    fn name(&self) -> &'static str {
        "continuous_work"
    }

    fn check(&self, _constraint: &Constraint, _grid: &Grid) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    fn description(&self) -> &'static str {
        "Uninterrupted work stays within the limit"
    }
}

/// Rest period rule.
#[derive(Debug, Clone, Copy)]
pub struct RestRule;

impl ConstraintRule for RestRule {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn check(&self, _constraint: &Constraint, _grid: &Grid) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    fn description(&self) -> &'static str {
        "Minimum rest between working stretches"
    }
}

/// Equipment availability rule.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentRule;

impl ConstraintRule for EquipmentRule {
    fn name(&self) -> &'static str {
        "equipment"
    }

    fn check(&self, _constraint: &Constraint, _grid: &Grid) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    fn description(&self) -> &'static str {
        "Required equipment is available"
    }
}

/// Worker preference rule.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceRule;

impl ConstraintRule for PreferenceRule {
    fn name(&self) -> &'static str {
        "preference"
    }

    fn check(&self, _constraint: &Constraint, _grid: &Grid) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    fn description(&self) -> &'static str {
        "Assignments respect worker preferences"
    }
}

/// Hazardous work safety rule.
#[derive(Debug, Clone, Copy)]
pub struct SafetyRule;

impl ConstraintRule for SafetyRule {
    fn name(&self) -> &'static str {
        "safety"
    }

    fn check(&self, _constraint: &Constraint, _grid: &Grid) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    fn description(&self) -> &'static str {
        "Hazardous work follows safety rules"
    }
}

/// Statutory labor rule.
#[derive(Debug, Clone, Copy)]
pub struct LaborLawRule;

impl ConstraintRule for LaborLawRule {
    fn name(&self) -> &'static str {
        "labor_law"
    }

    fn check(&self, _constraint: &Constraint, _grid: &Grid) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    fn description(&self) -> &'static str {
        "Statutory working-time rules"
    }
}

/// Built-in rule for a constraint type.
pub fn default_rule(constraint_type: ConstraintType) -> Arc<dyn ConstraintRule> {
    match constraint_type {
        ConstraintType::Skill => Arc::new(SkillRule),
        ConstraintType::Qualification => Arc::new(QualificationRule),
        ConstraintType::ContinuousWork => Arc::new(ContinuousWorkRule),
        ConstraintType::Rest => Arc::new(RestRule),
        ConstraintType::Equipment => Arc::new(EquipmentRule),
        ConstraintType::Preference => Arc::new(PreferenceRule),
        ConstraintType::Safety => Arc::new(SafetyRule),
        ConstraintType::LaborLaw => Arc::new(LaborLawRule),
    }
}
