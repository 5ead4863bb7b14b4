//! Workforce assignment domain models.
//!
//! Provides the data types for representing an assignment problem (a
//! department's day of slots, workers and tasks) and its solution (the
//! assignment list plus the optimization result).
//!
//! # Domain Mappings
//!
//! | u-workforce | Warehouse | Hospital ward | Field service |
//! |-------------|-----------|---------------|---------------|
//! | TimeSlot | Half-hour block | Shift block | Dispatch window |
//! | WorkerAvailability | Picker/Driver | Nurse | Technician |
//! | Task | Picking/Loading | Ward round | Job ticket |
//! | Grid | Daily floor plan | Ward roster | Dispatch board |

mod assignment;
mod constraint;
mod grid;
mod result;
mod task;
mod time_slot;
mod worker;

pub use assignment::{Assignment, OPTIMAL_THRESHOLD};
pub(crate) use assignment::clamp_unit;
pub use constraint::{Constraint, ConstraintType, Severity};
pub use grid::Grid;
pub use result::{
    ConstraintViolation, EffortLevel, ObjectiveScores, OptimizationResult, SearchProgress,
    Suggestion, SuggestionType,
};
pub use task::{Priority, SkillRequirement, Task};
pub use time_slot::{TimeOfDay, TimeSlot, DEFAULT_SLOT_MINUTES};
pub use worker::{WorkerAvailability, WorkerSkill, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
