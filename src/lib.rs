//! RustRun - Race Training Plan Engine
//!
//! Turns a single race intent ("run a half marathon on date D, currently
//! averaging M miles per week") into a day-by-day training calendar, then
//! re-plans that calendar as real performance data arrives. The engine is
//! synchronous, in-memory, and side-effect-free outside its explicit
//! mutation entry points; persistence, notifications, and UI belong to the
//! surrounding application.

pub mod adapt;
pub mod plan;
pub mod scoring;

// Re-export commonly used types
pub use adapt::{
    adapt_plan, apply_adjustments, can_shift_schedule, pre_run_adjustment,
    redistribute_reduction, shift_schedule, PreRunAdjustment, SessionAdjustment,
};
pub use plan::{
    generate_sessions, PerceivedEffort, PlanError, RaceDistance, RunType, TrainingPhase,
    TrainingPlan, TrainingSession,
};
pub use scoring::{calculate_compliance_score, calculate_confidence_score};
