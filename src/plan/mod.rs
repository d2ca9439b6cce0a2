//! Training plan module.
//!
//! Owns the plan entity graph and the backwards-planning scheduler that
//! turns a race intent into a day-by-day session calendar:
//! - Domain types (race distances, run types, phases, sessions, plans)
//! - Phase allocation and weekly volume curves
//! - Day assignment and mileage distribution

pub mod generator;
pub mod phases;
pub mod types;

pub use generator::generate_sessions;
pub use phases::PhaseSchedule;
pub use types::{
    PerceivedEffort, PlanError, RaceDistance, RunType, TrainingPhase, TrainingPlan,
    TrainingSession, WeekSummary,
};
