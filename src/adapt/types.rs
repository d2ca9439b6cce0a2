//! Adaptation proposal types.
//!
//! T109: Define SessionAdjustment propose/apply contract

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::RunType;

/// A proposed mutation to a future session.
///
/// Adjustments are advisory until committed by `apply_adjustments`; the
/// propose functions never touch the plan themselves, so a caller can
/// preview a batch before accepting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAdjustment {
    /// Target session
    pub session_id: Uuid,
    /// Replacement target distance, if changing
    pub new_target_distance: Option<f64>,
    /// Replacement run type, if changing
    pub new_run_type: Option<RunType>,
    /// Human-readable justification shown to the runner
    pub reason: String,
}

/// Outcome of a pre-run check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreRunAdjustment {
    /// Today's distance after accounting for how the runner feels
    pub adjusted_distance: f64,
    /// Coaching message explaining the adjustment
    pub message: String,
}
