//! Adjustment applier.
//!
//! T114: Commit proposed adjustments into the session graph

use super::types::SessionAdjustment;
use crate::plan::TrainingPlan;

/// Commit a batch of proposed adjustments.
///
/// Each adjustment is looked up by session id; non-nil fields overwrite the
/// session's target distance and run type. Stale adjustments whose session no
/// longer exists are skipped and the rest of the batch continues.
pub fn apply_adjustments(adjustments: &[SessionAdjustment], plan: &mut TrainingPlan) {
    let mut applied = 0usize;

    for adjustment in adjustments {
        let Some(session) = plan.session_mut(adjustment.session_id) else {
            tracing::debug!(
                "Skipping stale adjustment for session {}",
                adjustment.session_id
            );
            continue;
        };

        if let Some(distance) = adjustment.new_target_distance {
            session.target_distance = distance;
        }
        if let Some(run_type) = adjustment.new_run_type {
            session.run_type = run_type;
        }
        applied += 1;
    }

    if applied > 0 {
        tracing::info!("Applied {applied} of {} adjustments", adjustments.len());
    }
}
