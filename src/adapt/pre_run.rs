//! Pre-run check-in adjustment.
//!
//! T112: Implement feeling-score distance adjustment bands
//! T113: Implement deficit redistribution onto nearby easy sessions

use super::types::{PreRunAdjustment, SessionAdjustment};
use crate::plan::{RunType, TrainingPlan, TrainingSession};

/// Feeling score at or above which the plan stands as written.
const FEELING_GOOD: f64 = 0.7;

/// Feeling score below which today becomes a half-distance effort.
const FEELING_LOW: f64 = 0.3;

/// Largest reduction the middle band applies (20%).
const MAX_REDUCTION: f64 = 0.2;

/// Deficits at or under this many miles are not worth redistributing.
const REDISTRIBUTE_THRESHOLD: f64 = 0.25;

/// How many upcoming sessions to scan for redistribution targets.
const REDISTRIBUTE_WINDOW: usize = 5;

/// Maximum number of sessions the deficit is spread over.
const REDISTRIBUTE_TARGETS: usize = 2;

/// Adjust today's target based on how the runner feels, 0.0 (terrible) to
/// 1.0 (great).
///
/// Pure: returns the adjusted distance and a coaching message; nothing is
/// committed here.
pub fn pre_run_adjustment(session: &TrainingSession, feeling_score: f64) -> PreRunAdjustment {
    let target = session.target_distance;

    if feeling_score >= FEELING_GOOD {
        return PreRunAdjustment {
            adjusted_distance: target,
            message: "Feeling good - stick to the plan.".to_string(),
        };
    }

    if feeling_score >= FEELING_LOW {
        // Linear ramp: 0% reduction at 0.7 down to 20% at 0.3
        let reduction_factor =
            1.0 - ((FEELING_GOOD - feeling_score) / (FEELING_GOOD - FEELING_LOW)) * MAX_REDUCTION;
        let adjusted = target * reduction_factor;
        return PreRunAdjustment {
            adjusted_distance: adjusted,
            message: format!(
                "Dialing today back to {adjusted:.1} mi; the difference will shift to your next easy session."
            ),
        };
    }

    let adjusted = target * 0.5;
    PreRunAdjustment {
        adjusted_distance: adjusted,
        message: format!(
            "Cutting today to {adjusted:.1} mi - consider an easy recovery jog or a full rest day instead."
        ),
    }
}

/// Push a pre-run reduction onto the next easy sessions.
///
/// The deficit between the original and adjusted targets is split evenly
/// across up to the next two base, recovery, or long run sessions found in
/// the upcoming window. Small deficits are absorbed rather than shuffled.
pub fn redistribute_reduction(
    plan: &TrainingPlan,
    session: &TrainingSession,
    original_target: f64,
    adjusted_target: f64,
) -> Vec<SessionAdjustment> {
    let deficit = original_target - adjusted_target;
    if deficit <= REDISTRIBUTE_THRESHOLD {
        return Vec::new();
    }

    let targets: Vec<&TrainingSession> = plan
        .scheduled_after(session.date)
        .take(REDISTRIBUTE_WINDOW)
        .filter(|s| {
            matches!(
                s.run_type,
                RunType::Base | RunType::Recovery | RunType::LongRun
            )
        })
        .take(REDISTRIBUTE_TARGETS)
        .collect();
    if targets.is_empty() {
        return Vec::new();
    }

    let share = deficit / targets.len() as f64;
    targets
        .into_iter()
        .map(|s| SessionAdjustment {
            session_id: s.id,
            new_target_distance: Some(s.target_distance + share),
            new_run_type: None,
            reason: format!("Carrying over {share:.2} mi from today's shortened run"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session_with_target(target: f64) -> TrainingSession {
        TrainingSession::new(
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            RunType::Base,
            target,
        )
    }

    #[test]
    fn test_feeling_good_keeps_plan() {
        let session = session_with_target(6.0);
        let adj = pre_run_adjustment(&session, 0.9);
        assert_eq!(adj.adjusted_distance, 6.0);
    }

    #[test]
    fn test_middle_band_interpolates() {
        let session = session_with_target(10.0);

        // At the top of the band the reduction vanishes
        let top = pre_run_adjustment(&session, 0.7);
        assert!((top.adjusted_distance - 10.0).abs() < 1e-9);

        // Midway (0.5) gives a 10% reduction
        let mid = pre_run_adjustment(&session, 0.5);
        assert!((mid.adjusted_distance - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_feeling_halves_distance() {
        let session = session_with_target(8.0);
        let adj = pre_run_adjustment(&session, 0.1);
        assert_eq!(adj.adjusted_distance, 4.0);
    }

    #[test]
    fn test_tiny_deficit_is_absorbed() {
        let plan_session = session_with_target(5.0);
        let plan = crate::plan::TrainingPlan::new(
            crate::plan::RaceDistance::TenK,
            NaiveDate::from_ymd_opt(2026, 6, 7).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            15.0,
            5.0,
            vec![],
        )
        .unwrap();

        let adjustments = redistribute_reduction(&plan, &plan_session, 5.0, 4.8);
        assert!(adjustments.is_empty());
    }
}
