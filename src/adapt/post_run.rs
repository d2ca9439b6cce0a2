//! Post-run adaptation engine.
//!
//! T110: Implement overachiever branch (recovery insert / long run boost)
//! T111: Implement underachiever missed-volume redistribution

use chrono::{Duration, NaiveDate};

use super::types::SessionAdjustment;
use crate::plan::{PerceivedEffort, RunType, TrainingPlan, TrainingSession};

/// Completion ratio above which a run counts as an overachievement.
const OVERACHIEVE_RATIO: f64 = 1.20;

/// Completion ratio below which a run counts as an underachievement.
const UNDERACHIEVE_RATIO: f64 = 0.80;

/// Boost applied to an upcoming long run after a strong easy run.
const LONG_RUN_BOOST: f64 = 1.05;

/// Share of missed volume that gets pushed onto later sessions.
const REDISTRIBUTE_SHARE: f64 = 0.8;

/// Fixed divisor for the missed-volume split. Intentionally not the count of
/// sessions found: with fewer than three eligible sessions some volume is
/// never redistributed.
const REDISTRIBUTE_SPLIT: f64 = 3.0;

/// How many upcoming sessions to scan for a long run to boost.
const BOOST_WINDOW: usize = 5;

/// How many upcoming sessions to scan for redistribution targets.
const REDISTRIBUTE_WINDOW: usize = 10;

/// Maximum number of sessions the missed volume is spread over.
const REDISTRIBUTE_TARGETS: usize = 3;

/// Propose adjustments to future sessions after a completed run.
///
/// Pure: reads the plan snapshot and returns proposals without mutating
/// anything. Returns an empty list during the taper, when the session has no
/// recorded distance, or when it carried no target.
pub fn adapt_plan(
    plan: &TrainingPlan,
    completed: &TrainingSession,
    effort: PerceivedEffort,
    today: NaiveDate,
) -> Vec<SessionAdjustment> {
    if plan.is_taper_locked(today) {
        tracing::debug!("Taper locked - skipping adaptation");
        return Vec::new();
    }
    let Some(actual) = completed.actual_distance else {
        return Vec::new();
    };
    if completed.target_distance <= 0.0 {
        return Vec::new();
    }

    let ratio = actual / completed.target_distance;
    if ratio > OVERACHIEVE_RATIO {
        overachiever_adjustments(plan, completed, effort)
    } else if ratio < UNDERACHIEVE_RATIO {
        underachiever_adjustments(plan, completed, actual)
    } else {
        Vec::new()
    }
}

/// Strong run: guard against back-to-back hard days, otherwise reward an
/// easy effort with a slightly longer upcoming long run.
fn overachiever_adjustments(
    plan: &TrainingPlan,
    completed: &TrainingSession,
    effort: PerceivedEffort,
) -> Vec<SessionAdjustment> {
    let yesterday_was_hard = plan
        .session_on(completed.date - Duration::days(1))
        .is_some_and(|s| {
            s.is_completed && s.perceived_effort.is_some_and(|e| e >= PerceivedEffort::Hard)
        });

    if yesterday_was_hard {
        if let Some(next) = plan.scheduled_after(completed.date).next() {
            return vec![SessionAdjustment {
                session_id: next.id,
                new_target_distance: Some(0.0),
                new_run_type: Some(RunType::Recovery),
                reason: "Back-to-back hard efforts, recovery recommended".to_string(),
            }];
        }
        return Vec::new();
    }

    if effort <= PerceivedEffort::Moderate {
        let next_long = plan
            .scheduled_after(completed.date)
            .take(BOOST_WINDOW)
            .find(|s| s.run_type == RunType::LongRun);
        if let Some(long_run) = next_long {
            let boost_pct = (LONG_RUN_BOOST - 1.0) * 100.0;
            return vec![SessionAdjustment {
                session_id: long_run.id,
                new_target_distance: Some(long_run.target_distance * LONG_RUN_BOOST),
                new_run_type: None,
                reason: format!(
                    "Strong run at {} effort - boosting your next long run by {boost_pct:.0}%",
                    effort
                ),
            }];
        }
    }

    // Hard effort without a hard day before it: hold the plan as written
    Vec::new()
}

/// Short run: push most of the missed volume onto the next few easy days.
fn underachiever_adjustments(
    plan: &TrainingPlan,
    completed: &TrainingSession,
    actual: f64,
) -> Vec<SessionAdjustment> {
    let missed_volume = completed.target_distance - actual;
    let add_on = missed_volume * REDISTRIBUTE_SHARE / REDISTRIBUTE_SPLIT;

    plan.scheduled_after(completed.date)
        .take(REDISTRIBUTE_WINDOW)
        .filter(|s| matches!(s.run_type, RunType::Recovery | RunType::Base))
        .take(REDISTRIBUTE_TARGETS)
        .map(|session| SessionAdjustment {
            session_id: session.id,
            new_target_distance: Some(session.target_distance + add_on),
            new_run_type: None,
            reason: format!(
                "Making up {missed_volume:.1} mi of missed volume (+{add_on:.2} mi)"
            ),
        })
        .collect()
}
