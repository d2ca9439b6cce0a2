//! Bulk schedule shifting for life disruptions.
//!
//! T115: Implement race-date feasibility check and future-session shift

use chrono::{Duration, NaiveDate};

use crate::plan::TrainingPlan;

/// Whether every future incomplete session still lands on or before race day
/// after a shift of `days`.
///
/// Callers must check this before invoking `shift_schedule`; the shift itself
/// performs no validation. A plan with nothing left to move is always
/// shiftable.
pub fn can_shift_schedule(plan: &TrainingPlan, days: i64, today: NaiveDate) -> bool {
    let last_movable = plan
        .sessions
        .iter()
        .filter(|s| s.date >= today && !s.is_completed)
        .map(|s| s.date)
        .max();

    match last_movable {
        Some(date) => date + Duration::days(days) <= plan.race_date,
        None => true,
    }
}

/// Shift every future incomplete session by `days`, in place.
///
/// Completed sessions are never touched: history is immutable.
pub fn shift_schedule(plan: &mut TrainingPlan, days: i64, today: NaiveDate) {
    let mut shifted = 0usize;
    for session in plan
        .sessions
        .iter_mut()
        .filter(|s| s.date >= today && !s.is_completed)
    {
        session.date += Duration::days(days);
        shifted += 1;
    }
    tracing::info!("Shifted {shifted} upcoming sessions by {days} day(s)");
}
