//! Training calendar generation.
//!
//! T106: Implement per-week run type assignment by phase
//! T107: Implement weekly slot ordering (long run late, speed mid-week)
//! T108: Implement weighted mileage distribution with long run cap

use chrono::Duration;

use super::phases::PhaseSchedule;
use super::types::{RaceDistance, RunType, TrainingPhase, TrainingPlan, TrainingSession};

/// Generate the full day-by-day session calendar for a plan.
///
/// Produces exactly `total_weeks * 7` sessions, one per calendar day from the
/// start date, including explicit rest days. A horizon under two weeks yields
/// no sessions; callers must handle the empty plan themselves.
pub fn generate_sessions(plan: &TrainingPlan) -> Vec<TrainingSession> {
    let total_weeks = plan.total_weeks();
    if total_weeks < 2 {
        tracing::info!(
            "Horizon of {total_weeks} week(s) is too short to plan - no sessions generated"
        );
        return Vec::new();
    }

    let schedule = PhaseSchedule::allocate(total_weeks, plan.race_distance);
    let mut sessions = Vec::with_capacity(total_weeks * 7);

    for week in 0..total_weeks {
        let phase = schedule.phase_for_week(week);
        let volume = schedule.weekly_volume(plan.weekly_mileage, plan.race_distance, week);
        sessions.extend(build_week(plan, week, phase, volume));
    }

    tracing::info!(
        "Generated {} sessions across {} weeks for a {}",
        sessions.len(),
        total_weeks,
        plan.race_distance
    );
    sessions
}

/// Lay out one week: rest days first, then typed and weighted run days.
fn build_week(
    plan: &TrainingPlan,
    week: usize,
    phase: TrainingPhase,
    volume: f64,
) -> Vec<TrainingSession> {
    let mut days: Vec<Option<TrainingSession>> = Vec::with_capacity(7);
    let mut available: Vec<usize> = Vec::with_capacity(7);

    for day in 0..7 {
        let date = plan.start_date + Duration::days((week * 7 + day) as i64);
        if plan.is_rest_day(date) {
            days.push(Some(TrainingSession::new(date, RunType::Rest, 0.0)));
        } else {
            days.push(None);
            available.push(day);
        }
    }

    if !available.is_empty() {
        let raw = assign_run_types(phase, available.len());
        let ordered = order_week(&raw, available.len());
        let distances = distribute_mileage(&ordered, volume, plan.race_distance);

        for (slot, &day) in available.iter().enumerate() {
            let date = plan.start_date + Duration::days((week * 7 + day) as i64);
            days[day] = Some(TrainingSession::new(date, ordered[slot], distances[slot]));
        }
    }

    days.into_iter().flatten().collect()
}

/// Run types for a week, by phase, given `n` available (non-rest) days.
///
/// Returned in assignment priority order; `order_week` maps them to slots.
fn assign_run_types(phase: TrainingPhase, n: usize) -> Vec<RunType> {
    let mut types = vec![RunType::LongRun];
    let filler = match phase {
        TrainingPhase::Base => {
            if n > 2 {
                types.push(RunType::Recovery);
            }
            RunType::Base
        }
        TrainingPhase::Build => {
            if n > 1 {
                types.push(RunType::SpeedWork);
            }
            if n > 3 {
                types.push(RunType::Recovery);
            }
            RunType::Base
        }
        TrainingPhase::Peak => {
            if n > 1 {
                types.push(RunType::SpeedWork);
            }
            if n > 2 {
                types.push(RunType::Tempo);
            }
            if n > 4 {
                types.push(RunType::Recovery);
            }
            RunType::Base
        }
        TrainingPhase::Taper => {
            if n > 2 {
                types.push(RunType::SpeedWork);
            }
            RunType::Recovery
        }
    };

    while types.len() < n {
        types.push(filler);
    }
    types.truncate(n);
    types
}

/// Place a type at its preferred slot, falling back to the first free one.
fn place(slots: &mut [Option<RunType>], desired: usize, run_type: RunType) -> usize {
    let slot = if desired < slots.len() && slots[desired].is_none() {
        desired
    } else {
        slots
            .iter()
            .position(|s| s.is_none())
            .unwrap_or(slots.len() - 1)
    };
    slots[slot] = Some(run_type);
    slot
}

/// Re-sequence a week's types onto day slots.
///
/// The long run lands on the second-to-last available slot, speed work
/// mid-week, tempo immediately after speed work, and the remaining easy days
/// fill the untouched slots in their original order.
fn order_week(raw: &[RunType], n: usize) -> Vec<RunType> {
    let mut slots: Vec<Option<RunType>> = vec![None; n];

    place(&mut slots, n.saturating_sub(2), RunType::LongRun);

    let speed_slot = if raw.contains(&RunType::SpeedWork) {
        let desired = if n > 3 { 2 } else { (n - 1).min(1) };
        Some(place(&mut slots, desired, RunType::SpeedWork))
    } else {
        None
    };

    if raw.contains(&RunType::Tempo) {
        let desired = speed_slot.map_or(0, |s| s + 1).min(n - 1);
        place(&mut slots, desired, RunType::Tempo);
    }

    let mut remaining = raw
        .iter()
        .filter(|t| {
            !matches!(
                t,
                RunType::LongRun | RunType::SpeedWork | RunType::Tempo
            )
        })
        .copied();
    for slot in slots.iter_mut() {
        if slot.is_none() {
            *slot = remaining.next();
        }
    }

    slots.into_iter().map(|s| s.unwrap_or(RunType::Base)).collect()
}

/// Split the week's volume across its run days by type weight.
///
/// Weights are normalized over the types actually assigned; a zero total
/// weight yields all-zero distances rather than a division fault. The long
/// run is clamped to the race's cap, with the excess spread evenly over the
/// week's base and recovery days (or dropped when the week has none).
fn distribute_mileage(types: &[RunType], volume: f64, race_distance: RaceDistance) -> Vec<f64> {
    let weights: Vec<f64> = types.iter().map(|t| t.mileage_weight()).collect();
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= f64::EPSILON {
        return vec![0.0; types.len()];
    }

    let mut distances: Vec<f64> = weights
        .iter()
        .map(|w| volume * w / total_weight)
        .collect();

    if let Some(long_idx) = types.iter().position(|t| *t == RunType::LongRun) {
        let cap = race_distance.long_run_cap_miles();
        if distances[long_idx] > cap {
            let excess = distances[long_idx] - cap;
            distances[long_idx] = cap;

            let easy_days: Vec<usize> = types
                .iter()
                .enumerate()
                .filter(|(_, t)| matches!(t, RunType::Base | RunType::Recovery))
                .map(|(i, _)| i)
                .collect();
            if !easy_days.is_empty() {
                let share = excess / easy_days.len() as f64;
                for idx in easy_days {
                    distances[idx] += share;
                }
            }
        }
    }

    for (distance, run_type) in distances.iter_mut().zip(types) {
        *distance = if run_type.counts_as_mileage() {
            round_quarter(*distance)
        } else {
            0.0
        };
    }
    distances
}

/// Round to the nearest quarter mile for practical prescribability.
fn round_quarter(miles: f64) -> f64 {
    (miles * 4.0).round() / 4.0
}
