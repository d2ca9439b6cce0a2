//! Unit tests for post-run adaptation, pre-run adjustment, and the applier.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use rustrun::{
    adapt_plan, apply_adjustments, pre_run_adjustment, redistribute_reduction, PerceivedEffort,
    RaceDistance, RunType, TrainingPlan, TrainingSession,
};

/// 12-week half marathon plan starting Monday 2026-03-02, sessions added by
/// hand so each scenario controls its own calendar.
fn create_test_plan() -> TrainingPlan {
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    TrainingPlan::new(
        RaceDistance::HalfMarathon,
        start + Duration::weeks(12),
        start,
        20.0,
        8.0,
        vec![],
    )
    .expect("Should build plan")
}

fn add_session(plan: &mut TrainingPlan, date: NaiveDate, run_type: RunType, target: f64) -> Uuid {
    let session = TrainingSession::new(date, run_type, target);
    let id = session.id;
    plan.sessions.push(session);
    id
}

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

#[test]
fn test_taper_lock_blocks_adaptation() {
    let mut plan = create_test_plan();
    // Week 10 of 12 falls inside the two-week half marathon taper
    let taper_day = plan.start_date + Duration::weeks(10);
    let id = add_session(&mut plan, taper_day, RunType::Base, 5.0);
    add_session(&mut plan, taper_day + Duration::days(2), RunType::LongRun, 8.0);
    plan.complete_session(id, 7.5, PerceivedEffort::Easy, None)
        .unwrap();

    let completed = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &completed, PerceivedEffort::Easy, taper_day);

    assert!(adjustments.is_empty());
    assert!(plan.is_taper_locked(taper_day));
}

#[test]
fn test_missing_actual_distance_no_ops() {
    let mut plan = create_test_plan();
    let id = add_session(&mut plan, day(10), RunType::Base, 5.0);
    add_session(&mut plan, day(12), RunType::LongRun, 10.0);

    // Session never recorded an actual distance
    let unrecorded = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &unrecorded, PerceivedEffort::Easy, day(10));

    assert!(adjustments.is_empty());
}

#[test]
fn test_on_target_run_leaves_plan_alone() {
    let mut plan = create_test_plan();
    let id = add_session(&mut plan, day(10), RunType::Base, 5.0);
    add_session(&mut plan, day(11), RunType::Base, 4.0);
    plan.complete_session(id, 5.2, PerceivedEffort::Moderate, None)
        .unwrap();

    let completed = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &completed, PerceivedEffort::Moderate, day(10));

    assert!(adjustments.is_empty());
}

#[test]
fn test_overachiever_easy_effort_boosts_long_run() {
    let mut plan = create_test_plan();
    let id = add_session(&mut plan, day(10), RunType::Base, 5.0);
    add_session(&mut plan, day(11), RunType::Base, 4.0);
    let long_id = add_session(&mut plan, day(14), RunType::LongRun, 10.0);
    plan.complete_session(id, 6.5, PerceivedEffort::Easy, None)
        .unwrap();

    let completed = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &completed, PerceivedEffort::Easy, day(10));

    assert_eq!(adjustments.len(), 1);
    assert_eq!(adjustments[0].session_id, long_id);
    assert!((adjustments[0].new_target_distance.unwrap() - 10.5).abs() < 1e-9);
    assert!(adjustments[0].reason.contains("5%"));
}

#[test]
fn test_overachiever_boost_window_is_five_sessions() {
    let mut plan = create_test_plan();
    let id = add_session(&mut plan, day(10), RunType::Base, 5.0);
    // Six easy sessions push the long run past the scan window
    for offset in 11..17 {
        add_session(&mut plan, day(offset), RunType::Base, 4.0);
    }
    add_session(&mut plan, day(17), RunType::LongRun, 10.0);
    plan.complete_session(id, 6.5, PerceivedEffort::Easy, None)
        .unwrap();

    let completed = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &completed, PerceivedEffort::Easy, day(10));

    assert!(adjustments.is_empty());
}

#[test]
fn test_back_to_back_hard_efforts_insert_recovery() {
    let mut plan = create_test_plan();
    let yesterday_id = add_session(&mut plan, day(9), RunType::SpeedWork, 4.0);
    let id = add_session(&mut plan, day(10), RunType::Base, 5.0);
    let next_id = add_session(&mut plan, day(11), RunType::Tempo, 6.0);
    add_session(&mut plan, day(14), RunType::LongRun, 10.0);

    plan.complete_session(yesterday_id, 4.0, PerceivedEffort::Hard, None)
        .unwrap();
    plan.complete_session(id, 6.5, PerceivedEffort::Easy, None)
        .unwrap();

    let completed = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &completed, PerceivedEffort::Easy, day(10));

    assert_eq!(adjustments.len(), 1);
    assert_eq!(adjustments[0].session_id, next_id);
    assert_eq!(adjustments[0].new_run_type, Some(RunType::Recovery));
    assert_eq!(adjustments[0].new_target_distance, Some(0.0));
}

#[test]
fn test_overachiever_hard_effort_holds_the_plan() {
    let mut plan = create_test_plan();
    let id = add_session(&mut plan, day(10), RunType::Base, 5.0);
    add_session(&mut plan, day(14), RunType::LongRun, 10.0);
    plan.complete_session(id, 6.5, PerceivedEffort::Hard, None)
        .unwrap();

    // Overachieving on a hard effort with no hard day before it: no boost,
    // no recovery insert
    let completed = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &completed, PerceivedEffort::Hard, day(10));

    assert!(adjustments.is_empty());
}

#[test]
fn test_underachiever_redistributes_missed_volume() {
    let mut plan = create_test_plan();
    let id = add_session(&mut plan, day(10), RunType::LongRun, 8.0);
    let first = add_session(&mut plan, day(11), RunType::Base, 4.0);
    let second = add_session(&mut plan, day(12), RunType::Recovery, 3.0);
    add_session(&mut plan, day(13), RunType::SpeedWork, 4.0);
    let third = add_session(&mut plan, day(14), RunType::Base, 5.0);
    plan.complete_session(id, 4.0, PerceivedEffort::Hard, None)
        .unwrap();

    let completed = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &completed, PerceivedEffort::Hard, day(10));

    // missed 4.0 mi -> 3.2 redistributed -> 1.0667 per session
    let add_on = 4.0 * 0.8 / 3.0;
    assert_eq!(adjustments.len(), 3);
    assert_eq!(
        adjustments.iter().map(|a| a.session_id).collect::<Vec<_>>(),
        vec![first, second, third]
    );
    assert!((adjustments[0].new_target_distance.unwrap() - (4.0 + add_on)).abs() < 1e-9);
    assert!((adjustments[1].new_target_distance.unwrap() - (3.0 + add_on)).abs() < 1e-9);
    assert!((adjustments[2].new_target_distance.unwrap() - (5.0 + add_on)).abs() < 1e-9);
}

#[test]
fn test_underachiever_split_keeps_fixed_divisor() {
    let mut plan = create_test_plan();
    let id = add_session(&mut plan, day(10), RunType::Base, 8.0);
    let only = add_session(&mut plan, day(11), RunType::Base, 4.0);
    add_session(&mut plan, day(12), RunType::SpeedWork, 4.0);
    plan.complete_session(id, 4.0, PerceivedEffort::Moderate, None)
        .unwrap();

    let completed = plan.session(id).unwrap().clone();
    let adjustments = adapt_plan(&plan, &completed, PerceivedEffort::Moderate, day(10));

    // Only one eligible session, but the divisor stays at 3: part of the
    // missed volume is deliberately never redistributed
    assert_eq!(adjustments.len(), 1);
    assert_eq!(adjustments[0].session_id, only);
    let add_on = 4.0 * 0.8 / 3.0;
    assert!((adjustments[0].new_target_distance.unwrap() - (4.0 + add_on)).abs() < 1e-9);
}

#[test]
fn test_pre_run_low_feeling_halves_distance() {
    let session = TrainingSession::new(day(10), RunType::Base, 8.0);
    let adjustment = pre_run_adjustment(&session, 0.1);

    assert_eq!(adjustment.adjusted_distance, 4.0);
    assert!(!adjustment.message.is_empty());
}

#[test]
fn test_pre_run_reduction_redistributes_deficit() {
    let mut plan = create_test_plan();
    let id = add_session(&mut plan, day(10), RunType::Base, 10.0);
    let first = add_session(&mut plan, day(11), RunType::Recovery, 3.0);
    add_session(&mut plan, day(12), RunType::SpeedWork, 4.0);
    let second = add_session(&mut plan, day(13), RunType::LongRun, 9.0);

    let session = plan.session(id).unwrap().clone();
    let adjustment = pre_run_adjustment(&session, 0.3);
    // Bottom of the middle band: full 20% reduction
    assert!((adjustment.adjusted_distance - 8.0).abs() < 1e-9);

    let adjustments =
        redistribute_reduction(&plan, &session, session.target_distance, adjustment.adjusted_distance);

    // 2.0 mi deficit split across the two eligible sessions found
    assert_eq!(adjustments.len(), 2);
    assert_eq!(adjustments[0].session_id, first);
    assert!((adjustments[0].new_target_distance.unwrap() - 4.0).abs() < 1e-9);
    assert_eq!(adjustments[1].session_id, second);
    assert!((adjustments[1].new_target_distance.unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn test_apply_adjustments_commits_and_skips_stale() {
    let mut plan = create_test_plan();
    let target_id = add_session(&mut plan, day(11), RunType::Base, 4.0);

    let adjustments = vec![
        rustrun::SessionAdjustment {
            session_id: target_id,
            new_target_distance: Some(5.5),
            new_run_type: Some(RunType::Recovery),
            reason: "test".to_string(),
        },
        rustrun::SessionAdjustment {
            session_id: Uuid::new_v4(),
            new_target_distance: Some(99.0),
            new_run_type: None,
            reason: "stale".to_string(),
        },
    ];

    apply_adjustments(&adjustments, &mut plan);

    let session = plan.session(target_id).unwrap();
    assert_eq!(session.target_distance, 5.5);
    assert_eq!(session.run_type, RunType::Recovery);
    // The stale adjustment changed nothing and did not abort the batch
    assert_eq!(plan.sessions.len(), 1);
}
