//! Compliance and confidence scoring.
//!
//! T116: Implement rolling 7-day compliance score
//! T117: Implement cumulative confidence score

use chrono::{Duration, NaiveDate};

use crate::plan::{RunType, TrainingPlan};

/// Days covered by the rolling compliance window.
const COMPLIANCE_WINDOW_DAYS: i64 = 7;

/// Completion ratios are capped here before normalizing, so overperformance
/// tops out at a perfect score instead of inflating past it.
const OVERPERFORMANCE_CAP: f64 = 1.5;

/// Neutral score used when there is not enough data to judge.
const NEUTRAL_SCORE: f64 = 0.5;

const COMPLETION_WEIGHT: f64 = 0.5;
const VOLUME_WEIGHT: f64 = 0.3;
const PROGRESS_WEIGHT: f64 = 0.2;

/// Adherence over the trailing seven days, in [0, 1].
///
/// Rest days are excluded. Skipped and missed sessions score zero, sessions
/// that have not happened yet score neutral, completed sessions score their
/// capped completion ratio. An empty window is full compliance.
pub fn calculate_compliance_score(plan: &TrainingPlan, today: NaiveDate) -> f64 {
    let window_start = today - Duration::days(COMPLIANCE_WINDOW_DAYS - 1);

    let scores: Vec<f64> = plan
        .sessions
        .iter()
        .filter(|s| s.date >= window_start && s.date <= today)
        .filter(|s| s.run_type != RunType::Rest)
        .map(|s| {
            if s.is_skipped {
                0.0
            } else if s.is_completed {
                s.completion_ratio()
                    .map_or(NEUTRAL_SCORE, |r| r.min(OVERPERFORMANCE_CAP) / OVERPERFORMANCE_CAP)
            } else if s.date < today {
                0.0
            } else {
                NEUTRAL_SCORE
            }
        })
        .collect();

    if scores.is_empty() {
        return 1.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Cumulative race readiness, in [0, 1].
///
/// Blends the completion rate over past scheduled runs, the capped volume
/// accuracy of completed runs, and overall plan progress. With no past
/// scheduled runs yet there is nothing to judge, so the score is neutral.
pub fn calculate_confidence_score(plan: &TrainingPlan, today: NaiveDate) -> f64 {
    let past_runs: Vec<_> = plan
        .sessions
        .iter()
        .filter(|s| s.run_type.counts_as_mileage() && s.date < today)
        .collect();
    if past_runs.is_empty() {
        return NEUTRAL_SCORE;
    }

    let completed = past_runs.iter().filter(|s| s.is_completed).count();
    let completion_rate = completed as f64 / past_runs.len() as f64;

    let ratios: Vec<f64> = plan
        .sessions
        .iter()
        .filter(|s| s.is_completed)
        .filter_map(|s| s.completion_ratio())
        .map(|r| r.min(OVERPERFORMANCE_CAP) / OVERPERFORMANCE_CAP)
        .collect();
    let volume_accuracy = if ratios.is_empty() {
        NEUTRAL_SCORE
    } else {
        ratios.iter().sum::<f64>() / ratios.len() as f64
    };

    let score = COMPLETION_WEIGHT * completion_rate
        + VOLUME_WEIGHT * volume_accuracy
        + PROGRESS_WEIGHT * plan.progress_percentage(today);
    score.clamp(0.0, 1.0)
}
