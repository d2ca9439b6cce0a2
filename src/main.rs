//! RustRun - Race Training Plan Engine
//!
//! Demo entry point: generates a sample half marathon plan and prints the
//! calendar week by week.

use chrono::{Duration, Utc, Weekday};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rustrun::{generate_sessions, RaceDistance, TrainingPlan};

fn main() -> Result<(), rustrun::PlanError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RustRun v{}", env!("CARGO_PKG_VERSION"));

    let today = Utc::now().date_naive();
    let mut plan = TrainingPlan::new(
        RaceDistance::HalfMarathon,
        today + Duration::weeks(12),
        today,
        20.0,
        8.0,
        vec![Weekday::Mon, Weekday::Fri],
    )?;
    plan.sessions = generate_sessions(&plan);

    for summary in plan.week_summaries() {
        println!(
            "Week {:>2} [{:<5}] {:>5.1} mi planned",
            summary.week_number,
            summary.phase.label(),
            summary.planned_miles
        );
        for session in plan.sessions_for_week(summary.week_number - 1) {
            println!(
                "    {} {} {:<13} {:>5.2} mi",
                session.date,
                session.run_type.icon(),
                session.run_type.label(),
                session.target_distance
            );
        }
    }

    Ok(())
}
