//! Training plan domain types.
//!
//! T101: Define RaceDistance, RunType, TrainingPhase lookup enums
//! T102: Define TrainingSession and TrainingPlan entities
//! T103: Implement derived plan state (current week, progress, taper lock)

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::phases::PhaseSchedule;

/// Errors raised at the plan boundary (construction and session recording).
///
/// Generation and adaptation never error; they degrade to empty results.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Race date does not fall after the start date
    #[error("Race date {race} must fall after start date {start}")]
    InvalidDateRange {
        /// Plan start date
        start: NaiveDate,
        /// Race date
        race: NaiveDate,
    },

    /// Baseline weekly mileage is not a positive finite number
    #[error("Weekly mileage must be positive, got {0}")]
    InvalidMileage(f64),

    /// Longest recent run is negative
    #[error("Longest recent run cannot be negative, got {0}")]
    InvalidLongestRun(f64),

    /// Session id not present in the plan
    #[error("No session with id {0} in this plan")]
    SessionNotFound(Uuid),
}

/// Target race distance with its fixed training parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RaceDistance {
    FiveK,
    TenK,
    HalfMarathon,
    Marathon,
    /// Non-standard race distance in miles
    Custom {
        miles: f64,
    },
}

impl RaceDistance {
    /// Race distance in miles.
    pub fn distance_in_miles(&self) -> f64 {
        match self {
            RaceDistance::FiveK => 3.1,
            RaceDistance::TenK => 6.2,
            RaceDistance::HalfMarathon => 13.1,
            RaceDistance::Marathon => 26.2,
            RaceDistance::Custom { miles } => *miles,
        }
    }

    /// Weeks of pre-race taper this distance typically needs.
    pub fn typical_taper_weeks(&self) -> usize {
        match self {
            RaceDistance::FiveK => 1,
            RaceDistance::TenK => 1,
            RaceDistance::HalfMarathon => 2,
            RaceDistance::Marathon => 3,
            RaceDistance::Custom { .. } => 2,
        }
    }

    /// Weeks held at peak volume before the taper begins.
    pub fn peak_weeks(&self) -> usize {
        match self {
            RaceDistance::FiveK => 1,
            RaceDistance::TenK => 2,
            RaceDistance::HalfMarathon => 2,
            RaceDistance::Marathon => 3,
            RaceDistance::Custom { .. } => 2,
        }
    }

    /// Fraction of race distance a single long run may reach.
    ///
    /// Above 1.0 for short races, where long runs routinely exceed race
    /// distance; below 1.0 for half and full marathons.
    pub fn long_run_cap_fraction(&self) -> f64 {
        match self {
            RaceDistance::FiveK => 2.0,
            RaceDistance::TenK => 1.5,
            RaceDistance::HalfMarathon => 0.9,
            RaceDistance::Marathon => 0.8,
            RaceDistance::Custom { .. } => 1.0,
        }
    }

    /// Longest distance a single long run may be prescribed, in miles.
    pub fn long_run_cap_miles(&self) -> f64 {
        self.distance_in_miles() * self.long_run_cap_fraction()
    }

    /// Human-readable name.
    pub fn display_name(&self) -> String {
        match self {
            RaceDistance::FiveK => "5K".to_string(),
            RaceDistance::TenK => "10K".to_string(),
            RaceDistance::HalfMarathon => "Half Marathon".to_string(),
            RaceDistance::Marathon => "Marathon".to_string(),
            RaceDistance::Custom { miles } => format!("Custom ({miles:.1} mi)"),
        }
    }
}

impl std::fmt::Display for RaceDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Kind of training session on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunType {
    /// Very easy shakeout run
    Recovery,
    /// Standard aerobic run
    Base,
    /// The week's single longest effort
    LongRun,
    /// Intervals or repeats
    SpeedWork,
    /// Sustained comfortably-hard effort
    Tempo,
    /// Non-running aerobic work
    CrossTraining,
    /// Scheduled day off
    Rest,
}

impl RunType {
    pub fn label(&self) -> &'static str {
        match self {
            RunType::Recovery => "Recovery Run",
            RunType::Base => "Base Run",
            RunType::LongRun => "Long Run",
            RunType::SpeedWork => "Speed Work",
            RunType::Tempo => "Tempo Run",
            RunType::CrossTraining => "Cross Training",
            RunType::Rest => "Rest Day",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RunType::Recovery => "🚶",
            RunType::Base => "🏃",
            RunType::LongRun => "🛣",
            RunType::SpeedWork => "⚡",
            RunType::Tempo => "⏱",
            RunType::CrossTraining => "🚴",
            RunType::Rest => "😴",
        }
    }

    /// How the effort should feel to the runner.
    pub fn effort_description(&self) -> &'static str {
        match self {
            RunType::Recovery => "Very easy - you should be able to hold a conversation",
            RunType::Base => "Comfortable aerobic effort",
            RunType::LongRun => "Steady and patient - distance matters, pace does not",
            RunType::SpeedWork => "Short hard repeats with full recovery between",
            RunType::Tempo => "Comfortably hard - controlled but demanding",
            RunType::CrossTraining => "Easy non-impact aerobic work",
            RunType::Rest => "No running today",
        }
    }

    /// Whether sessions of this type count toward weekly run mileage.
    pub fn counts_as_mileage(&self) -> bool {
        !matches!(self, RunType::Rest | RunType::CrossTraining)
    }

    /// Fixed share of the week's volume this type attracts.
    pub fn mileage_weight(&self) -> f64 {
        match self {
            RunType::LongRun => 0.30,
            RunType::Tempo => 0.20,
            RunType::Base => 0.20,
            RunType::SpeedWork => 0.15,
            RunType::Recovery => 0.10,
            RunType::CrossTraining | RunType::Rest => 0.0,
        }
    }
}

impl std::fmt::Display for RunType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Multi-week training stage. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainingPhase {
    Base,
    Build,
    Peak,
    Taper,
}

impl TrainingPhase {
    pub fn label(&self) -> &'static str {
        match self {
            TrainingPhase::Base => "Base",
            TrainingPhase::Build => "Build",
            TrainingPhase::Peak => "Peak",
            TrainingPhase::Taper => "Taper",
        }
    }
}

impl std::fmt::Display for TrainingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Runner-reported effort for a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerceivedEffort {
    Easy,
    Moderate,
    Hard,
}

impl PerceivedEffort {
    /// Numeric score: 1 = easy, 2 = moderate, 3 = hard.
    pub fn score(&self) -> u8 {
        match self {
            PerceivedEffort::Easy => 1,
            PerceivedEffort::Moderate => 2,
            PerceivedEffort::Hard => 3,
        }
    }

    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(PerceivedEffort::Easy),
            2 => Some(PerceivedEffort::Moderate),
            3 => Some(PerceivedEffort::Hard),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerceivedEffort::Easy => "Easy",
            PerceivedEffort::Moderate => "Moderate",
            PerceivedEffort::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for PerceivedEffort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single day on the training calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Stable identity, used for adjustment targeting
    pub id: Uuid,
    /// Calendar date
    pub date: NaiveDate,
    /// Kind of session
    pub run_type: RunType,
    /// Prescribed distance in miles (0 for rest / cross training)
    pub target_distance: f64,
    /// Distance actually run, once recorded
    pub actual_distance: Option<f64>,
    /// Runner-reported effort, once recorded
    pub perceived_effort: Option<PerceivedEffort>,
    /// Whether the session was completed
    pub is_completed: bool,
    /// Whether the runner explicitly skipped the session
    pub is_skipped: bool,
    /// Free-form notes from the runner
    pub notes: Option<String>,
}

impl TrainingSession {
    /// Create a fresh, unrecorded session.
    pub fn new(date: NaiveDate, run_type: RunType, target_distance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            run_type,
            target_distance,
            actual_distance: None,
            perceived_effort: None,
            is_completed: false,
            is_skipped: false,
            notes: None,
        }
    }

    /// Actual over target, when both are known and the target is non-zero.
    pub fn completion_ratio(&self) -> Option<f64> {
        match self.actual_distance {
            Some(actual) if self.target_distance > 0.0 => Some(actual / self.target_distance),
            _ => None,
        }
    }

    /// The date has passed without completion or an explicit skip.
    pub fn was_missed(&self, today: NaiveDate) -> bool {
        !self.is_completed && !self.is_skipped && self.date < today
    }

    /// Still on the calendar: neither completed nor skipped.
    pub fn is_pending(&self) -> bool {
        !self.is_completed && !self.is_skipped
    }
}

/// Per-week rollup for dashboard display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSummary {
    /// 1-based week number
    pub week_number: usize,
    /// Phase this week belongs to
    pub phase: TrainingPhase,
    /// Sum of prescribed distances
    pub planned_miles: f64,
    /// Sum of recorded distances on completed sessions
    pub completed_miles: f64,
    /// Scheduled runs (mileage-bearing sessions)
    pub runs_planned: usize,
    /// Completed runs
    pub runs_completed: usize,
}

/// A runner's plan for one target race.
///
/// The plan exclusively owns its sessions, kept in date order. Everything
/// time-dependent takes `today` explicitly; the engine never reads the clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Target race
    pub race_distance: RaceDistance,
    /// Race day
    pub race_date: NaiveDate,
    /// First day of training
    pub start_date: NaiveDate,
    /// Baseline weekly mileage at plan creation
    pub weekly_mileage: f64,
    /// Longest single run in recent history, miles
    pub longest_recent_run: f64,
    /// Weekdays the runner never trains
    pub rest_days: Vec<Weekday>,
    /// All sessions, ordered by date
    pub sessions: Vec<TrainingSession>,
}

impl TrainingPlan {
    /// Create an empty plan, validating its inputs.
    ///
    /// Sessions are populated separately via `generate_sessions`.
    pub fn new(
        race_distance: RaceDistance,
        race_date: NaiveDate,
        start_date: NaiveDate,
        weekly_mileage: f64,
        longest_recent_run: f64,
        rest_days: Vec<Weekday>,
    ) -> Result<Self, PlanError> {
        if race_date <= start_date {
            return Err(PlanError::InvalidDateRange {
                start: start_date,
                race: race_date,
            });
        }
        if !(weekly_mileage.is_finite() && weekly_mileage > 0.0) {
            return Err(PlanError::InvalidMileage(weekly_mileage));
        }
        if !(longest_recent_run.is_finite() && longest_recent_run >= 0.0) {
            return Err(PlanError::InvalidLongestRun(longest_recent_run));
        }

        Ok(Self {
            race_distance,
            race_date,
            start_date,
            weekly_mileage,
            longest_recent_run,
            rest_days,
            sessions: Vec::new(),
        })
    }

    /// Whole training weeks between start and race day, at least 1.
    pub fn total_weeks(&self) -> usize {
        let weeks = (self.race_date - self.start_date).num_days() / 7;
        weeks.max(1) as usize
    }

    /// Calendar days covered by the plan.
    pub fn total_days(&self) -> usize {
        self.total_weeks() * 7
    }

    /// Days elapsed since the start, clamped to the plan range.
    pub fn current_day(&self, today: NaiveDate) -> usize {
        let elapsed = (today - self.start_date).num_days();
        elapsed.clamp(0, self.total_days() as i64) as usize
    }

    /// 0-based week the given day falls in, clamped to the plan range.
    pub fn current_week(&self, today: NaiveDate) -> usize {
        (self.current_day(today) / 7).min(self.total_weeks() - 1)
    }

    /// Elapsed fraction of the plan, in [0, 1].
    pub fn progress_percentage(&self, today: NaiveDate) -> f64 {
        self.current_day(today) as f64 / self.total_days() as f64
    }

    /// Taper weeks this plan actually has room for.
    pub fn taper_weeks(&self) -> usize {
        self.race_distance
            .typical_taper_weeks()
            .min(self.total_weeks() - 1)
    }

    /// Whether the given day falls inside the taper window.
    ///
    /// Adaptation is disabled while locked: race-week volume is sacred.
    pub fn is_taper_locked(&self, today: NaiveDate) -> bool {
        if today < self.start_date {
            return false;
        }
        let week = ((today - self.start_date).num_days() / 7) as usize;
        week >= self.total_weeks() - self.taper_weeks()
    }

    /// Look up a session by id.
    pub fn session(&self, id: Uuid) -> Option<&TrainingSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Look up a session by id, mutably.
    pub fn session_mut(&mut self, id: Uuid) -> Option<&mut TrainingSession> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// The session scheduled on a given date, if any.
    pub fn session_on(&self, date: NaiveDate) -> Option<&TrainingSession> {
        self.sessions.iter().find(|s| s.date == date)
    }

    /// The next pending session on or after the given day.
    pub fn next_session(&self, today: NaiveDate) -> Option<&TrainingSession> {
        self.sessions
            .iter()
            .find(|s| s.date >= today && s.is_pending())
    }

    /// Pending sessions strictly after the given date, in date order.
    pub fn scheduled_after(&self, date: NaiveDate) -> impl Iterator<Item = &TrainingSession> {
        self.sessions
            .iter()
            .filter(move |s| s.date > date && s.is_pending())
    }

    /// Sessions belonging to a 0-based plan week.
    pub fn sessions_for_week(&self, week: usize) -> &[TrainingSession] {
        let from = week * 7;
        let to = (from + 7).min(self.sessions.len());
        if from >= self.sessions.len() {
            return &[];
        }
        &self.sessions[from..to]
    }

    /// Record a completed session with its outcome.
    pub fn complete_session(
        &mut self,
        id: Uuid,
        actual_distance: f64,
        effort: PerceivedEffort,
        notes: Option<String>,
    ) -> Result<(), PlanError> {
        let session = self.session_mut(id).ok_or(PlanError::SessionNotFound(id))?;
        session.actual_distance = Some(actual_distance);
        session.perceived_effort = Some(effort);
        session.is_completed = true;
        session.is_skipped = false;
        session.notes = notes;
        Ok(())
    }

    /// Record an explicit skip.
    pub fn skip_session(&mut self, id: Uuid) -> Result<(), PlanError> {
        let session = self.session_mut(id).ok_or(PlanError::SessionNotFound(id))?;
        session.is_skipped = true;
        session.is_completed = false;
        Ok(())
    }

    /// Whether a weekday is one of the runner's standing rest days.
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.rest_days.contains(&date.weekday())
    }

    /// Per-week planned vs completed rollups, in week order.
    pub fn week_summaries(&self) -> Vec<WeekSummary> {
        let schedule = PhaseSchedule::allocate(self.total_weeks(), self.race_distance);

        (0..self.total_weeks())
            .map(|week| {
                let sessions = self.sessions_for_week(week);
                let runs: Vec<_> = sessions
                    .iter()
                    .filter(|s| s.run_type.counts_as_mileage())
                    .collect();

                WeekSummary {
                    week_number: week + 1,
                    phase: schedule.phase_for_week(week),
                    planned_miles: sessions.iter().map(|s| s.target_distance).sum(),
                    completed_miles: sessions
                        .iter()
                        .filter(|s| s.is_completed)
                        .filter_map(|s| s.actual_distance)
                        .sum(),
                    runs_planned: runs.len(),
                    runs_completed: runs.iter().filter(|s| s.is_completed).count(),
                }
            })
            .collect()
    }
}
