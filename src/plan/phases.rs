//! Phase scheduling and weekly volume curves.
//!
//! T104: Implement backwards phase allocation from race day
//! T105: Implement weekly volume calculation per phase

use super::types::{RaceDistance, TrainingPhase};

/// Week-over-week growth factor during the build phase.
const WEEKLY_GROWTH: f64 = 1.10;

/// Taper volume as a fraction of peak, by taper week. Weeks past the end of
/// the table hold at the final fraction.
const TAPER_FRACTIONS: [f64; 3] = [0.75, 0.50, 0.30];

/// Allocation of a plan's weeks across training phases.
///
/// Built backwards from race day: taper first, then peak, with the remainder
/// split roughly one-third base to two-thirds build.
#[derive(Debug, Clone)]
pub struct PhaseSchedule {
    /// Phase tag for each week, in week order
    pub weeks: Vec<TrainingPhase>,
    /// Weeks in the base phase
    pub base_weeks: usize,
    /// Weeks in the build phase
    pub build_weeks: usize,
    /// Weeks in the peak phase
    pub peak_weeks: usize,
    /// Weeks in the taper phase
    pub taper_weeks: usize,
}

impl PhaseSchedule {
    /// Allocate phases for a plan horizon.
    pub fn allocate(total_weeks: usize, race_distance: RaceDistance) -> Self {
        let total_weeks = total_weeks.max(1);

        let taper_weeks = race_distance.typical_taper_weeks().min(total_weeks - 1);
        let peak_weeks = race_distance
            .peak_weeks()
            .min((total_weeks - taper_weeks).saturating_sub(1));
        let remaining = total_weeks - taper_weeks - peak_weeks;
        let build_weeks = remaining * 2 / 3;
        let base_weeks = (remaining - build_weeks).max(1);

        let mut weeks = Vec::with_capacity(total_weeks);
        weeks.extend(std::iter::repeat(TrainingPhase::Base).take(base_weeks));
        weeks.extend(std::iter::repeat(TrainingPhase::Build).take(build_weeks));
        weeks.extend(std::iter::repeat(TrainingPhase::Peak).take(peak_weeks));
        weeks.extend(std::iter::repeat(TrainingPhase::Taper).take(taper_weeks));
        weeks.truncate(total_weeks);

        Self {
            weeks,
            base_weeks,
            build_weeks,
            peak_weeks,
            taper_weeks,
        }
    }

    /// Phase for a 0-based week index. Indices past the horizon report the
    /// final phase.
    pub fn phase_for_week(&self, week: usize) -> TrainingPhase {
        self.weeks
            .get(week)
            .or_else(|| self.weeks.last())
            .copied()
            .unwrap_or(TrainingPhase::Base)
    }

    /// Weekly volume at the top of the build, held through the peak phase.
    pub fn peak_volume(&self, base_mileage: f64) -> f64 {
        base_mileage * WEEKLY_GROWTH.powi(self.build_weeks as i32)
    }

    /// Target total distance for a week, in miles.
    ///
    /// Base holds a floor relative to race distance, build compounds weekly,
    /// peak holds flat at the build ceiling, taper steps down from peak.
    pub fn weekly_volume(
        &self,
        base_mileage: f64,
        race_distance: RaceDistance,
        week: usize,
    ) -> f64 {
        match self.phase_for_week(week) {
            TrainingPhase::Base => base_mileage.max(race_distance.distance_in_miles() * 0.5),
            TrainingPhase::Build => {
                let build_week = week.saturating_sub(self.base_weeks);
                base_mileage * WEEKLY_GROWTH.powi(build_week as i32 + 1)
            }
            TrainingPhase::Peak => self.peak_volume(base_mileage),
            TrainingPhase::Taper => {
                let taper_week = week.saturating_sub(self.base_weeks + self.build_weeks + self.peak_weeks);
                let fraction = TAPER_FRACTIONS[taper_week.min(TAPER_FRACTIONS.len() - 1)];
                self.peak_volume(base_mileage) * fraction
            }
        }
    }
}
