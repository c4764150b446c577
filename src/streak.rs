use crate::clock::{Clock, SystemClock};
use crate::models::{completed_sessions, WorkoutSession};
use crate::rounding::average_1dp;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Streak summary for a user's workout history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    /// Consecutive workout days ending today (or yesterday)
    pub current_streak: u32,

    /// Longest run of consecutive workout days ever
    pub longest_streak: u32,

    /// Number of completed sessions, not distinct days
    pub total_workouts: u32,
}

/// Derives workout-day presence and streaks from session end times.
///
/// Days are the observer's local calendar days as reported by the clock,
/// so two sessions finished hours apart on the same local day count once.
#[derive(Debug, Clone)]
pub struct StreakCalculator<C = SystemClock> {
    clock: C,
}

impl StreakCalculator<SystemClock> {
    /// Create a calculator on the system clock and local timezone
    pub fn new() -> Self {
        StreakCalculator { clock: SystemClock }
    }
}

impl Default for StreakCalculator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StreakCalculator<C> {
    /// Create a calculator on a caller-supplied clock
    pub fn with_clock(clock: C) -> Self {
        StreakCalculator { clock }
    }

    /// Local calendar day of an instant
    pub fn to_local_date(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        self.clock.local_date(timestamp)
    }

    /// Distinct local days on which a session was finished
    pub fn workout_days(&self, sessions: &[WorkoutSession]) -> BTreeSet<NaiveDate> {
        completed_sessions(sessions)
            .filter_map(|session| session.ended_at)
            .map(|ended_at| self.to_local_date(ended_at))
            .collect()
    }

    /// Current and longest streaks plus the completed-session count
    pub fn calculate_streaks(&self, sessions: &[WorkoutSession]) -> StreakData {
        let days = self.workout_days(sessions);
        if days.is_empty() {
            return StreakData::default();
        }

        let total_workouts = completed_sessions(sessions).count() as u32;
        let current_streak = self.current_streak(&days);
        let longest_streak = longest_run(&days).max(current_streak);

        debug!(
            workout_days = days.len(),
            total_workouts, current_streak, longest_streak, "Calculated streaks"
        );

        StreakData {
            current_streak,
            longest_streak,
            total_workouts,
        }
    }

    /// Workout days in one calendar month, as `YYYY-MM-DD` keys.
    ///
    /// An out-of-range month simply matches nothing.
    pub fn workout_dates_for_month(
        &self,
        year: i32,
        month: u32,
        sessions: &[WorkoutSession],
    ) -> Vec<String> {
        self.workout_days(sessions)
            .into_iter()
            .filter(|day| day.year() == year && day.month() == month)
            .map(date_key)
            .collect()
    }

    /// Average distinct workout days per week over the trailing `weeks`
    /// weeks, today included, to one decimal place.
    pub fn weekly_frequency(&self, sessions: &[WorkoutSession], weeks: u32) -> Decimal {
        if weeks == 0 {
            return Decimal::ZERO;
        }

        let today = self.clock.today();
        let window_start = today
            .checked_sub_days(Days::new(u64::from(weeks) * 7 - 1))
            .unwrap_or(NaiveDate::MIN);

        let active_days = self
            .workout_days(sessions)
            .range(window_start..=today)
            .count();

        average_1dp(Decimal::from(active_days), Decimal::from(weeks))
    }

    fn current_streak(&self, days: &BTreeSet<NaiveDate>) -> u32 {
        let today = self.clock.today();
        let yesterday = today.pred_opt();

        let mut cursor = if days.contains(&today) {
            Some(today)
        } else {
            match yesterday {
                Some(day) if days.contains(&day) => Some(day),
                _ => return 0,
            }
        };

        let mut streak = 0;
        while let Some(day) = cursor.filter(|day| days.contains(day)) {
            streak += 1;
            cursor = day.pred_opt();
        }
        streak
    }
}

/// Format a calendar day as a `YYYY-MM-DD` key
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Length of the longest run of adjacent days in an ordered set
fn longest_run(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in days {
        run = match previous {
            Some(prev) if (day - prev).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }

    longest
}
