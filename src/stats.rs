use crate::clock::{Clock, SystemClock};
use crate::models::{completed_sessions, WorkoutSession};
use crate::muscles::ExerciseMuscleMap;
use crate::rounding::{average_1dp, percent_change, percentage, round_whole, seconds_to_minutes};
use crate::session::SetTotals;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Tunables for the statistics bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Length in days of each period in the period-over-period comparison
    pub comparison_days: u32,

    /// Number of personal records to keep
    pub personal_record_limit: usize,

    /// Number of most recent sessions in the strength trend
    pub strength_trend_limit: usize,

    /// Trailing weeks used for the weekly frequency figure
    pub frequency_weeks: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            comparison_days: 7,
            personal_record_limit: 10,
            strength_trend_limit: 15,
            frequency_weeks: 4,
        }
    }
}

/// Lifetime totals and averages over completed sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeStats {
    pub total_workouts: u32,
    pub total_sets: u32,
    pub total_reps: u64,
    /// Whole-number volume
    pub total_volume: Decimal,
    /// Whole minutes
    pub total_duration: u32,
    /// Whole minutes per workout
    pub avg_duration: u32,
    pub avg_sets_per_workout: Decimal,
    pub avg_volume_per_workout: Decimal,
    pub avg_reps_per_set: Decimal,
    /// None when no set recorded RIR
    pub avg_rir: Option<Decimal>,
}

/// Totals for sessions started inside one time window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub workouts: u32,
    pub sets: u32,
    pub reps: u64,
    /// Whole-number volume
    pub volume: Decimal,
    /// Whole minutes
    pub duration: u32,
}

/// Whole-number percent change per metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodChanges {
    pub workouts: i64,
    pub sets: i64,
    pub reps: i64,
    pub volume: i64,
    pub duration: i64,
}

/// The trailing window against the window right before it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub current: PeriodStats,
    pub previous: PeriodStats,
    pub changes: PeriodChanges,
}

/// Best marks ever logged for one exercise name.
///
/// The three maxima are tracked independently and may come from different
/// sets; `achieved_at` belongs to the max-volume set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub exercise_name: String,
    pub max_weight: Decimal,
    pub max_reps: u32,
    pub max_volume: Decimal,
    pub achieved_at: DateTime<Utc>,
}

/// Work attributed to one muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleGroupStat {
    pub muscle_group: String,
    /// Whole-number volume
    pub volume: Decimal,
    pub sets: u32,
    pub reps: u64,
    /// Whole-number share of all attributed volume. Multi-group exercises
    /// count fully toward each of their groups.
    pub percentage: u32,
}

/// One session on the strength-score chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthTrendPoint {
    /// Short local date such as "Jan 5"
    pub date: String,
    pub strength_score: Decimal,
    /// 1-based position within the returned series
    pub workout_number: u32,
}

/// Everything the statistics screen shows, computed in one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStatistics {
    pub all_time: AllTimeStats,
    pub period_comparison: PeriodComparison,
    pub personal_records: Vec<PersonalRecord>,
    pub muscle_groups: Vec<MuscleGroupStat>,
    pub strength_trend: Vec<StrengthTrendPoint>,
}

#[derive(Debug, Default)]
struct MuscleAccumulator {
    volume: Decimal,
    sets: u32,
    reps: u64,
}

/// Reduces a nested session history into the statistics bundle
#[derive(Debug, Clone)]
pub struct StatisticsAggregator<'a, C = SystemClock> {
    muscle_map: &'a ExerciseMuscleMap,
    clock: C,
    config: StatsConfig,
}

impl<'a> StatisticsAggregator<'a, SystemClock> {
    /// Create an aggregator on the system clock with default settings
    pub fn new(muscle_map: &'a ExerciseMuscleMap) -> Self {
        Self::with_clock(muscle_map, SystemClock)
    }
}

impl<'a, C: Clock> StatisticsAggregator<'a, C> {
    /// Create an aggregator on a caller-supplied clock
    pub fn with_clock(muscle_map: &'a ExerciseMuscleMap, clock: C) -> Self {
        StatisticsAggregator {
            muscle_map,
            clock,
            config: StatsConfig::default(),
        }
    }

    /// Replace the default settings
    pub fn with_config(mut self, config: StatsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Compute the full bundle with the configured limits and window
    pub fn compute_all_statistics(&self, sessions: &[WorkoutSession]) -> ComputedStatistics {
        let stats = ComputedStatistics {
            all_time: self.compute_all_time_stats(sessions),
            period_comparison: self
                .compute_period_comparison(sessions, self.config.comparison_days),
            personal_records: self
                .compute_personal_records(sessions, self.config.personal_record_limit),
            muscle_groups: self.compute_muscle_group_breakdown(sessions),
            strength_trend: self
                .prepare_strength_trend_data(sessions, self.config.strength_trend_limit),
        };

        debug!(
            sessions = sessions.len(),
            workouts = stats.all_time.total_workouts,
            records = stats.personal_records.len(),
            muscle_groups = stats.muscle_groups.len(),
            trend_points = stats.strength_trend.len(),
            "Computed statistics"
        );

        stats
    }

    /// Lifetime totals and per-workout/per-set averages
    pub fn compute_all_time_stats(&self, sessions: &[WorkoutSession]) -> AllTimeStats {
        let mut totals = SetTotals::default();
        let mut workouts: u32 = 0;
        let mut duration_sec: u64 = 0;

        for session in completed_sessions(sessions) {
            workouts += 1;
            duration_sec += u64::from(session.total_duration_sec.unwrap_or(0));
            totals.add_session(session);
        }

        let workout_count = Decimal::from(workouts);
        let duration_sec = Decimal::from(duration_sec);
        let avg_duration = if workouts == 0 {
            0
        } else {
            seconds_to_minutes(duration_sec / workout_count)
        };

        AllTimeStats {
            total_workouts: workouts,
            total_sets: totals.sets,
            total_reps: totals.reps,
            total_volume: round_whole(totals.volume),
            total_duration: seconds_to_minutes(duration_sec),
            avg_duration,
            avg_sets_per_workout: average_1dp(Decimal::from(totals.sets), workout_count),
            avg_volume_per_workout: average_1dp(totals.volume, workout_count),
            avg_reps_per_set: average_1dp(Decimal::from(totals.reps), Decimal::from(totals.sets)),
            avg_rir: totals.avg_rir(),
        }
    }

    /// Totals for completed sessions started in `[start, end)`
    pub fn compute_period_stats(
        &self,
        sessions: &[WorkoutSession],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PeriodStats {
        let mut totals = SetTotals::default();
        let mut workouts: u32 = 0;
        let mut duration_sec: u64 = 0;

        for session in completed_sessions(sessions)
            .filter(|session| session.started_at >= start && session.started_at < end)
        {
            workouts += 1;
            duration_sec += u64::from(session.total_duration_sec.unwrap_or(0));
            totals.add_session(session);
        }

        PeriodStats {
            workouts,
            sets: totals.sets,
            reps: totals.reps,
            volume: round_whole(totals.volume),
            duration: seconds_to_minutes(Decimal::from(duration_sec)),
        }
    }

    /// The last `days` days against the `days` days before them.
    ///
    /// Both windows hang off the clock's current instant, so the result
    /// is a snapshot of the moment it was computed.
    pub fn compute_period_comparison(
        &self,
        sessions: &[WorkoutSession],
        days: u32,
    ) -> PeriodComparison {
        let now = self.clock.now();
        let span = Duration::days(i64::from(days));
        // Windows reaching past the earliest representable instant are clamped
        let current_start = now.checked_sub_signed(span).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let previous_start = current_start
            .checked_sub_signed(span)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        trace!(%now, %current_start, %previous_start, "Period comparison windows");

        let current = self.compute_period_stats(sessions, current_start, now);
        let previous = self.compute_period_stats(sessions, previous_start, current_start);

        let changes = PeriodChanges {
            workouts: percent_change(current.workouts.into(), previous.workouts.into()),
            sets: percent_change(current.sets.into(), previous.sets.into()),
            reps: percent_change(current.reps.into(), previous.reps.into()),
            volume: percent_change(current.volume, previous.volume),
            duration: percent_change(current.duration.into(), previous.duration.into()),
        };

        PeriodComparison {
            current,
            previous,
            changes,
        }
    }

    /// Best marks per exercise name, highest volume first, top `limit`
    pub fn compute_personal_records(
        &self,
        sessions: &[WorkoutSession],
        limit: usize,
    ) -> Vec<PersonalRecord> {
        let mut records: Vec<PersonalRecord> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for session in completed_sessions(sessions) {
            for exercise in &session.exercises {
                for set in &exercise.sets {
                    let weight = set.weight_or_zero();
                    let volume = set.volume();

                    match index.get(exercise.name.as_str()) {
                        Some(&position) => {
                            let record = &mut records[position];
                            record.max_weight = record.max_weight.max(weight);
                            record.max_reps = record.max_reps.max(set.reps);
                            if volume > record.max_volume {
                                record.max_volume = volume;
                                record.achieved_at = set.completed_at;
                            }
                        }
                        None => {
                            index.insert(exercise.name.as_str(), records.len());
                            records.push(PersonalRecord {
                                exercise_name: exercise.name.clone(),
                                max_weight: weight,
                                max_reps: set.reps,
                                max_volume: volume,
                                achieved_at: set.completed_at,
                            });
                        }
                    }
                }
            }
        }

        // Stable: ties keep first-seen order
        records.sort_by(|a, b| b.max_volume.cmp(&a.max_volume));
        records.truncate(limit);
        records
    }

    /// Volume, sets and reps per muscle group, largest volume first
    pub fn compute_muscle_group_breakdown(
        &self,
        sessions: &[WorkoutSession],
    ) -> Vec<MuscleGroupStat> {
        let mut groups: Vec<(String, MuscleAccumulator)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for session in completed_sessions(sessions) {
            for exercise in session.exercises.iter().filter(|e| !e.sets.is_empty()) {
                let muscle_groups = self.muscle_map.muscle_groups(&exercise.name);

                for group in muscle_groups {
                    let position = *index.entry(group.clone()).or_insert_with(|| {
                        groups.push((group.clone(), MuscleAccumulator::default()));
                        groups.len() - 1
                    });
                    let accumulator = &mut groups[position].1;

                    for set in &exercise.sets {
                        accumulator.volume += set.volume();
                        accumulator.sets += 1;
                        accumulator.reps += u64::from(set.reps);
                    }
                }
            }
        }

        let total_volume: Decimal = groups.iter().map(|(_, acc)| acc.volume).sum();

        // Order on exact volume; ties keep first-seen order
        groups.sort_by(|(_, a), (_, b)| b.volume.cmp(&a.volume));

        groups
            .into_iter()
            .map(|(muscle_group, acc)| MuscleGroupStat {
                muscle_group,
                volume: round_whole(acc.volume),
                sets: acc.sets,
                reps: acc.reps,
                percentage: percentage(acc.volume, total_volume),
            })
            .collect()
    }

    /// The most recent `limit` scored sessions in chronological order
    pub fn prepare_strength_trend_data(
        &self,
        sessions: &[WorkoutSession],
        limit: usize,
    ) -> Vec<StrengthTrendPoint> {
        let mut scored: Vec<(&WorkoutSession, Decimal)> = completed_sessions(sessions)
            .filter_map(|session| session.strength_score.map(|score| (session, score)))
            .collect();
        scored.sort_by_key(|(session, _)| session.started_at);

        let skip = scored.len().saturating_sub(limit);

        scored
            .into_iter()
            .skip(skip)
            .enumerate()
            .map(|(position, (session, strength_score))| StrengthTrendPoint {
                date: self
                    .clock
                    .local_date(session.started_at)
                    .format("%b %-d")
                    .to_string(),
                strength_score,
                workout_number: position as u32 + 1,
            })
            .collect()
    }
}
