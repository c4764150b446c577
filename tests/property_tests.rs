use chrono::{DateTime, Duration, TimeZone, Utc};
use liftrs::rounding::{percent_change, percentage};
use liftrs::{
    completed_sessions, ExerciseMuscleMap, FixedClock, StatisticsAggregator, StreakCalculator,
    WorkoutExercise, WorkoutSession, WorkoutSet,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Property-based checks over randomly generated session histories

const EXERCISE_NAMES: &[&str] = &["Bench Press", "Squat", "Deadlift", "Pull Up", "Sled Push"];

/// (exercise index, reps, weight in whole kg or bodyweight)
type SetShape = (usize, u32, Option<u16>);

/// (days before now, start hour, finished, sets)
type SessionShape = (i64, u32, bool, Vec<SetShape>);

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 20, 0, 0).unwrap()
}

fn create_test_clock() -> FixedClock {
    FixedClock::utc(base_time())
}

fn create_test_session(index: usize, shape: &SessionShape) -> WorkoutSession {
    let (days_ago, hour, finished, sets) = shape;
    let day = base_time() - Duration::days(*days_ago);
    let started_at = day.date_naive().and_hms_opt(*hour, 0, 0).unwrap().and_utc();
    let ended_at = started_at + Duration::minutes(50);

    let exercises = sets
        .iter()
        .enumerate()
        .map(|(position, (exercise, reps, weight))| WorkoutExercise {
            id: format!("e{}-{}", index, position),
            session_id: format!("s{}", index),
            name: EXERCISE_NAMES[*exercise].to_string(),
            sort_order: position as u32,
            sets: vec![WorkoutSet {
                id: format!("x{}-{}", index, position),
                exercise_id: format!("e{}-{}", index, position),
                set_number: 1,
                reps: *reps,
                weight: weight.map(Decimal::from),
                rir: None,
                completed_at: started_at + Duration::minutes(position as i64),
            }],
        })
        .collect();

    WorkoutSession {
        id: format!("s{}", index),
        user_id: "user".to_string(),
        routine_id: None,
        routine_day_id: None,
        started_at,
        ended_at: finished.then_some(ended_at),
        total_duration_sec: finished.then_some(3000),
        strength_score: finished.then(|| Decimal::from(index as u32 + 50)),
        exercises,
    }
}

fn history_strategy() -> impl Strategy<Value = Vec<WorkoutSession>> {
    let set = (0..EXERCISE_NAMES.len(), 0u32..20, proptest::option::of(0u16..300));
    let session = (
        0i64..60,
        0u32..20,
        proptest::bool::weighted(0.85),
        prop::collection::vec(set, 0..6),
    );
    prop::collection::vec(session, 0..30).prop_map(|shapes| {
        shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| create_test_session(index, shape))
            .collect()
    })
}

proptest! {
    #[test]
    fn test_streak_invariants(sessions in history_strategy()) {
        let calculator = StreakCalculator::with_clock(create_test_clock());
        let streaks = calculator.calculate_streaks(&sessions);
        let days = calculator.workout_days(&sessions);

        prop_assert!(streaks.longest_streak >= streaks.current_streak);
        prop_assert!(streaks.longest_streak as usize <= days.len());
        prop_assert_eq!(streaks.total_workouts as usize, completed_sessions(&sessions).count());

        if days.is_empty() {
            prop_assert_eq!(streaks.longest_streak, 0);
        } else {
            prop_assert!(streaks.longest_streak >= 1);
        }
    }

    #[test]
    fn test_month_dates_sorted_and_distinct(sessions in history_strategy()) {
        let calculator = StreakCalculator::with_clock(create_test_clock());

        for month in [5u32, 6] {
            let dates = calculator.workout_dates_for_month(2024, month, &sessions);
            let unique: BTreeSet<&String> = dates.iter().collect();
            prop_assert_eq!(unique.len(), dates.len());
            prop_assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
            let prefix = format!("2024-{:02}-", month);
            prop_assert!(dates.iter().all(|date| date.starts_with(&prefix)));
        }
    }

    #[test]
    fn test_weekly_frequency_bounds(sessions in history_strategy(), weeks in 1u32..10) {
        let calculator = StreakCalculator::with_clock(create_test_clock());
        let frequency = calculator.weekly_frequency(&sessions, weeks);

        prop_assert!(frequency >= Decimal::ZERO);
        prop_assert!(frequency <= Decimal::from(7));
    }

    #[test]
    fn test_muscle_volume_covers_total(sessions in history_strategy()) {
        let muscle_map = ExerciseMuscleMap::builtin();
        let aggregator = StatisticsAggregator::with_clock(&muscle_map, create_test_clock());

        let all_time = aggregator.compute_all_time_stats(&sessions);
        let groups = aggregator.compute_muscle_group_breakdown(&sessions);

        // Every set lands in at least one group, the fallback included
        let group_volume: Decimal = groups.iter().map(|g| g.volume).sum();
        prop_assert!(group_volume >= all_time.total_volume);

        let group_sets: u32 = groups.iter().map(|g| g.sets).sum();
        prop_assert!(group_sets >= all_time.total_sets);

        prop_assert!(groups.windows(2).all(|pair| pair[0].volume >= pair[1].volume));
        prop_assert!(groups.iter().all(|g| g.percentage <= 100));
    }

    #[test]
    fn test_personal_records_bound_every_set(sessions in history_strategy(), limit in 0usize..8) {
        let muscle_map = ExerciseMuscleMap::builtin();
        let aggregator = StatisticsAggregator::with_clock(&muscle_map, create_test_clock());

        let records = aggregator.compute_personal_records(&sessions, limit);
        prop_assert!(records.len() <= limit);
        prop_assert!(records.windows(2).all(|pair| pair[0].max_volume >= pair[1].max_volume));

        for record in &records {
            for session in completed_sessions(&sessions) {
                for exercise in session.exercises.iter().filter(|e| e.name == record.exercise_name) {
                    for set in &exercise.sets {
                        prop_assert!(record.max_volume >= set.volume());
                        prop_assert!(record.max_weight >= set.weight_or_zero());
                        prop_assert!(record.max_reps >= set.reps);
                    }
                }
            }
        }
    }

    #[test]
    fn test_period_windows_are_disjoint(sessions in history_strategy(), days in 1u32..30) {
        let muscle_map = ExerciseMuscleMap::builtin();
        let aggregator = StatisticsAggregator::with_clock(&muscle_map, create_test_clock());

        let comparison = aggregator.compute_period_comparison(&sessions, days);
        let all_time = aggregator.compute_all_time_stats(&sessions);

        prop_assert!(comparison.current.workouts + comparison.previous.workouts <= all_time.total_workouts);
        prop_assert!(comparison.current.sets + comparison.previous.sets <= all_time.total_sets);
    }

    #[test]
    fn test_strength_trend_numbering(sessions in history_strategy(), limit in 0usize..20) {
        let muscle_map = ExerciseMuscleMap::builtin();
        let aggregator = StatisticsAggregator::with_clock(&muscle_map, create_test_clock());

        let trend = aggregator.prepare_strength_trend_data(&sessions, limit);
        prop_assert!(trend.len() <= limit);
        for (position, point) in trend.iter().enumerate() {
            prop_assert_eq!(point.workout_number as usize, position + 1);
        }
    }

    #[test]
    fn test_percent_change_zero_baseline(current in 0u32..10_000) {
        let change = percent_change(Decimal::from(current), Decimal::ZERO);
        if current == 0 {
            prop_assert_eq!(change, 0);
        } else {
            prop_assert_eq!(change, 100);
        }
    }

    #[test]
    fn test_percentage_of_whole(part in 0u32..10_000, extra in 0u32..10_000) {
        let whole = Decimal::from(part + extra);
        let share = percentage(Decimal::from(part), whole);
        prop_assert!(share <= 100);
        if extra == 0 && part > 0 {
            prop_assert_eq!(share, 100);
        }
    }
}
