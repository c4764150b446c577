//! Per-exercise progression history
//!
//! Best-set marks per session for a single exercise, with an estimated
//! one-rep max so sessions at different rep ranges compare on one scale.

use crate::clock::Clock;
use crate::models::{completed_sessions, WorkoutSession};
use crate::rounding::round_half_up;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Beyond this many reps rep-max estimates stop being meaningful
const MAX_RELIABLE_REPS: u32 = 15;

/// Best marks for one exercise within one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgressPoint {
    pub session_id: String,
    /// Local day the session started
    pub date: NaiveDate,
    pub best_weight: Decimal,
    pub best_reps: u32,
    pub best_volume: Decimal,
    pub estimated_one_rep_max: Decimal,
}

/// Estimated one-rep max (Epley: `w × (1 + r/30)`), one decimal place.
///
/// One rep returns the weight itself; reps are capped at 15.
pub fn estimated_one_rep_max(weight: Decimal, reps: u32) -> Decimal {
    if weight <= Decimal::ZERO || reps == 0 {
        return Decimal::ZERO;
    }
    if reps == 1 {
        return weight;
    }

    let r = Decimal::from(reps.min(MAX_RELIABLE_REPS));
    round_half_up(weight * (Decimal::ONE + r / Decimal::from(30)), 1)
}

/// Session-by-session best marks for one exercise, oldest first.
///
/// Names match case-insensitively; sessions where the exercise has no
/// logged sets are skipped.
pub fn exercise_progress<C: Clock>(
    sessions: &[WorkoutSession],
    exercise_name: &str,
    clock: &C,
) -> Vec<ExerciseProgressPoint> {
    let wanted = exercise_name.trim().to_lowercase();

    let mut ordered: Vec<&WorkoutSession> = completed_sessions(sessions).collect();
    ordered.sort_by_key(|session| session.started_at);

    ordered
        .into_iter()
        .filter_map(|session| {
            let mut sets = session
                .exercises
                .iter()
                .filter(|exercise| exercise.name.trim().to_lowercase() == wanted)
                .flat_map(|exercise| exercise.sets.iter())
                .peekable();
            sets.peek()?;

            let mut point = ExerciseProgressPoint {
                session_id: session.id.clone(),
                date: clock.local_date(session.started_at),
                best_weight: Decimal::ZERO,
                best_reps: 0,
                best_volume: Decimal::ZERO,
                estimated_one_rep_max: Decimal::ZERO,
            };

            for set in sets {
                let weight = set.weight_or_zero();
                point.best_weight = point.best_weight.max(weight);
                point.best_reps = point.best_reps.max(set.reps);
                point.best_volume = point.best_volume.max(set.volume());
                point.estimated_one_rep_max = point
                    .estimated_one_rep_max
                    .max(estimated_one_rep_max(weight, set.reps));
            }

            Some(point)
        })
        .collect()
}

/// Distinct exercise names across completed sessions, sorted
/// case-insensitively. The first spelling seen is kept.
pub fn exercise_names(sessions: &[WorkoutSession]) -> Vec<String> {
    let mut names: BTreeMap<String, String> = BTreeMap::new();
    for session in completed_sessions(sessions) {
        for exercise in &session.exercises {
            names
                .entry(exercise.name.trim().to_lowercase())
                .or_insert_with(|| exercise.name.trim().to_string());
        }
    }
    names.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{WorkoutExercise, WorkoutSet};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn create_test_set(reps: u32, weight: Option<Decimal>) -> WorkoutSet {
        WorkoutSet {
            id: "set".to_string(),
            exercise_id: "exercise".to_string(),
            set_number: 1,
            reps,
            weight,
            rir: None,
            completed_at: Utc.with_ymd_and_hms(2024, 4, 1, 18, 0, 0).unwrap(),
        }
    }

    fn create_test_session(
        id: &str,
        started_at: DateTime<Utc>,
        exercises: Vec<(&str, Vec<WorkoutSet>)>,
    ) -> WorkoutSession {
        WorkoutSession {
            id: id.to_string(),
            user_id: "test_user".to_string(),
            routine_id: None,
            routine_day_id: None,
            started_at,
            ended_at: Some(started_at + Duration::hours(1)),
            total_duration_sec: Some(3600),
            strength_score: None,
            exercises: exercises
                .into_iter()
                .enumerate()
                .map(|(i, (name, sets))| WorkoutExercise {
                    id: format!("{}_{}", id, i),
                    session_id: id.to_string(),
                    name: name.to_string(),
                    sort_order: i as u32,
                    sets,
                })
                .collect(),
        }
    }

    #[test]
    fn test_estimated_one_rep_max() {
        assert_eq!(estimated_one_rep_max(dec!(100), 1), dec!(100));
        assert_eq!(estimated_one_rep_max(dec!(100), 5), dec!(116.7));
        assert_eq!(estimated_one_rep_max(dec!(60), 10), dec!(80));
        assert_eq!(estimated_one_rep_max(Decimal::ZERO, 10), Decimal::ZERO);
        assert_eq!(estimated_one_rep_max(dec!(100), 0), Decimal::ZERO);
    }

    #[test]
    fn test_high_reps_are_capped() {
        assert_eq!(
            estimated_one_rep_max(dec!(40), 30),
            estimated_one_rep_max(dec!(40), 15)
        );
        assert_eq!(estimated_one_rep_max(dec!(40), 15), dec!(60));
    }

    #[test]
    fn test_exercise_progress_oldest_first() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 17, 0, 0).unwrap();
        let sessions = vec![
            create_test_session(
                "later",
                start + Duration::days(3),
                vec![("bench press", vec![create_test_set(5, Some(dec!(105)))])],
            ),
            create_test_session(
                "earlier",
                start,
                vec![
                    ("Bench Press", vec![create_test_set(8, Some(dec!(90)))]),
                    ("Bench Press", vec![create_test_set(3, Some(dec!(100)))]),
                    ("Squat", vec![create_test_set(5, Some(dec!(140)))]),
                ],
            ),
            create_test_session("no_bench", start + Duration::days(1), vec![("Squat", Vec::new())]),
        ];

        let clock = FixedClock::utc(start);
        let progress = exercise_progress(&sessions, "Bench Press", &clock);
        assert_eq!(progress.len(), 2);

        let first = &progress[0];
        assert_eq!(first.session_id, "earlier");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(first.best_weight, dec!(100));
        assert_eq!(first.best_reps, 8);
        assert_eq!(first.best_volume, dec!(720));
        // 90 × (1 + 8/30) = 114.0 beats 100 × (1 + 3/30) = 110.0
        assert_eq!(first.estimated_one_rep_max, dec!(114));

        assert_eq!(progress[1].session_id, "later");
        assert_eq!(progress[1].estimated_one_rep_max, dec!(122.5));
    }

    #[test]
    fn test_exercise_progress_skips_incomplete_and_empty() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 17, 0, 0).unwrap();
        let mut open = create_test_session(
            "open",
            start,
            vec![("Squat", vec![create_test_set(5, Some(dec!(150)))])],
        );
        open.ended_at = None;
        let empty = create_test_session("empty", start, vec![("Squat", Vec::new())]);

        let clock = FixedClock::utc(start);
        assert!(exercise_progress(&[open, empty], "squat", &clock).is_empty());
    }

    #[test]
    fn test_exercise_names() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 17, 0, 0).unwrap();
        let sessions = vec![
            create_test_session("a", start, vec![("Squat", Vec::new()), ("bench press", Vec::new())]),
            create_test_session("b", start, vec![("Bench Press", Vec::new()), ("Arnold Press", Vec::new())]),
        ];

        assert_eq!(
            exercise_names(&sessions),
            vec!["Arnold Press", "bench press", "Squat"]
        );
    }
}
