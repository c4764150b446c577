use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A logged workout session with its exercises and sets
///
/// This is the nested shape produced by a single bulk fetch from the
/// store: every session carries all of its exercises, and every exercise
/// all of its sets. Child collections are always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    /// Unique identifier for the session
    pub id: String,

    /// Owner of the session
    pub user_id: String,

    /// Routine the session was started from, if any
    #[serde(default)]
    pub routine_id: Option<String>,

    /// Routine day the session was started from, if any
    #[serde(default)]
    pub routine_day_id: Option<String>,

    /// When the session was started
    pub started_at: DateTime<Utc>,

    /// When the session was finished (None while still in progress)
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,

    /// Total session duration in seconds
    #[serde(default)]
    pub total_duration_sec: Option<u32>,

    /// Volume-derived score assigned when the session was finished
    #[serde(default)]
    pub strength_score: Option<Decimal>,

    /// Exercises performed, in logging order
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

/// One exercise within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: String,

    pub session_id: String,

    /// Display name, also the join key into the muscle map
    pub name: String,

    pub sort_order: u32,

    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

/// A single logged set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub id: String,

    pub exercise_id: String,

    /// 1-based position within the exercise
    pub set_number: u32,

    pub reps: u32,

    /// Load in the user's unit; None for bodyweight sets
    #[serde(default)]
    pub weight: Option<Decimal>,

    /// Reps in reserve (0-10)
    #[serde(default)]
    pub rir: Option<u8>,

    pub completed_at: DateTime<Utc>,
}

impl WorkoutSession {
    /// A session counts toward statistics only once it has been ended
    pub fn is_completed(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Iterate every set of every exercise in this session
    pub fn sets(&self) -> impl Iterator<Item = &WorkoutSet> {
        self.exercises.iter().flat_map(|exercise| exercise.sets.iter())
    }
}

impl WorkoutSet {
    /// Weight with bodyweight sets treated as zero load
    pub fn weight_or_zero(&self) -> Decimal {
        self.weight.unwrap_or(Decimal::ZERO)
    }

    /// Single-set volume: weight × reps
    pub fn volume(&self) -> Decimal {
        self.weight_or_zero() * Decimal::from(self.reps)
    }
}

/// Only the sessions that have been ended
pub fn completed_sessions(
    sessions: &[WorkoutSession],
) -> impl Iterator<Item = &WorkoutSession> {
    sessions.iter().filter(|session| session.is_completed())
}
