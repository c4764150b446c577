use crate::models::{completed_sessions, WorkoutSession, WorkoutSet};
use crate::rounding::{average_1dp, round_whole, seconds_to_minutes};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running totals over a stream of sets.
///
/// The same accumulation backs all-time stats, period stats and
/// per-session summaries so they always agree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetTotals {
    pub sets: u32,
    pub reps: u64,
    pub volume: Decimal,
    pub rir_sum: u64,
    pub rir_count: u32,
}

impl SetTotals {
    pub fn add_set(&mut self, set: &WorkoutSet) {
        self.sets += 1;
        self.reps += u64::from(set.reps);
        self.volume += set.volume();
        if let Some(rir) = set.rir {
            self.rir_sum += u64::from(rir);
            self.rir_count += 1;
        }
    }

    pub fn add_session(&mut self, session: &WorkoutSession) {
        for set in session.sets() {
            self.add_set(set);
        }
    }

    /// Mean RIR to one decimal, None when no set recorded RIR
    pub fn avg_rir(&self) -> Option<Decimal> {
        if self.rir_count == 0 {
            return None;
        }
        Some(average_1dp(
            Decimal::from(self.rir_sum),
            Decimal::from(self.rir_count),
        ))
    }
}

/// Totals for one completed session, for history lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub exercise_count: u32,
    pub total_sets: u32,
    pub total_reps: u64,
    /// Whole-number volume
    pub total_volume: Decimal,
    pub duration_minutes: u32,
    pub avg_rir: Option<Decimal>,
    pub strength_score: Option<Decimal>,
}

impl SessionSummary {
    /// Summarize a session; None while it is still in progress
    pub fn from_session(session: &WorkoutSession) -> Option<Self> {
        if !session.is_completed() {
            return None;
        }

        let mut totals = SetTotals::default();
        totals.add_session(session);

        Some(SessionSummary {
            session_id: session.id.clone(),
            started_at: session.started_at,
            exercise_count: session.exercises.len() as u32,
            total_sets: totals.sets,
            total_reps: totals.reps,
            total_volume: round_whole(totals.volume),
            duration_minutes: seconds_to_minutes(Decimal::from(
                session.total_duration_sec.unwrap_or(0),
            )),
            avg_rir: totals.avg_rir(),
            strength_score: session.strength_score,
        })
    }
}

/// Summaries of every completed session, most recent first
pub fn summarize_sessions(sessions: &[WorkoutSession]) -> Vec<SessionSummary> {
    let mut summaries: Vec<SessionSummary> = completed_sessions(sessions)
        .filter_map(SessionSummary::from_session)
        .collect();
    summaries.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    summaries
}
