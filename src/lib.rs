// Library interface for liftrs modules
// The command-line driver and integration tests both go through here

pub mod clock;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod muscles;
pub mod progression;
pub mod rounding;
pub mod session;
pub mod stats;
pub mod streak;

// Re-export commonly used types for convenience
pub use models::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use muscles::ExerciseMuscleMap;
pub use session::{summarize_sessions, SessionSummary};
pub use stats::{
    AllTimeStats, ComputedStatistics, MuscleGroupStat, PeriodComparison, PeriodStats,
    PersonalRecord, StatisticsAggregator, StatsConfig, StrengthTrendPoint,
};
pub use streak::{StreakCalculator, StreakData};
pub use progression::{estimated_one_rep_max, exercise_progress, ExerciseProgressPoint};
pub use error::{LiftError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
