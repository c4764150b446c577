use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use liftrs::config::AppConfig;
use liftrs::error::{ErrorSeverity, LiftError};
use liftrs::import::load_sessions;
use liftrs::logging::{init_logging, LogLevel};
use liftrs::progression::{exercise_names, exercise_progress};
use liftrs::{
    summarize_sessions, StatisticsAggregator, StreakCalculator, SystemClock, WorkoutSession,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

/// liftrs - Workout statistics and streaks
///
/// Reads a JSON export of logged workout sessions and prints streaks,
/// lifetime totals, personal records and muscle-group breakdowns.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(version)]
#[command(about = "Workout statistics and streaks", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Session export (JSON array of sessions with exercises and sets)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current and longest streaks
    Streak {
        #[command(flatten)]
        source: InputArgs,
    },

    /// Show the full statistics bundle
    Stats {
        #[command(flatten)]
        source: InputArgs,

        /// Print the bundle as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show personal records
    Records {
        #[command(flatten)]
        source: InputArgs,

        /// Number of records to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show volume per muscle group
    Muscles {
        #[command(flatten)]
        source: InputArgs,
    },

    /// List workout days in a month
    Calendar {
        #[command(flatten)]
        source: InputArgs,

        #[arg(short, long)]
        year: i32,

        /// Month number (1-12)
        #[arg(short, long)]
        month: u32,
    },

    /// Show session-by-session progress for one exercise
    Progress {
        #[command(flatten)]
        source: InputArgs,

        /// Exercise name (case-insensitive); omit to list known exercises
        #[arg(short, long)]
        exercise: Option<String>,
    },

    /// List completed sessions, most recent first
    History {
        #[command(flatten)]
        source: InputArgs,

        /// Number of sessions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Exercise")]
    exercise: String,
    #[tabled(rename = "Max Weight")]
    max_weight: Decimal,
    #[tabled(rename = "Max Reps")]
    max_reps: u32,
    #[tabled(rename = "Best Set Volume")]
    max_volume: Decimal,
    #[tabled(rename = "Achieved")]
    achieved: String,
}

#[derive(Tabled)]
struct MuscleRow {
    #[tabled(rename = "Muscle Group")]
    group: String,
    #[tabled(rename = "Volume")]
    volume: Decimal,
    #[tabled(rename = "Sets")]
    sets: u32,
    #[tabled(rename = "Reps")]
    reps: u64,
    #[tabled(rename = "Share %")]
    percentage: u32,
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Best Weight")]
    best_weight: Decimal,
    #[tabled(rename = "Best Reps")]
    best_reps: u32,
    #[tabled(rename = "Best Volume")]
    best_volume: Decimal,
    #[tabled(rename = "Est. 1RM")]
    e1rm: Decimal,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Exercises")]
    exercises: u32,
    #[tabled(rename = "Sets")]
    sets: u32,
    #[tabled(rename = "Volume")]
    volume: Decimal,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "Avg RIR")]
    avg_rir: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(log_config.level, cli.verbose);
    init_logging(&log_config)?;

    let muscle_map = config.muscle_map()?;
    let aggregator = StatisticsAggregator::with_clock(&muscle_map, SystemClock)
        .with_config(config.stats.clone());
    let streaks = StreakCalculator::new();

    match cli.command {
        Commands::Streak { source } => {
            let sessions = read_sessions(&source)?;
            let data = streaks.calculate_streaks(&sessions);
            let frequency = streaks.weekly_frequency(&sessions, config.stats.frequency_weeks);

            println!("{}", "Workout streaks".green().bold());
            println!("  Current streak: {} days", data.current_streak);
            println!("  Longest streak: {} days", data.longest_streak);
            println!("  Total workouts: {}", data.total_workouts);
            println!(
                "  Days per week (last {} weeks): {}",
                config.stats.frequency_weeks, frequency
            );
        }

        Commands::Stats { source, json } => {
            let sessions = read_sessions(&source)?;
            let stats = aggregator.compute_all_statistics(&sessions);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            let all_time = &stats.all_time;
            println!("{}", "All-time statistics".blue().bold());
            println!("  Workouts: {}", all_time.total_workouts);
            println!("  Sets: {}  Reps: {}", all_time.total_sets, all_time.total_reps);
            println!("  Volume: {}", all_time.total_volume);
            println!(
                "  Time: {} min (avg {} min)",
                all_time.total_duration, all_time.avg_duration
            );
            println!(
                "  Per workout: {} sets, {} volume; {} reps per set",
                all_time.avg_sets_per_workout,
                all_time.avg_volume_per_workout,
                all_time.avg_reps_per_set
            );
            println!(
                "  Avg RIR: {}",
                all_time
                    .avg_rir
                    .map(|rir| rir.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );

            let comparison = &stats.period_comparison;
            println!();
            println!(
                "{}",
                format!("Last {} days vs previous", aggregator.config().comparison_days)
                    .cyan()
                    .bold()
            );
            println!(
                "  Workouts: {} ({})",
                comparison.current.workouts,
                format_change(comparison.changes.workouts)
            );
            println!(
                "  Volume: {} ({})",
                comparison.current.volume,
                format_change(comparison.changes.volume)
            );
            println!(
                "  Sets: {} ({})",
                comparison.current.sets,
                format_change(comparison.changes.sets)
            );
            println!(
                "  Minutes: {} ({})",
                comparison.current.duration,
                format_change(comparison.changes.duration)
            );

            if !stats.strength_trend.is_empty() {
                println!();
                println!("{}", "Strength trend".magenta().bold());
                for point in &stats.strength_trend {
                    println!(
                        "  #{:<3} {:<7} {}",
                        point.workout_number, point.date, point.strength_score
                    );
                }
            }
        }

        Commands::Records { source, limit } => {
            let sessions = read_sessions(&source)?;
            let limit = limit.unwrap_or(aggregator.config().personal_record_limit);
            let records = aggregator.compute_personal_records(&sessions, limit);

            println!("{}", "Personal records".yellow().bold());
            if records.is_empty() {
                println!("  No completed sets logged yet");
                return Ok(());
            }

            let rows: Vec<RecordRow> = records
                .into_iter()
                .map(|record| RecordRow {
                    exercise: record.exercise_name,
                    max_weight: record.max_weight,
                    max_reps: record.max_reps,
                    max_volume: record.max_volume,
                    achieved: record.achieved_at.format("%Y-%m-%d").to_string(),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }

        Commands::Muscles { source } => {
            let sessions = read_sessions(&source)?;
            let breakdown = aggregator.compute_muscle_group_breakdown(&sessions);

            println!("{}", "Volume by muscle group".cyan().bold());
            let rows: Vec<MuscleRow> = breakdown
                .into_iter()
                .map(|group| MuscleRow {
                    group: group.muscle_group,
                    volume: group.volume,
                    sets: group.sets,
                    reps: group.reps,
                    percentage: group.percentage,
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }

        Commands::Calendar {
            source,
            year,
            month,
        } => {
            if !(1..=12).contains(&month) {
                return Err(
                    LiftError::invalid_argument("month", month, "must be between 1 and 12").into(),
                );
            }

            let sessions = read_sessions(&source)?;
            let dates = streaks.workout_dates_for_month(year, month, &sessions);

            println!(
                "{}",
                format!("Workout days in {}-{:02}", year, month).green().bold()
            );
            if dates.is_empty() {
                println!("  None");
            }
            for date in &dates {
                println!("  {}", date);
            }
        }

        Commands::Progress { source, exercise } => {
            let sessions = read_sessions(&source)?;

            let Some(exercise) = exercise else {
                println!("{}", "Logged exercises".white().bold());
                for name in exercise_names(&sessions) {
                    println!("  {}", name);
                }
                return Ok(());
            };

            let progress = exercise_progress(&sessions, &exercise, &SystemClock);
            println!("{}", format!("Progress: {}", exercise).yellow().bold());
            if progress.is_empty() {
                println!("  No completed sets for this exercise");
                return Ok(());
            }

            let rows: Vec<ProgressRow> = progress
                .into_iter()
                .map(|point| ProgressRow {
                    date: point.date.to_string(),
                    best_weight: point.best_weight,
                    best_reps: point.best_reps,
                    best_volume: point.best_volume,
                    e1rm: point.estimated_one_rep_max,
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }

        Commands::History { source, limit } => {
            let sessions = read_sessions(&source)?;

            println!("{}", "Recent sessions".white().bold());
            let rows: Vec<HistoryRow> = summarize_sessions(&sessions)
                .into_iter()
                .take(limit)
                .map(|summary| HistoryRow {
                    started: summary.started_at.format("%Y-%m-%d %H:%M").to_string(),
                    exercises: summary.exercise_count,
                    sets: summary.total_sets,
                    volume: summary.total_volume,
                    minutes: summary.duration_minutes,
                    avg_rir: summary
                        .avg_rir
                        .map(|rir| rir.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }

    Ok(())
}

fn read_sessions(source: &InputArgs) -> Result<Vec<WorkoutSession>> {
    load_sessions(&source.input)
        .map_err(|err| {
            match err.severity() {
                ErrorSeverity::Warning => tracing::warn!(error = %err, "Failed to load sessions"),
                ErrorSeverity::Error => tracing::error!(error = %err, "Failed to load sessions"),
            }
            anyhow::anyhow!(err.user_message())
        })
        .with_context(|| format!("Reading {}", source.input.display()))
}

fn format_change(change: i64) -> ColoredString {
    let text = format!("{:+}%", change);
    match change.signum() {
        1 => text.green(),
        -1 => text.red(),
        _ => text.normal(),
    }
}
