use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use liftlog::{
    config::AppConfig,
    report,
    stats,
    store::JsonStore,
    traits::{SystemClock, WeightRepository, WorkoutRepository},
    weight,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "liftlog")]
#[command(about = "Workout log analytics - PRs, trends, streaks, and weight goals")]
struct Args {
    /// Path to the workout snapshot file (overrides the configured path)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Show a detailed view for a single exercise instead of the overview
    #[arg(long)]
    exercise: Option<String>,

    /// Export CSV files into the given directory
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .parse_lossy("liftlog=debug");

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let data_path = args
        .data
        .unwrap_or_else(|| PathBuf::from(&config.data.path));
    tracing::info!("Reading snapshot from {}", data_path.display());

    let store = JsonStore::open(&data_path)
        .with_context(|| format!("Failed to open snapshot {}", data_path.display()))?;

    let sessions = store.all_sessions()?;
    tracing::debug!("Loaded {} sessions", sessions.len());

    let clock = SystemClock;

    if let Some(exercise) = &args.exercise {
        let exercise_stats = stats::exercise_stats(exercise, &sessions, &config.analytics);
        if exercise_stats.session_count == 0 {
            anyhow::bail!("No completed sessions found for exercise '{exercise}'");
        }

        let series = stats::chart_series(exercise, &sessions);
        print!("{}", report::render_exercise_detail(&exercise_stats, &series));

        if let Some(dir) = &args.export {
            let path = report::export_chart_csv(exercise, &series, dir, &clock)?;
            tracing::info!("Exported chart data to {}", path.display());
        }

        return Ok(());
    }

    let user = stats::user_stats_with_clock(&sessions, &clock);
    let score = liftlog::composite_score(&user, &config.score);
    let exercises = stats::all_exercise_stats(&sessions, &config.analytics);

    // The active goal's unit, when one exists, wins over the configured
    // display unit so progress and stats read in the same scale.
    let goal = store.active_goal()?;
    let display_unit = goal
        .as_ref()
        .map(|g| g.unit)
        .unwrap_or(config.display.weight_unit);

    let entries = store.all_entries()?;
    let weight_stats = weight::weight_stats(&entries, display_unit, &config.analytics);
    let goal_progress = match (&weight_stats, &goal) {
        (Some(stats), Some(goal)) => Some(weight::goal_progress(stats.current, stats.unit, goal)),
        _ => None,
    };

    print!(
        "{}",
        report::render_overview(&user, score, &exercises, weight_stats.as_ref(), goal_progress)
    );

    if let Some(dir) = &args.export {
        let path = report::export_stats_csv(&exercises, dir, &clock)?;
        tracing::info!("Exported exercise stats to {}", path.display());
    }

    Ok(())
}
