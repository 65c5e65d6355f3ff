//! Presentation: plain-text overview report and CSV exports.
//!
//! Everything here consumes the plain data records produced by the stats
//! pipeline; nothing feeds back into it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analytics::weekday_name;
use crate::models::{ChartSeries, ExerciseStats, UserAggregateStats, WeightStats};
use crate::traits::Clock;

// ==================== Text Report ====================

/// Render the overview report: aggregates, score, per-exercise table, and
/// (when a weight log exists) weight statistics and goal progress.
pub fn render_overview(
    user: &UserAggregateStats,
    score: i64,
    exercises: &[ExerciseStats],
    weight: Option<&WeightStats>,
    goal_progress: Option<f64>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== Training overview ==");
    let _ = writeln!(out, "Completed sessions: {}", user.total_sessions);
    let _ = writeln!(out, "Total weight lifted: {:.0}", user.total_weight_lifted);
    let _ = writeln!(
        out,
        "Streak: {} current / {} longest",
        user.current_streak, user.longest_streak
    );
    let _ = writeln!(
        out,
        "Active time: {:.1} h",
        user.total_active_seconds as f64 / 3600.0
    );
    let _ = writeln!(out, "Personal records: {}", user.personal_record_count);
    let _ = writeln!(out, "Leaderboard score: {}", score);

    if !exercises.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "== Exercises ==");
        for stats in exercises {
            let max = stats
                .max_weight
                .map(|w| format!("{w:.1}"))
                .unwrap_or_else(|| "-".to_string());
            let last = stats
                .last_session
                .map(|d| format!("{} ({})", d, weekday_name(d)))
                .unwrap_or_else(|| "-".to_string());

            let _ = writeln!(
                out,
                "{}: {} sessions, max {}, volume {:.0}, {:.1}/week, trend {} (last: {})",
                stats.exercise,
                stats.session_count,
                max,
                stats.total_volume,
                stats.sessions_per_week,
                stats.progression.trend.description(),
                last,
            );
        }
    }

    if let Some(weight) = weight {
        let _ = writeln!(out);
        let _ = writeln!(out, "== Body weight ==");
        let unit = weight.unit.as_str();
        let _ = writeln!(
            out,
            "Current {:.1} {unit} (started {:.1}, low {:.1}, high {:.1}, avg {:.1})",
            weight.current, weight.starting, weight.lowest, weight.highest, weight.average,
        );
        let _ = writeln!(
            out,
            "Change: {:+.1} {unit} ({:+.1}%), trend {:?} over {} entries",
            weight.change, weight.change_percent, weight.trend, weight.entry_count,
        );
        if let Some(progress) = goal_progress {
            let _ = writeln!(out, "Goal progress: {progress:.0}%");
        }
    }

    out
}

/// Render per-exercise detail: stats plus the chart points with PR markers.
pub fn render_exercise_detail(stats: &ExerciseStats, series: &ChartSeries) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", stats.exercise);
    let _ = writeln!(
        out,
        "Sessions: {} ({:.1}/week)",
        stats.session_count, stats.sessions_per_week
    );
    if let (Some(weight), Some(date)) = (stats.max_weight, stats.max_weight_date) {
        let _ = writeln!(out, "Max weight: {weight:.1} on {date}");
    }
    let _ = writeln!(
        out,
        "Volume: {:.0} total, {:.0} per session",
        stats.total_volume, stats.avg_volume_per_session
    );
    let _ = writeln!(
        out,
        "Trend: {} (slope {:.2}, r2 {:.2}, next ~{:.1})",
        stats.progression.trend.description(),
        stats.progression.slope,
        stats.progression.r_squared,
        stats.progression.projected_next,
    );

    for point in &series.points {
        let marker = if point.is_pr { "  PR" } else { "" };
        let _ = writeln!(out, "{}  {:.1}{}", point.date, point.value, marker);
    }

    out
}

// ==================== CSV Export ====================

/// Export a chart series to a timestamped CSV file in `output_dir`.
///
/// Returns the path to the created file.
pub fn export_chart_csv<C: Clock>(
    exercise: &str,
    series: &ChartSeries,
    output_dir: &Path,
    clock: &C,
) -> Result<PathBuf> {
    let slug: String = exercise
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();

    let filename = format!(
        "liftlog_{}_{}.csv",
        slug,
        clock.now_utc().format("%Y%m%d_%H%M%S")
    );
    let output_path = output_dir.join(&filename);

    let mut wtr = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create CSV file {}", output_path.display()))?;

    for point in &series.points {
        wtr.serialize(point)
            .context("Failed to serialize chart point")?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(output_path)
}

/// Export the per-exercise stats table to a timestamped CSV file.
pub fn export_stats_csv<C: Clock>(
    exercises: &[ExerciseStats],
    output_dir: &Path,
    clock: &C,
) -> Result<PathBuf> {
    let filename = format!(
        "liftlog_exercises_{}.csv",
        clock.now_utc().format("%Y%m%d_%H%M%S")
    );
    let output_path = output_dir.join(&filename);

    let mut wtr = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create CSV file {}", output_path.display()))?;

    wtr.write_record([
        "exercise",
        "session_count",
        "max_weight",
        "total_volume",
        "avg_volume_per_session",
        "sessions_per_week",
        "trend",
        "slope",
        "r_squared",
    ])
    .context("Failed to write CSV header")?;

    for stats in exercises {
        wtr.write_record([
            stats.exercise.clone(),
            stats.session_count.to_string(),
            stats.max_weight.map(|w| w.to_string()).unwrap_or_default(),
            stats.total_volume.to_string(),
            stats.avg_volume_per_session.to_string(),
            stats.sessions_per_week.to_string(),
            stats.progression.trend.description().to_string(),
            stats.progression.slope.to_string(),
            stats.progression.r_squared.to_string(),
        ])
        .context("Failed to write CSV row")?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(output_path)
}
