//! Per-exercise and per-user statistics assembled from the snapshot.
//!
//! Everything here recomputes from scratch on every call; no derived value
//! is mutated in place.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analytics::{
    self, all_personal_records, classify_trend_with, day_span, fit, personal_record_history,
    predict, working_sets,
};
use crate::config::AnalyticsConfig;
use crate::models::{
    ChartPoint, ChartSeries, ExerciseStats, ProgressionMetrics, RecordKind, TrendDirection,
    UserAggregateStats, WorkoutSession,
};
use crate::traits::{Clock, SystemClock};

/// Chart points match a PR event when values agree within this tolerance.
pub const PR_VALUE_TOLERANCE: f64 = 0.01;

// ==================== Per-Session Series ====================

/// One point per distinct session date: the maximum working-set weight
/// logged that day, with the owning session's id.
fn per_session_max_weights(
    exercise: &str,
    sessions: &[WorkoutSession],
) -> Vec<(NaiveDate, f64, String)> {
    let mut by_day: BTreeMap<NaiveDate, (f64, String)> = BTreeMap::new();

    for set in working_sets(exercise, sessions) {
        by_day
            .entry(set.date)
            .and_modify(|(weight, session_id)| {
                if set.weight > *weight {
                    *weight = set.weight;
                    *session_id = set.session_id.clone();
                }
            })
            .or_insert((set.weight, set.session_id.clone()));
    }

    by_day
        .into_iter()
        .map(|(date, (weight, session_id))| (date, weight, session_id))
        .collect()
}

// ==================== Exercise Statistics ====================

/// Compute full statistics for one exercise.
///
/// Regression runs over the index-vs-max-weight series (index = chronological
/// session rank, not date, so spacing is uniform); the projection evaluates
/// the fitted line at the next index. Empty input yields a zeroed result.
pub fn exercise_stats(
    exercise: &str,
    sessions: &[WorkoutSession],
    config: &AnalyticsConfig,
) -> ExerciseStats {
    let sets = working_sets(exercise, sessions);

    if sets.is_empty() {
        return ExerciseStats {
            exercise: exercise.to_string(),
            max_weight: None,
            max_weight_date: None,
            total_volume: 0.0,
            avg_volume_per_session: 0.0,
            session_count: 0,
            first_session: None,
            last_session: None,
            progression: ProgressionMetrics {
                slope: 0.0,
                r_squared: 0.0,
                trend: TrendDirection::Plateauing,
                projected_next: 0.0,
            },
            sessions_per_week: 0.0,
        };
    }

    // Heaviest single working set; ties keep the earliest occurrence.
    let mut max_weight = sets[0].weight;
    let mut max_weight_date = sets[0].date;
    for set in &sets[1..] {
        if set.weight > max_weight {
            max_weight = set.weight;
            max_weight_date = set.date;
        }
    }

    let total_volume: f64 = sets.iter().map(|s| s.volume()).sum();

    let mut session_ids: Vec<&str> = sets.iter().map(|s| s.session_id.as_str()).collect();
    session_ids.sort_unstable();
    session_ids.dedup();
    let session_count = session_ids.len();

    let first_date = sets[0].date;
    let last_date = sets[sets.len() - 1].date;

    let series = per_session_max_weights(exercise, sessions);
    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, (_, weight, _))| (i as f64, *weight))
        .collect();

    let line = fit(&points);
    let trend = classify_trend_with(
        line.slope,
        line.r_squared,
        config.min_r_squared,
        config.slope_deadband,
    );
    let projected_next = predict(&line, points.len() as f64);

    let span = day_span(first_date, last_date);
    let sessions_per_week = session_count as f64 / (span as f64 / 7.0);

    tracing::debug!(
        exercise,
        session_count,
        slope = line.slope,
        r_squared = line.r_squared,
        "computed exercise stats"
    );

    ExerciseStats {
        exercise: exercise.to_string(),
        max_weight: Some(max_weight),
        max_weight_date: Some(max_weight_date),
        total_volume,
        avg_volume_per_session: total_volume / session_count as f64,
        session_count,
        first_session: Some(first_date),
        last_session: Some(last_date),
        progression: ProgressionMetrics {
            slope: line.slope,
            r_squared: line.r_squared,
            trend,
            projected_next,
        },
        sessions_per_week,
    }
}

/// Statistics for every distinct exercise in the snapshot, sorted descending
/// by session count.
pub fn all_exercise_stats(
    sessions: &[WorkoutSession],
    config: &AnalyticsConfig,
) -> Vec<ExerciseStats> {
    let mut stats: Vec<ExerciseStats> = analytics::exercise_names(sessions)
        .iter()
        .map(|name| exercise_stats(name, sessions, config))
        .collect();

    stats.sort_by(|a, b| b.session_count.cmp(&a.session_count));
    stats
}

// ==================== User Aggregate Statistics ====================

/// Cross-exercise aggregates, evaluated against the system clock.
/// This is a convenience wrapper for callers that live in wall-clock time.
pub fn user_stats(sessions: &[WorkoutSession]) -> UserAggregateStats {
    user_stats_with_clock(sessions, &SystemClock)
}

/// Cross-exercise aggregates with an injected clock (the clock only feeds
/// the current-streak calculation).
pub fn user_stats_with_clock<C: Clock>(
    sessions: &[WorkoutSession],
    clock: &C,
) -> UserAggregateStats {
    let completed: Vec<&WorkoutSession> = sessions.iter().filter(|s| s.completed).collect();

    let total_weight_lifted: f64 = completed
        .iter()
        .flat_map(|s| &s.exercises)
        .flat_map(|e| &e.sets)
        .filter(|set| !set.warmup)
        .map(|set| set.volume())
        .sum();

    let total_active_seconds: i64 = completed.iter().filter_map(|s| s.active_seconds()).sum();

    UserAggregateStats {
        total_sessions: completed.len(),
        total_weight_lifted,
        current_streak: analytics::current_streak_with_clock(sessions, clock),
        longest_streak: analytics::longest_streak(sessions),
        total_active_seconds,
        personal_record_count: all_personal_records(sessions).len(),
    }
}

// ==================== Chart Series ====================

/// Chart-ready per-session max-weight series with regression overlay and PR
/// markers.
///
/// A point is marked as a PR when a replayed max-weight record event shares
/// its date and matches its value within `PR_VALUE_TOLERANCE`.
pub fn chart_series(exercise: &str, sessions: &[WorkoutSession]) -> ChartSeries {
    let series = per_session_max_weights(exercise, sessions);
    if series.is_empty() {
        return ChartSeries {
            points: Vec::new(),
            trend: None,
        };
    }

    let records: Vec<_> = personal_record_history(exercise, sessions)
        .into_iter()
        .filter(|e| e.kind == RecordKind::MaxWeight)
        .collect();

    let points: Vec<ChartPoint> = series
        .iter()
        .map(|(date, weight, session_id)| {
            let is_pr = records
                .iter()
                .any(|e| e.date == *date && (e.value - weight).abs() <= PR_VALUE_TOLERANCE);
            ChartPoint {
                date: *date,
                value: *weight,
                is_pr,
                session_id: session_id.clone(),
            }
        })
        .collect();

    let xy: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    ChartSeries {
        points,
        trend: Some(fit(&xy)),
    }
}
