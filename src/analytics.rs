use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::config::ScoreWeights;
use crate::models::{
    PersonalRecordEvent, RecordKind, SetEntry, TrendDirection, TrendLine, UserAggregateStats,
    WorkoutSession,
};
use crate::traits::{Clock, SystemClock};

/// Minimum r-squared before a slope is trusted enough to call a direction.
pub const MIN_TREND_R_SQUARED: f64 = 0.3;

/// Slopes within this deadband count as plateauing.
pub const SLOPE_DEADBAND: f64 = 0.1;

// ==================== Working Set Aggregation ====================

/// A non-warmup set annotated with its owning session's date and id.
///
/// This is the unit every volume, PR, and trend computation works on.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    pub set_id: String,
    pub exercise_id: String,
    pub session_id: String,
    pub date: NaiveDate,
    pub reps: u32,
    pub weight: f64,
}

impl WorkingSet {
    /// Single-set volume: reps x weight.
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

/// Flatten the session -> exercise -> set hierarchy into the chronologically
/// ordered working sets for one exercise.
///
/// Keeps only completed sessions, matches the exercise name
/// case-insensitively (exact, not fuzzy), drops warmup sets, and sorts
/// ascending by session date (stable on ties). Deterministic and
/// side-effect-free.
pub fn working_sets(exercise: &str, sessions: &[WorkoutSession]) -> Vec<WorkingSet> {
    let wanted = exercise.to_lowercase();

    let mut sets: Vec<WorkingSet> = sessions
        .iter()
        .filter(|s| s.completed)
        .flat_map(|session| {
            session
                .exercises
                .iter()
                .filter(|e| e.name.to_lowercase() == wanted)
                .flat_map(move |entry| {
                    entry
                        .sets
                        .iter()
                        .filter(|set| !set.warmup)
                        .map(move |set| WorkingSet {
                            set_id: set.id.clone(),
                            exercise_id: entry.id.clone(),
                            session_id: session.id.clone(),
                            date: session.date,
                            reps: set.reps,
                            weight: set.weight,
                        })
                })
        })
        .collect();

    sets.sort_by_key(|s| s.date);
    sets
}

/// Distinct exercise names appearing in completed sessions, first-seen
/// casing preserved.
pub fn exercise_names(sessions: &[WorkoutSession]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for session in sessions.iter().filter(|s| s.completed) {
        for entry in &session.exercises {
            if seen.insert(entry.name.to_lowercase()) {
                names.push(entry.name.clone());
            }
        }
    }

    names
}

// ==================== Linear Regression ====================

/// Ordinary least-squares fit over `(x, y)` pairs.
///
/// Empty input yields the zero line; a single point yields a flat line
/// through it with a perfect fit. When all x-values coincide the slope
/// denominator vanishes, so the fit falls back to the flat line through the
/// mean (r-squared 1 when the points are all equal, 0 otherwise).
/// The returned r-squared is always within [0, 1].
pub fn fit(points: &[(f64, f64)]) -> TrendLine {
    if points.is_empty() {
        return TrendLine {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
        };
    }
    if points.len() == 1 {
        return TrendLine {
            slope: 0.0,
            intercept: points[0].1,
            r_squared: 1.0,
        };
    }

    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_yy: f64 = points.iter().map(|(_, y)| y * y).sum();

    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let ss_total = sum_yy - n * mean_y * mean_y;

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        // All x-values identical: fall back to the flat line through the mean.
        let r_squared = if ss_total.abs() < f64::EPSILON {
            1.0
        } else {
            0.0
        };
        return TrendLine {
            slope: 0.0,
            intercept: mean_y,
            r_squared,
        };
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = mean_y - slope * mean_x;

    let ss_residual: f64 = points
        .iter()
        .map(|(x, y)| {
            let predicted = slope * x + intercept;
            (y - predicted) * (y - predicted)
        })
        .sum();

    let r_squared = if ss_total.abs() < f64::EPSILON {
        1.0
    } else {
        (1.0 - ss_residual / ss_total).clamp(0.0, 1.0)
    };

    TrendLine {
        slope,
        intercept,
        r_squared,
    }
}

/// Evaluate the fitted line at `x`.
pub fn predict(line: &TrendLine, x: f64) -> f64 {
    line.slope * x + line.intercept
}

// ==================== Trend Classification ====================

/// Map a fitted line onto a three-way trend label using the default
/// thresholds.
pub fn classify_trend(slope: f64, r_squared: f64) -> TrendDirection {
    classify_trend_with(slope, r_squared, MIN_TREND_R_SQUARED, SLOPE_DEADBAND)
}

/// Trend classification with explicit thresholds (configurable via
/// `AnalyticsConfig`).
///
/// A weak fit always reads as plateauing regardless of slope.
pub fn classify_trend_with(
    slope: f64,
    r_squared: f64,
    min_r_squared: f64,
    deadband: f64,
) -> TrendDirection {
    if r_squared < min_r_squared {
        return TrendDirection::Plateauing;
    }
    if slope > deadband {
        TrendDirection::Improving
    } else if slope < -deadband {
        TrendDirection::Declining
    } else {
        TrendDirection::Plateauing
    }
}

// ==================== Personal Record Detection ====================

/// Compare a newly logged set against all prior working sets for the same
/// exercise.
///
/// The candidate's own session is excluded from the history, so an unsaved
/// session cannot compete with itself. Up to three independent events are
/// returned: max weight, max single-set volume, and max reps at the
/// candidate's exact weight (the last only when a prior weight-matched set
/// exists). With no prior history at all, no event is emitted.
pub fn detect_personal_records(
    exercise: &str,
    candidate: &SetEntry,
    session: &WorkoutSession,
    sessions: &[WorkoutSession],
) -> Vec<PersonalRecordEvent> {
    let prior: Vec<WorkingSet> = working_sets(exercise, sessions)
        .into_iter()
        .filter(|s| s.session_id != session.id)
        .collect();

    if prior.is_empty() {
        return Vec::new();
    }

    let mut events = Vec::new();

    let make_event = |kind: RecordKind, value: f64| PersonalRecordEvent {
        exercise: exercise.to_string(),
        kind,
        value,
        date: session.date,
        session_id: session.id.clone(),
        exercise_id: candidate.exercise_id.clone(),
        set_id: candidate.id.clone(),
    };

    let best_weight = prior
        .iter()
        .map(|s| s.weight)
        .fold(f64::NEG_INFINITY, f64::max);
    if candidate.weight > best_weight {
        events.push(make_event(RecordKind::MaxWeight, candidate.weight));
    }

    let best_volume = prior
        .iter()
        .map(WorkingSet::volume)
        .fold(f64::NEG_INFINITY, f64::max);
    if candidate.volume() > best_volume {
        events.push(make_event(RecordKind::MaxVolume, candidate.volume()));
    }

    let best_reps_at_weight = prior
        .iter()
        .filter(|s| s.weight == candidate.weight)
        .map(|s| s.reps)
        .max();
    if let Some(best_reps) = best_reps_at_weight {
        if candidate.reps > best_reps {
            events.push(make_event(RecordKind::MaxReps, f64::from(candidate.reps)));
        }
    }

    events
}

/// Reconstruct every PR event for one exercise by replaying the snapshot.
///
/// Sessions are walked in chronological order and each working set is
/// checked against the sessions that came before it, exactly as the detector
/// would have seen it at logging time. The core stores nothing, so chart
/// markers and record counts are rebuilt from this replay on demand.
pub fn personal_record_history(
    exercise: &str,
    sessions: &[WorkoutSession],
) -> Vec<PersonalRecordEvent> {
    let wanted = exercise.to_lowercase();

    let mut ordered: Vec<&WorkoutSession> = sessions.iter().filter(|s| s.completed).collect();
    ordered.sort_by_key(|s| s.date);

    let mut events = Vec::new();
    let mut seen: Vec<WorkoutSession> = Vec::new();

    for session in ordered {
        for entry in &session.exercises {
            if entry.name.to_lowercase() != wanted {
                continue;
            }
            for set in entry.sets.iter().filter(|s| !s.warmup) {
                events.extend(detect_personal_records(exercise, set, session, &seen));
            }
        }
        seen.push((*session).clone());
    }

    tracing::debug!(
        exercise,
        events = events.len(),
        "replayed personal record history"
    );
    events
}

/// All PR events across every exercise in the snapshot.
pub fn all_personal_records(sessions: &[WorkoutSession]) -> Vec<PersonalRecordEvent> {
    exercise_names(sessions)
        .iter()
        .flat_map(|name| personal_record_history(name, sessions))
        .collect()
}

// ==================== Streak Calculation ====================

/// Unique completed-session days, sorted ascending.
fn completed_days(sessions: &[WorkoutSession]) -> Vec<NaiveDate> {
    let days: HashSet<NaiveDate> = sessions
        .iter()
        .filter(|s| s.completed)
        .map(|s| s.date)
        .collect();

    let mut days: Vec<NaiveDate> = days.into_iter().collect();
    days.sort();
    days
}

/// Current consecutive-day streak, evaluated against the system clock.
/// This is a convenience wrapper for callers that live in wall-clock time.
pub fn current_streak(sessions: &[WorkoutSession]) -> u32 {
    current_streak_with_clock(sessions, &SystemClock)
}

/// Current consecutive-day streak with an injected clock.
///
/// The streak is broken when the most recent completed day is more than one
/// day before today; otherwise it is the run of consecutive days walking
/// backwards from that most recent day.
pub fn current_streak_with_clock<C: Clock>(sessions: &[WorkoutSession], clock: &C) -> u32 {
    let days: HashSet<NaiveDate> = completed_days(sessions).into_iter().collect();

    let Some(&latest) = days.iter().max() else {
        return 0;
    };

    let today = clock.now_local().date_naive();
    if latest < today - Days::new(1) {
        return 0;
    }

    let mut streak = 0;
    let mut day = latest;
    while days.contains(&day) {
        streak += 1;
        let Some(previous) = day.checked_sub_days(Days::new(1)) else {
            break;
        };
        day = previous;
    }
    streak
}

/// Longest consecutive-day streak anywhere in the log.
pub fn longest_streak(sessions: &[WorkoutSession]) -> u32 {
    let days = completed_days(sessions);
    if days.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut run = 1;
    for pair in days.windows(2) {
        if pair[1] == pair[0] + Days::new(1) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}

// ==================== Composite Score ====================

/// Combine aggregate stats into the single leaderboard score.
///
/// All terms are additive and independently tunable; the default weighting
/// favors consistency (streak, session count) over raw tonnage. Monotone in
/// every input.
pub fn composite_score(stats: &UserAggregateStats, weights: &ScoreWeights) -> i64 {
    let active_hours = stats.total_active_seconds as f64 / 3600.0;

    let score = weights.session_weight * stats.total_sessions as f64
        + stats.total_weight_lifted / weights.tonnage_divisor
        + weights.streak_weight * f64::from(stats.current_streak)
        + active_hours
        + weights.pr_weight * stats.personal_record_count as f64;

    score.round() as i64
}

// ==================== Utility Functions ====================

/// Whole days between two session dates, floored to 1 so frequency math
/// never divides by zero.
pub fn day_span(first: NaiveDate, last: NaiveDate) -> i64 {
    (last - first).num_days().max(1)
}

/// Weekday name for report rendering.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    const DAY_NAMES: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];
    DAY_NAMES[date.weekday().num_days_from_monday() as usize]
}
