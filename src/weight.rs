//! Body-weight log analysis: descriptive statistics, short-window trend,
//! and goal progress. Independent of the workout pipeline.

use crate::config::AnalyticsConfig;
use crate::models::{WeightGoal, WeightLogEntry, WeightStats, WeightTrend, WeightUnit};
use crate::units;

// ==================== Weight Statistics ====================

/// Descriptive statistics over the weight log, normalized to `display_unit`
/// before any comparison. Empty input yields `None`.
pub fn weight_stats(
    entries: &[WeightLogEntry],
    display_unit: WeightUnit,
    config: &AnalyticsConfig,
) -> Option<WeightStats> {
    if entries.is_empty() {
        return None;
    }

    let mut ordered: Vec<(chrono::NaiveDate, f64)> = entries
        .iter()
        .map(|e| (e.date, units::convert(e.weight, e.unit, display_unit)))
        .collect();
    ordered.sort_by_key(|(date, _)| *date);

    let values: Vec<f64> = ordered.iter().map(|(_, w)| *w).collect();
    let n = values.len();

    let starting = values[0];
    let current = values[n - 1];
    let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let average = values.iter().sum::<f64>() / n as f64;

    let change = current - starting;
    let change_percent = if starting != 0.0 {
        change / starting * 100.0
    } else {
        0.0
    };

    Some(WeightStats {
        unit: display_unit,
        current,
        starting,
        lowest,
        highest,
        average,
        change,
        change_percent,
        trend: classify_weight_trend(
            &values,
            config.weight_trend_window,
            config.weight_trend_threshold,
        ),
        entry_count: n,
    })
}

/// Trend label from the sign-majority of day-over-day deltas over the last
/// `window` entries. Deltas inside the threshold band do not vote. Fewer
/// than two entries yields `Stable`.
fn classify_weight_trend(values: &[f64], window: usize, threshold: f64) -> WeightTrend {
    if values.len() < 2 {
        return WeightTrend::Stable;
    }

    let start = values.len().saturating_sub(window);
    let recent = &values[start..];

    let mut up = 0;
    let mut down = 0;
    for pair in recent.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > threshold {
            up += 1;
        } else if delta < -threshold {
            down += 1;
        }
    }

    if up > down {
        WeightTrend::Increasing
    } else if down > up {
        WeightTrend::Decreasing
    } else {
        WeightTrend::Stable
    }
}

// ==================== Goal Progress ====================

/// Percentage of the way from the goal's start weight to its target,
/// capped at 100. Defined as 100 when start equals target (nothing left to
/// move). `current` must already be in `current_unit`; goal values are
/// converted from the goal's own unit before comparison.
pub fn goal_progress(current: f64, current_unit: WeightUnit, goal: &WeightGoal) -> f64 {
    let target = units::convert(goal.target_weight, goal.unit, current_unit);
    let start = units::convert(goal.start_weight, goal.unit, current_unit);

    let full_span = (target - start).abs();
    if full_span == 0.0 {
        return 100.0;
    }

    let covered = (current - start).abs();
    (covered / full_span * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::GoalDirection;

    fn entry(id: &str, date: (i32, u32, u32), weight: f64, unit: WeightUnit) -> WeightLogEntry {
        WeightLogEntry {
            id: id.to_string(),
            weight,
            unit,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            logged_at: None,
            notes: None,
        }
    }

    fn kg_series(weights: &[f64]) -> Vec<WeightLogEntry> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| entry(&format!("w{i}"), (2024, 6, 1 + i as u32), *w, WeightUnit::Kg))
            .collect()
    }

    // ==================== Weight Stats Tests ====================

    #[test]
    fn test_weight_stats_empty() {
        assert!(weight_stats(&[], WeightUnit::Kg, &AnalyticsConfig::default()).is_none());
    }

    #[test]
    fn test_weight_stats_descriptives() {
        let entries = kg_series(&[82.0, 81.5, 80.9, 81.2, 80.4]);
        let stats = weight_stats(&entries, WeightUnit::Kg, &AnalyticsConfig::default()).unwrap();

        assert_eq!(stats.starting, 82.0);
        assert_eq!(stats.current, 80.4);
        assert_eq!(stats.lowest, 80.4);
        assert_eq!(stats.highest, 82.0);
        assert_eq!(stats.entry_count, 5);
        assert!((stats.change - (-1.6)).abs() < 1e-9);
        assert!((stats.change_percent - (-1.6 / 82.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_weight_stats_normalizes_mixed_units() {
        let entries = vec![
            entry("w0", (2024, 6, 1), 100.0, WeightUnit::Kg),
            entry("w1", (2024, 6, 2), 220.0, WeightUnit::Lb), // 99.8 kg
        ];
        let stats = weight_stats(&entries, WeightUnit::Kg, &AnalyticsConfig::default()).unwrap();

        assert_eq!(stats.starting, 100.0);
        assert_eq!(stats.current, 99.8);
        assert_eq!(stats.unit, WeightUnit::Kg);
    }

    #[test]
    fn test_weight_stats_sorts_by_date() {
        let entries = vec![
            entry("w1", (2024, 6, 10), 79.0, WeightUnit::Kg),
            entry("w0", (2024, 6, 1), 82.0, WeightUnit::Kg),
        ];
        let stats = weight_stats(&entries, WeightUnit::Kg, &AnalyticsConfig::default()).unwrap();
        assert_eq!(stats.starting, 82.0);
        assert_eq!(stats.current, 79.0);
    }

    #[test]
    fn test_weight_trend_decreasing() {
        let entries = kg_series(&[84.0, 83.5, 83.0, 82.4, 81.9]);
        let stats = weight_stats(&entries, WeightUnit::Kg, &AnalyticsConfig::default()).unwrap();
        assert_eq!(stats.trend, WeightTrend::Decreasing);
    }

    #[test]
    fn test_weight_trend_increasing() {
        let entries = kg_series(&[70.0, 70.4, 70.9, 71.3, 71.8]);
        let stats = weight_stats(&entries, WeightUnit::Kg, &AnalyticsConfig::default()).unwrap();
        assert_eq!(stats.trend, WeightTrend::Increasing);
    }

    #[test]
    fn test_weight_trend_stable_within_threshold() {
        // All deltas inside the +/-0.1 band: nobody votes
        let entries = kg_series(&[75.0, 75.05, 75.0, 74.95, 75.0]);
        let stats = weight_stats(&entries, WeightUnit::Kg, &AnalyticsConfig::default()).unwrap();
        assert_eq!(stats.trend, WeightTrend::Stable);
    }

    #[test]
    fn test_weight_trend_single_entry_stable() {
        let entries = kg_series(&[75.0]);
        let stats = weight_stats(&entries, WeightUnit::Kg, &AnalyticsConfig::default()).unwrap();
        assert_eq!(stats.trend, WeightTrend::Stable);
    }

    #[test]
    fn test_weight_trend_window_ignores_old_history() {
        // Strong early rise followed by a five-entry decline; only the
        // window votes.
        let entries = kg_series(&[70.0, 75.0, 80.0, 84.9, 84.4, 83.9, 83.3, 82.8]);
        let stats = weight_stats(&entries, WeightUnit::Kg, &AnalyticsConfig::default()).unwrap();
        assert_eq!(stats.trend, WeightTrend::Decreasing);
    }

    // ==================== Goal Progress Tests ====================

    fn goal(start: f64, target: f64) -> WeightGoal {
        WeightGoal {
            target_weight: target,
            unit: WeightUnit::Kg,
            direction: if target < start {
                GoalDirection::Lose
            } else {
                GoalDirection::Gain
            },
            start_weight: start,
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            target_date: None,
        }
    }

    #[test]
    fn test_goal_progress_halfway() {
        let progress = goal_progress(77.5, WeightUnit::Kg, &goal(80.0, 75.0));
        assert!((progress - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_progress_caps_at_100() {
        let progress = goal_progress(70.0, WeightUnit::Kg, &goal(80.0, 75.0));
        assert_eq!(progress, 100.0);
    }

    #[test]
    fn test_goal_progress_start_equals_target() {
        let progress = goal_progress(80.0, WeightUnit::Kg, &goal(75.0, 75.0));
        assert_eq!(progress, 100.0);
    }

    #[test]
    fn test_goal_progress_no_movement() {
        let progress = goal_progress(80.0, WeightUnit::Kg, &goal(80.0, 75.0));
        assert_eq!(progress, 0.0);
    }

    #[test]
    fn test_goal_progress_converts_goal_units() {
        let mut g = goal(176.4, 165.3); // lb figures
        g.unit = WeightUnit::Lb;
        // 176.4 lb = 80.0 kg, 165.3 lb = 75.0 kg; current 77.5 kg is halfway
        let progress = goal_progress(77.5, WeightUnit::Kg, &g);
        assert!((progress - 50.0).abs() < 1.0);
    }
}
