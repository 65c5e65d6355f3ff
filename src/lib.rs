//! Liftlog Library
//!
//! This module exposes the core components of the liftlog analytics tool
//! for testing and potential reuse.

pub mod analytics;
pub mod config;
pub mod leaderboard;
pub mod models;
pub mod report;
pub mod stats;
pub mod store;
pub mod traits;
pub mod units;
pub mod weight;

// Re-export commonly used types
pub use analytics::{
    // Streaks
    current_streak,
    current_streak_with_clock,
    longest_streak,
    // Personal records
    all_personal_records,
    detect_personal_records,
    personal_record_history,
    // Trend fitting
    classify_trend,
    classify_trend_with,
    composite_score,
    fit,
    predict,
    // Utility functions
    day_span,
    exercise_names,
    weekday_name,
    working_sets,
    WorkingSet,
};
pub use config::{AnalyticsConfig, AppConfig, ScoreWeights};
pub use leaderboard::{DisplayNameError, LeaderboardEntry, build_entry, validate_display_name};
pub use models::{
    ChartPoint, ChartSeries, ExerciseEntry, ExerciseStats, GoalDirection, PersonalRecordEvent,
    ProgressionMetrics, RecordKind, SetEntry, TrendDirection, TrendLine, UserAggregateStats,
    WeightGoal, WeightLogEntry, WeightStats, WeightTrend, WeightUnit, WorkoutSession,
};
pub use stats::{all_exercise_stats, chart_series, exercise_stats, user_stats, user_stats_with_clock};
pub use store::{JsonStore, Snapshot};
pub use traits::{Clock, MockClock, SystemClock, WeightRepository, WorkoutRepository};
pub use units::convert;
pub use weight::{goal_progress, weight_stats};
