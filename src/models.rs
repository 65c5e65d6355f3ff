use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==================== Workout Log Records ====================

/// A single logged workout session.
///
/// Sessions arrive fully deserialized from the external store. Only sessions
/// with `completed == true` contribute to any analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,
    /// Calendar day of the session (whole days, compared at local midnight).
    pub date: NaiveDate,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    pub completed: bool,
}

impl WorkoutSession {
    /// Active duration in seconds, if both instants were recorded.
    pub fn active_seconds(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_seconds()),
            _ => None,
        }
    }
}

/// One exercise performed within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: String,
    pub session_id: String,
    /// Free-text exercise name, matched case-insensitively (exact, not fuzzy).
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

/// A single set within an exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetEntry {
    pub id: String,
    pub exercise_id: String,
    /// Repetitions performed (at least 1).
    pub reps: u32,
    /// Weight lifted, non-negative, in the user's logging unit.
    pub weight: f64,
    /// Warmup sets stay in the persisted record but are excluded from every
    /// volume, PR, and trend computation.
    #[serde(default)]
    pub warmup: bool,
    /// Rating of perceived exertion, 1-10. Absent is distinct from zero.
    pub rpe: Option<f64>,
    pub logged_at: Option<DateTime<Utc>>,
}

impl SetEntry {
    /// Single-set volume: reps x weight.
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

// ==================== Personal Records ====================

/// Which metric a personal record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Heaviest single set for the exercise
    MaxWeight,
    /// Largest reps x weight for a single set
    MaxVolume,
    /// Most reps at a previously used weight
    MaxReps,
}

impl RecordKind {
    /// Returns a human-readable label for the record kind.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::MaxWeight => "max weight",
            RecordKind::MaxVolume => "max volume",
            RecordKind::MaxReps => "max reps",
        }
    }
}

/// A detected personal record. Produced by the core, persisted elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecordEvent {
    pub exercise: String,
    pub kind: RecordKind,
    pub value: f64,
    pub date: NaiveDate,
    pub session_id: String,
    pub exercise_id: String,
    pub set_id: String,
}

// ==================== Trend Types ====================

/// Least-squares fit of a metric against chronological session index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, always within [0, 1].
    pub r_squared: f64,
}

/// Direction of an exercise progression trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Metric is rising with sufficient fit confidence
    Improving,
    /// Metric is falling with sufficient fit confidence
    Declining,
    /// Flat slope, or fit too weak to call either way
    Plateauing,
}

impl TrendDirection {
    /// Returns a human-readable description of the trend.
    pub fn description(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Plateauing => "plateauing",
        }
    }
}

/// Direction of the body-weight series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTrend {
    Increasing,
    Decreasing,
    Stable,
}

// ==================== Weight Log Records ====================

/// Mass unit used for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

/// One body-weight log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogEntry {
    pub id: String,
    pub weight: f64,
    pub unit: WeightUnit,
    pub date: NaiveDate,
    pub logged_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Direction of a stated weight goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    Lose,
    Gain,
    Maintain,
}

/// A user's active weight goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightGoal {
    pub target_weight: f64,
    pub unit: WeightUnit,
    pub direction: GoalDirection,
    pub start_weight: f64,
    pub start_date: NaiveDate,
    pub target_date: Option<NaiveDate>,
}

// ==================== Derived Statistics Records ====================

/// Regression-derived progression metrics for one exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionMetrics {
    pub slope: f64,
    pub r_squared: f64,
    pub trend: TrendDirection,
    /// Predicted per-session max weight at the next session index.
    pub projected_next: f64,
}

/// Per-exercise statistics consumed by presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseStats {
    pub exercise: String,
    pub max_weight: Option<f64>,
    pub max_weight_date: Option<NaiveDate>,
    /// Sum of reps x weight over all working sets.
    pub total_volume: f64,
    pub avg_volume_per_session: f64,
    pub session_count: usize,
    pub first_session: Option<NaiveDate>,
    pub last_session: Option<NaiveDate>,
    pub progression: ProgressionMetrics,
    pub sessions_per_week: f64,
}

/// Cross-exercise aggregate statistics for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAggregateStats {
    pub total_sessions: usize,
    /// Sum of non-warmup reps x weight across the whole log.
    pub total_weight_lifted: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_active_seconds: i64,
    pub personal_record_count: usize,
}

/// One chart-ready data point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub is_pr: bool,
    pub session_id: String,
}

/// Chart series with optional regression overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub trend: Option<TrendLine>,
}

/// Descriptive statistics over the body-weight log, all values normalized to
/// `unit` before comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightStats {
    pub unit: WeightUnit,
    pub current: f64,
    pub starting: f64,
    pub lowest: f64,
    pub highest: f64,
    pub average: f64,
    /// Absolute change since the first entry.
    pub change: f64,
    /// Percent change since the first entry.
    pub change_percent: f64,
    pub trend: WeightTrend,
    pub entry_count: usize,
}
