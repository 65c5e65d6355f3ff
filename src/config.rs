use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::models::WeightUnit;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub data: DataConfig,
    pub display: DisplayConfig,
    pub analytics: AnalyticsConfig,
    pub score: ScoreWeights,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Path to the JSON snapshot the repository reads.
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: "liftlog.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Unit the weight log is normalized to when no goal dictates one.
    pub weight_unit: WeightUnit,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kg,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Minimum r-squared before a slope is trusted.
    pub min_r_squared: f64,
    /// Slopes within this band read as plateauing.
    pub slope_deadband: f64,
    /// Day-over-day delta below which the weight series reads as flat.
    pub weight_trend_threshold: f64,
    /// Number of most recent weight entries the trend vote looks at.
    pub weight_trend_window: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            min_r_squared: 0.3,
            slope_deadband: 0.1,
            weight_trend_threshold: 0.1,
            weight_trend_window: 5,
        }
    }
}

/// Weights of the composite leaderboard score. All terms additive, so each
/// is independently tunable; defaults favor consistency over tonnage.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoreWeights {
    pub session_weight: f64,
    pub tonnage_divisor: f64,
    pub streak_weight: f64,
    pub pr_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            session_weight: 10.0,
            tonnage_divisor: 1000.0,
            streak_weight: 50.0,
            pr_weight: 5.0,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Load .env file (silently ignore if not present)
        let _ = dotenvy::dotenv();

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("liftlog");

        let builder = Config::builder()
            // 1. Load default values
            // Data
            .set_default("data.path", "liftlog.json")?
            // Display
            .set_default("display.weight_unit", "kg")?
            // Analytics
            .set_default("analytics.min_r_squared", 0.3)?
            .set_default("analytics.slope_deadband", 0.1)?
            .set_default("analytics.weight_trend_threshold", 0.1)?
            .set_default("analytics.weight_trend_window", 5)?
            // Score
            .set_default("score.session_weight", 10.0)?
            .set_default("score.tonnage_divisor", 1000.0)?
            .set_default("score.streak_weight", 50.0)?
            .set_default("score.pr_weight", 5.0)?

            // 2. Load from local config file (optional, lowest priority)
            .add_source(File::from(PathBuf::from("config.toml")).required(false))

            // 3. Load from user config directory (optional, overrides local)
            .add_source(File::from(config_dir.join("config.toml")).required(false))

            // 4. Load from Environment variables (LIFTLOG__SCORE__PR_WEIGHT=...)
            .add_source(Environment::with_prefix("LIFTLOG").separator("__"));

        let s = builder.build()?;
        Ok(s.try_deserialize()?)
    }
}
