//! Leaderboard record construction.
//!
//! The core only produces the record; ranking and storage of multiple users'
//! records live in the external leaderboard service, which upserts the
//! record wholesale and never receives partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::composite_score;
use crate::config::ScoreWeights;
use crate::models::UserAggregateStats;
use crate::traits::Clock;

/// Display-name bounds, counted in characters after trimming.
pub const MIN_DISPLAY_NAME_LEN: usize = 3;
pub const MAX_DISPLAY_NAME_LEN: usize = 20;

/// The record upserted to the external leaderboard service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub stats: UserAggregateStats,
    pub score: i64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Rejection reasons for a leaderboard display name.
///
/// Validation is synchronous and mutates nothing; this is the only
/// user-facing validation error in the domain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("display name must be at least {MIN_DISPLAY_NAME_LEN} characters")]
    TooShort,
    #[error("display name must be at most {MAX_DISPLAY_NAME_LEN} characters")]
    TooLong,
    #[error("display name may only contain letters, digits, spaces, '-' and '_' (found {0:?})")]
    InvalidCharacter(char),
}

/// Check a display name against the length and character-set rules.
pub fn validate_display_name(name: &str) -> Result<(), DisplayNameError> {
    let trimmed = name.trim();

    let len = trimmed.chars().count();
    if len < MIN_DISPLAY_NAME_LEN {
        return Err(DisplayNameError::TooShort);
    }
    if len > MAX_DISPLAY_NAME_LEN {
        return Err(DisplayNameError::TooLong);
    }

    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_'))
    {
        return Err(DisplayNameError::InvalidCharacter(bad));
    }

    Ok(())
}

/// Build the upsert record for one user. The display name is validated
/// first, so an invalid name never produces a record.
pub fn build_entry<C: Clock>(
    user_id: &str,
    display_name: &str,
    stats: UserAggregateStats,
    weights: &ScoreWeights,
    clock: &C,
) -> Result<LeaderboardEntry, DisplayNameError> {
    validate_display_name(display_name)?;

    let now = clock.now_utc();
    let score = composite_score(&stats, weights);

    Ok(LeaderboardEntry {
        user_id: user_id.to_string(),
        display_name: display_name.trim().to_string(),
        stats,
        score,
        created_at: now,
        last_updated: now,
    })
}
