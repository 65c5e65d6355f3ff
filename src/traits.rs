//! Abstractions for time and storage to enable testing.
//!
//! This module provides traits for:
//! - `Clock`: Abstracting time access for deterministic testing
//! - `WorkoutRepository` / `WeightRepository`: Abstracting the external
//!   snapshot store so the analytics core stays pure

use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Local, Utc};

use crate::models::{WeightGoal, WeightLogEntry, WorkoutSession};

// ==================== Clock Trait ====================

/// Trait for abstracting time access.
///
/// Streak and frequency calculations depend on "today"; injecting the clock
/// keeps them deterministic functions of their inputs.
pub trait Clock: Send + Sync {
    /// Get the current time in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Get the current time in the local timezone.
    fn now_local(&self) -> DateTime<Local>;
}

/// System clock implementation using real time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Mock clock for testing with controllable time.
#[derive(Debug, Clone)]
pub struct MockClock {
    utc_time: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Create a new mock clock set to the given UTC time.
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            utc_time: Arc::new(Mutex::new(time)),
        }
    }

    /// Set the mock clock to a new time.
    pub fn set_time(&self, time: DateTime<Utc>) {
        *self.utc_time.lock().unwrap() = time;
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: chrono::Duration) {
        let mut time = self.utc_time.lock().unwrap();
        *time = *time + duration;
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.utc_time.lock().unwrap()
    }

    fn now_local(&self) -> DateTime<Local> {
        self.now_utc().with_timezone(&Local)
    }
}

// ==================== Repository Traits ====================

/// Source of the workout-log snapshot.
///
/// Implementations return complete, already-deserialized snapshots; the core
/// makes no pagination or streaming assumption and never writes back.
pub trait WorkoutRepository {
    /// All sessions in the log, completed or not.
    fn all_sessions(&self) -> Result<Vec<WorkoutSession>>;
}

/// Source of the body-weight log snapshot.
pub trait WeightRepository {
    /// All weight log entries.
    fn all_entries(&self) -> Result<Vec<WeightLogEntry>>;

    /// The user's active weight goal, if one is set.
    fn active_goal(&self) -> Result<Option<WeightGoal>>;
}
