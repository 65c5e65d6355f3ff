//! File-backed snapshot store.
//!
//! The analytics core only ever sees fully materialized snapshots through
//! the repository traits; this implementation reads one JSON document and
//! hands out clones. Encoding is the store's concern, not the core's.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{WeightGoal, WeightLogEntry, WorkoutSession};
use crate::traits::{WeightRepository, WorkoutRepository};

/// The on-disk document: one user's complete log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub sessions: Vec<WorkoutSession>,
    #[serde(default)]
    pub weight_entries: Vec<WeightLogEntry>,
    #[serde(default)]
    pub weight_goal: Option<WeightGoal>,
}

/// Repository over a single JSON snapshot file, deserialized once at open.
#[derive(Debug, Clone)]
pub struct JsonStore {
    snapshot: Snapshot,
}

impl JsonStore {
    /// Read and deserialize the snapshot file.
    pub fn open(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;

        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot file {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            sessions = snapshot.sessions.len(),
            weight_entries = snapshot.weight_entries.len(),
            "loaded snapshot"
        );

        Ok(Self { snapshot })
    }

    /// Wrap an in-memory snapshot (used by tests and embedders).
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl WorkoutRepository for JsonStore {
    fn all_sessions(&self) -> Result<Vec<WorkoutSession>> {
        Ok(self.snapshot.sessions.clone())
    }
}

impl WeightRepository for JsonStore {
    fn all_entries(&self) -> Result<Vec<WeightLogEntry>> {
        Ok(self.snapshot.weight_entries.clone())
    }

    fn active_goal(&self) -> Result<Option<WeightGoal>> {
        Ok(self.snapshot.weight_goal.clone())
    }
}
