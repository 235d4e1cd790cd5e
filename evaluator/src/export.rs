//! Session export - full trial history plus final figures as pretty JSON.
//!
//! Writes are plain file writes; no atomic rename or fsync.

use crate::config::EvaluatorConfig;
use crate::engine::EscalationEvaluator;
use crate::error::{EvaluatorError, EvaluatorResult};
use crate::state::{EvaluatorState, RunStatus, TrialRecord};
use crate::statistics::Statistics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    pub session_id: String,
    pub exported_at: DateTime<Utc>,
    pub config: EvaluatorConfig,
    pub status: RunStatus,
    pub state: EvaluatorState,
    /// Absent when the session ended before any trial
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
    pub trials: Vec<TrialRecord>,
}

impl SessionExport {
    /// Snapshot an evaluator
    pub fn capture(session_id: impl Into<String>, evaluator: &EscalationEvaluator) -> Self {
        Self {
            session_id: session_id.into(),
            exported_at: Utc::now(),
            config: evaluator.config().clone(),
            status: evaluator.status(),
            state: evaluator.state().clone(),
            statistics: evaluator.final_statistics().ok(),
            trials: evaluator.history().iter().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> EvaluatorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> EvaluatorResult<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| EvaluatorError::ExportWrite {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), trials = self.trials.len(), "Session exported");
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> EvaluatorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| EvaluatorError::ExportRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
