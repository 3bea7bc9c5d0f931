// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint persistence: `workflow_runs` and `workflow_step_results` as
//! two directories of one JSON file per row, with an in-memory status
//! index mirroring the `runs` directory so `list_runs` never has to stat
//! every step subdirectory.

use crate::atomic::{read_json, write_json};
use crate::error::StorageError;
use crate::paths::{run_file, runs_dir, step_file, steps_dir};
use oj2_core::{RunId, RunState, RunStatus, StepId, StepResult, WorkflowId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One `workflow_runs` row, without the embedded step results (those live
/// in their own table/directory).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RunRow {
    run_id: RunId,
    workflow_id: WorkflowId,
    workflow_name: String,
    status: RunStatus,
    current_step_index: usize,
    started_at_ms: u64,
    updated_at_ms: u64,
    completed_at_ms: Option<u64>,
    error: Option<String>,
}

impl RunRow {
    fn from_run_state(run: &RunState) -> Self {
        Self {
            run_id: run.run_id,
            workflow_id: run.workflow_id,
            workflow_name: run.workflow_name.clone(),
            status: run.status,
            current_step_index: run.current_step_index,
            started_at_ms: run.started_at_ms,
            updated_at_ms: run.updated_at_ms,
            completed_at_ms: run.completed_at_ms,
            error: run.error.clone(),
        }
    }
}

/// Cheap summary used by the in-memory index and `list_runs`.
#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    status: RunStatus,
    started_at_ms: u64,
}

/// A `list_runs` row: enough to render without loading every step result.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: RunId,
    pub workflow_name: String,
    pub status: RunStatus,
    pub started_at_ms: u64,
}

pub struct CheckpointStore {
    checkpoint_dir: PathBuf,
    index: RwLock<HashMap<RunId, IndexEntry>>,
}

impl CheckpointStore {
    /// Opens (creating if absent) the checkpoint directory and rebuilds the
    /// in-memory index by scanning `runs/*.json`.
    pub fn open(checkpoint_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let checkpoint_dir = checkpoint_dir.into();
        std::fs::create_dir_all(runs_dir(&checkpoint_dir))?;

        let mut index = HashMap::new();
        for entry in std::fs::read_dir(runs_dir(&checkpoint_dir))? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let row: RunRow = read_json(&path)?;
            index.insert(row.run_id, IndexEntry { status: row.status, started_at_ms: row.started_at_ms });
        }

        Ok(Self { checkpoint_dir, index: RwLock::new(index) })
    }

    pub fn checkpoint_dir(&self) -> &Path {
        &self.checkpoint_dir
    }

    /// Upserts the run-level row, keyed on run id. Does not touch step
    /// results — call `save_step_result` for those.
    pub fn save_run(&self, run: &RunState) -> Result<(), StorageError> {
        let row = RunRow::from_run_state(run);
        write_json(&run_file(&self.checkpoint_dir, run.run_id), &row)?;
        self.index.write().insert(run.run_id, IndexEntry { status: row.status, started_at_ms: row.started_at_ms });
        tracing::debug!(run_id = %run.run_id, status = ?row.status, "checkpointed run");
        Ok(())
    }

    /// Upserts one step result, keyed on (run id, step id).
    pub fn save_step_result(&self, run_id: RunId, result: &StepResult) -> Result<(), StorageError> {
        write_json(&step_file(&self.checkpoint_dir, run_id, result.step_id), result)
    }

    /// Rehydrates a full `RunState`, including every persisted step result.
    pub fn load_run(&self, run_id: RunId) -> Result<Option<RunState>, StorageError> {
        let path = run_file(&self.checkpoint_dir, run_id);
        if !path.exists() {
            return Ok(None);
        }
        let row: RunRow = read_json(&path)?;

        let mut step_results = HashMap::new();
        let dir = steps_dir(&self.checkpoint_dir, run_id);
        if dir.exists() {
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let result: StepResult = read_json(&path)?;
                step_results.insert(result.step_id, result);
            }
        }

        Ok(Some(RunState {
            run_id: row.run_id,
            workflow_id: row.workflow_id,
            workflow_name: row.workflow_name,
            status: row.status,
            current_step_index: row.current_step_index,
            step_results,
            started_at_ms: row.started_at_ms,
            updated_at_ms: row.updated_at_ms,
            completed_at_ms: row.completed_at_ms,
            error: row.error,
        }))
    }

    /// Returns up to `limit` runs, newest-first by `started_at_ms`.
    pub fn list_runs(&self, limit: usize) -> Vec<RunSummary> {
        let index = self.index.read();
        let mut entries: Vec<(RunId, IndexEntry)> = index.iter().map(|(id, e)| (*id, *e)).collect();
        entries.sort_by(|a, b| b.1.started_at_ms.cmp(&a.1.started_at_ms));
        entries.truncate(limit);
        drop(index);

        entries
            .into_iter()
            .filter_map(|(run_id, entry)| {
                let row: RunRow = read_json(&run_file(&self.checkpoint_dir, run_id)).ok()?;
                Some(RunSummary { run_id, workflow_name: row.workflow_name, status: entry.status, started_at_ms: entry.started_at_ms })
            })
            .collect()
    }

    /// Deletes a run's step results then its run row. Not atomic across
    /// the two directories, matching the store's documented per-table
    /// transaction boundary.
    pub fn delete_run(&self, run_id: RunId) -> Result<(), StorageError> {
        let dir = steps_dir(&self.checkpoint_dir, run_id);
        if dir.exists() {
            std::fs::remove_dir_all(dir.parent().unwrap_or(&dir))?;
        }
        let path = run_file(&self.checkpoint_dir, run_id);
        if path.exists() {
            std::fs::remove_file(&path)?;
        } else {
            self.index.write().remove(&run_id);
            return Err(StorageError::RunNotFound(run_id.to_string()));
        }
        self.index.write().remove(&run_id);
        tracing::debug!(run_id = %run_id, "deleted run checkpoint");
        Ok(())
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
