// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run and per-step execution state, as persisted by the checkpoint store.

use crate::id::{RunId, StepId, WorkflowId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output captured for a step result is truncated beyond this many bytes.
pub const MAX_PERSISTED_OUTPUT_BYTES: usize = 10 * 1024;
const TRUNCATION_MARKER: &str = "\n…truncated…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Running,
    Success,
    Failed,
    Skipped,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Paused,
    Completed,
    Failed,
    RolledBack,
    /// Ran entirely in safe-mode preview; no step actually executed.
    Previewed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step_id: StepId,
    pub status: StepStatus,
    pub exit_code: Option<i32>,
    pub output: String,
    pub error: Option<String>,
    pub started_at_ms: u64,
    pub completed_at_ms: Option<u64>,
    pub duration_ms: Option<u64>,
    pub retries: u32,
}

impl StepResult {
    pub fn pending(step_id: StepId, started_at_ms: u64) -> Self {
        Self {
            step_id,
            status: StepStatus::Pending,
            exit_code: None,
            output: String::new(),
            error: None,
            started_at_ms,
            completed_at_ms: None,
            duration_ms: None,
            retries: 0,
        }
    }

    /// Truncates `output` in place to the persisted-output budget.
    pub fn truncate_output(&mut self) {
        if self.output.len() <= MAX_PERSISTED_OUTPUT_BYTES {
            return;
        }
        let mut end = MAX_PERSISTED_OUTPUT_BYTES;
        while end > 0 && !self.output.is_char_boundary(end) {
            end -= 1;
        }
        self.output.truncate(end);
        self.output.push_str(TRUNCATION_MARKER);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: RunId,
    pub workflow_id: WorkflowId,
    pub workflow_name: String,
    pub status: RunStatus,
    pub current_step_index: usize,
    pub step_results: HashMap<StepId, StepResult>,
    pub started_at_ms: u64,
    pub updated_at_ms: u64,
    pub completed_at_ms: Option<u64>,
    pub error: Option<String>,
}

impl RunState {
    pub fn new(run_id: RunId, workflow_id: WorkflowId, workflow_name: impl Into<String>, now_ms: u64) -> Self {
        Self {
            run_id,
            workflow_id,
            workflow_name: workflow_name.into(),
            status: RunStatus::Pending,
            current_step_index: 0,
            step_results: HashMap::new(),
            started_at_ms: now_ms,
            updated_at_ms: now_ms,
            completed_at_ms: None,
            error: None,
        }
    }

    pub fn upsert_step_result(&mut self, mut result: StepResult, now_ms: u64) {
        result.truncate_output();
        self.step_results.insert(result.step_id, result);
        self.updated_at_ms = now_ms;
    }
}

#[cfg(test)]
#[path = "run_state_tests.rs"]
mod tests;
