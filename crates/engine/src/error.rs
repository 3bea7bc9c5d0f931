// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use oj2_core::StepId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("checkpoint store error: {0}")]
    Storage(#[from] oj2_storage::StorageError),
    #[error("run {0} not found")]
    RunNotFound(String),
    #[error("resume is only legal for paused or failed runs, run {run_id} is {status:?}")]
    NotResumable { run_id: String, status: oj2_core::RunStatus },
    #[error("step {step} declares on_success target {target} at or before its own position")]
    InvalidForwardJump { step: StepId, target: StepId },
    #[error("command {command:?} is destructive and safe mode has no approval callback configured")]
    MissingApprovalCallback { command: String },
}
