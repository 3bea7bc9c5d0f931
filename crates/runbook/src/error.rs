// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunbookError {
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("workflow name is required")]
    MissingName,
    #[error("workflow must declare at least one step")]
    NoSteps,
    #[error("step {id} has an empty command")]
    EmptyCommand { id: String },
    #[error("duplicate step id {id:?}")]
    DuplicateStepId { id: String },
    #[error("step {step} on_success targets unknown step {target:?}")]
    UnknownOnSuccessTarget { step: String, target: String },
    #[error("step {step} on_failure targets unknown step {target:?}")]
    UnknownOnFailureTarget { step: String, target: String },
    #[error("workflow on_failure targets unknown step {target:?}")]
    UnknownWorkflowFailureTarget { target: String },
    #[error("step {step}: invalid timeout: {source}")]
    InvalidTimeout { step: String, #[source] source: oj2_core::DurationParseError },
}
