// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! YAML deserialisation and validation of workflow documents.
//!
//! Deserialises into a lenient raw shape first (step `id` optional, step
//! `timeout` an unvalidated string) so defaults and cross-references can be
//! applied before producing the strict [`Workflow`] the engine consumes.

use crate::error::RunbookError;
use oj2_core::{
    parse_duration, Condition, FailurePolicy, RollbackAction, Step, StepId, Workflow, WorkflowId,
    DEFAULT_STEP_TIMEOUT,
};
use std::collections::{HashMap, HashSet};

#[derive(Debug, serde::Deserialize)]
struct RawWorkflow {
    #[serde(default = "WorkflowId::new")]
    id: WorkflowId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    steps: Vec<RawStep>,
    #[serde(default)]
    on_failure: Option<FailurePolicy>,
    #[serde(default)]
    env: HashMap<String, String>,
}

#[derive(Debug, serde::Deserialize)]
struct RawStep {
    #[serde(default)]
    id: Option<StepId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    command: String,
    #[serde(default)]
    condition: Option<Condition>,
    #[serde(default)]
    on_success: Option<StepId>,
    #[serde(default)]
    on_failure: Option<FailurePolicy>,
    #[serde(default)]
    rollback: Option<RollbackAction>,
    #[serde(default)]
    timeout: Option<String>,
    #[serde(default)]
    retries: u32,
    #[serde(default)]
    env: HashMap<String, String>,
    #[serde(default)]
    workdir: Option<String>,
}

/// Parses and validates a workflow document from YAML text.
pub fn parse_workflow(yaml: &str) -> Result<Workflow, RunbookError> {
    let raw: RawWorkflow = serde_yaml::from_str(yaml)?;
    build_workflow(raw)
}

fn build_workflow(raw: RawWorkflow) -> Result<Workflow, RunbookError> {
    if raw.name.trim().is_empty() {
        return Err(RunbookError::MissingName);
    }
    if raw.steps.is_empty() {
        return Err(RunbookError::NoSteps);
    }

    let mut steps = Vec::with_capacity(raw.steps.len());
    let mut seen_ids = HashSet::new();
    for (position, raw_step) in raw.steps.into_iter().enumerate() {
        let id = raw_step.id.unwrap_or_else(|| StepId::from_string(format!("step_{position}")));
        if !seen_ids.insert(id) {
            return Err(RunbookError::DuplicateStepId { id: id.to_string() });
        }
        if raw_step.command.trim().is_empty() {
            return Err(RunbookError::EmptyCommand { id: id.to_string() });
        }
        let timeout = match raw_step.timeout {
            Some(s) => parse_duration(&s).map_err(|source| RunbookError::InvalidTimeout { step: id.to_string(), source })?,
            None => DEFAULT_STEP_TIMEOUT,
        };
        let name = raw_step.name.unwrap_or_else(|| id.to_string());
        steps.push(Step {
            id,
            name,
            command: raw_step.command,
            condition: raw_step.condition,
            on_success: raw_step.on_success,
            on_failure: raw_step.on_failure,
            rollback: raw_step.rollback,
            timeout,
            retries: raw_step.retries,
            env: raw_step.env,
            workdir: raw_step.workdir,
        });
    }

    for step in &steps {
        if let Some(target) = step.on_success {
            if !seen_ids.contains(&target) {
                return Err(RunbookError::UnknownOnSuccessTarget { step: step.id.to_string(), target: target.to_string() });
            }
        }
        if let Some(FailurePolicy::JumpTo(target)) = &step.on_failure {
            if !seen_ids.contains(target) {
                return Err(RunbookError::UnknownOnFailureTarget { step: step.id.to_string(), target: target.to_string() });
            }
        }
    }
    if let Some(FailurePolicy::JumpTo(target)) = &raw.on_failure {
        if !seen_ids.contains(target) {
            return Err(RunbookError::UnknownWorkflowFailureTarget { target: target.to_string() });
        }
    }

    Ok(Workflow { id: raw.id, name: raw.name, description: raw.description, steps, on_failure: raw.on_failure, env: raw.env })
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
