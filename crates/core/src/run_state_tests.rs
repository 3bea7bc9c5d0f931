// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::id::{RunId, WorkflowId};

#[test]
fn new_run_state_starts_pending() {
    let rs = RunState::new(RunId::new(), WorkflowId::new(), "deploy", 1000);
    assert!(matches!(rs.status, RunStatus::Pending));
    assert_eq!(rs.current_step_index, 0);
    assert!(rs.step_results.is_empty());
}

#[test]
fn upsert_overwrites_existing_result_for_same_step() {
    let mut rs = RunState::new(RunId::new(), WorkflowId::new(), "deploy", 1000);
    let step = StepId::from_string("a");
    rs.upsert_step_result(StepResult::pending(step, 1000), 1001);
    let mut second = StepResult::pending(step, 1000);
    second.status = StepStatus::Success;
    rs.upsert_step_result(second, 1002);

    assert_eq!(rs.step_results.len(), 1);
    assert_eq!(rs.step_results[&step].status, StepStatus::Success);
    assert_eq!(rs.updated_at_ms, 1002);
}

#[test]
fn truncate_output_adds_marker_past_budget() {
    let mut result = StepResult::pending(StepId::from_string("a"), 0);
    result.output = "x".repeat(MAX_PERSISTED_OUTPUT_BYTES + 100);
    result.truncate_output();
    assert!(result.output.len() < MAX_PERSISTED_OUTPUT_BYTES + 100);
    assert!(result.output.ends_with(TRUNCATION_MARKER));
}

#[test]
fn truncate_output_is_noop_under_budget() {
    let mut result = StepResult::pending(StepId::from_string("a"), 0);
    result.output = "short".to_string();
    result.truncate_output();
    assert_eq!(result.output, "short");
}
