// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workflow engine: run lifecycle, the step loop, failure-action
//! resolution, rollback, and resume.

use crate::condition;
use crate::error::EngineError;
use crate::safe_mode::{Authorization, SafeModeGovernor};
use oj2_bus::{Event, EventBus, Topic};
use oj2_core::{
    Clock, Condition, FailurePolicy, RunId, RunState, RunStatus, Step, StepId, StepResult, StepStatus, Workflow,
};
use oj2_exec::{execute, ExecMode};
use oj2_runbook::{escape_for_shell, interpolate, interpolate_shell, merge_env};
use oj2_storage::CheckpointStore;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_secs(2);

fn step_position(workflow: &Workflow, step_id: StepId) -> Option<usize> {
    workflow.steps.iter().position(|s| s.id == step_id)
}

pub struct WorkflowEngine<C: Clock> {
    clock: C,
    storage: Arc<CheckpointStore>,
    bus: Arc<EventBus>,
    safe_mode: Arc<SafeModeGovernor>,
    persist_failures: AtomicUsize,
}

impl<C: Clock> WorkflowEngine<C> {
    pub fn new(clock: C, storage: Arc<CheckpointStore>, bus: Arc<EventBus>, safe_mode: Arc<SafeModeGovernor>) -> Self {
        Self { clock, storage, bus, safe_mode, persist_failures: AtomicUsize::new(0) }
    }

    /// Count of checkpoint-persistence failures observed so far, across
    /// every run this engine has executed. Surfaced by `list-runs --verbose`.
    pub fn persist_failures(&self) -> usize {
        self.persist_failures.load(Ordering::SeqCst)
    }

    /// Validates every `on_success` target points strictly forward of its
    /// source step. Surfaced as a validation error when a run starts,
    /// rather than silently skipped at execution time.
    fn validate_forward_jumps(&self, workflow: &Workflow) -> Result<(), EngineError> {
        for (position, step) in workflow.steps.iter().enumerate() {
            if let Some(target) = step.on_success {
                let target_position = step_position(workflow, target).unwrap_or(usize::MAX);
                if target_position <= position {
                    return Err(EngineError::InvalidForwardJump { step: step.id, target });
                }
            }
        }
        Ok(())
    }

    /// Starts a fresh run of `workflow`, runs it to completion (or to the
    /// first abort/rollback/cancellation), and returns the final state.
    pub async fn run(&self, workflow: &Workflow, cancel: Option<&Arc<AtomicBool>>) -> Result<RunState, EngineError> {
        self.validate_forward_jumps(workflow)?;

        let mut run = RunState::new(RunId::new(), workflow.id, workflow.name.clone(), self.clock.epoch_ms());
        run.status = RunStatus::Running;
        self.storage.save_run(&run)?;

        self.bus.publish(Event::new(
            Topic::WorkflowStart,
            "engine",
            self.clock.epoch_ms(),
            json!({ "run_id": run.run_id, "workflow_id": run.workflow_id, "workflow_name": run.workflow_name }),
        ));

        self.step_loop(workflow, &mut run, cancel).await;
        Ok(run)
    }

    /// Resumes a `paused` or `failed` run at its persisted current step.
    pub async fn resume(&self, workflow: &Workflow, run_id: RunId, cancel: Option<&Arc<AtomicBool>>) -> Result<RunState, EngineError> {
        let mut run = self.storage.load_run(run_id)?.ok_or_else(|| EngineError::RunNotFound(run_id.to_string()))?;
        if !matches!(run.status, RunStatus::Paused | RunStatus::Failed) {
            return Err(EngineError::NotResumable { run_id: run_id.to_string(), status: run.status });
        }
        run.status = RunStatus::Running;
        self.persist_run(&run);

        self.step_loop(workflow, &mut run, cancel).await;
        Ok(run)
    }

    /// Rolls a run back on demand, independent of the automatic rollback a
    /// step's `on_failure: rollback` triggers during the step loop.
    pub async fn rollback_run(&self, workflow: &Workflow, run_id: RunId) -> Result<RunState, EngineError> {
        let mut run = self.storage.load_run(run_id)?.ok_or_else(|| EngineError::RunNotFound(run_id.to_string()))?;
        self.rollback_procedure(workflow, &mut run).await;
        run.status = RunStatus::RolledBack;
        self.persist_run(&run);
        Ok(run)
    }

    async fn step_loop(&self, workflow: &Workflow, run: &mut RunState, cancel: Option<&Arc<AtomicBool>>) {
        while run.current_step_index < workflow.steps.len() {
            if cancel.map(|c| c.load(Ordering::SeqCst)).unwrap_or(false) {
                run.status = RunStatus::Paused;
                self.persist_run(run);
                return;
            }

            let step = workflow.steps[run.current_step_index].clone();

            if let Some(condition) = &step.condition {
                if !condition::evaluate(condition, run) {
                    let mut result = StepResult::pending(step.id, self.clock.epoch_ms());
                    result.status = StepStatus::Skipped;
                    result.completed_at_ms = Some(self.clock.epoch_ms());
                    self.persist_step(run.run_id, &result);
                    run.upsert_step_result(result, self.clock.epoch_ms());
                    run.current_step_index += 1;
                    self.persist_run(run);
                    continue;
                }
            }

            let mut result = self.execute_step_with_retries(workflow, &step).await;
            result.truncate_output();
            self.persist_step(run.run_id, &result);
            let failed = result.status == StepStatus::Failed;

            self.bus.publish(Event::new(
                Topic::WorkflowStep,
                "engine",
                self.clock.epoch_ms(),
                json!({
                    "run_id": run.run_id,
                    "step_id": step.id,
                    "step_name": step.name,
                    "status": result.status,
                    "exit_code": result.exit_code,
                }),
            ));
            run.upsert_step_result(result, self.clock.epoch_ms());
            self.persist_run(run);

            if failed {
                match self.resolve_failure_action(&step, workflow) {
                    FailurePolicy::Abort => {
                        run.status = RunStatus::Failed;
                        run.error = Some(format!("step {} failed", step.id));
                        run.completed_at_ms = Some(self.clock.epoch_ms());
                        self.persist_run(run);
                        return;
                    }
                    FailurePolicy::Rollback => {
                        self.rollback_procedure(workflow, run).await;
                        run.status = RunStatus::RolledBack;
                        run.completed_at_ms = Some(self.clock.epoch_ms());
                        self.persist_run(run);
                        return;
                    }
                    FailurePolicy::Continue => {
                        tracing::info!(step = %step.id, "step failed, continuing per failure policy");
                        run.current_step_index += 1;
                    }
                    FailurePolicy::JumpTo(target) => match step_position(workflow, target) {
                        Some(target_index) => run.current_step_index = target_index,
                        None => {
                            run.current_step_index += 1;
                        }
                    },
                }
                continue;
            }

            match step.on_success {
                Some(target) => match step_position(workflow, target) {
                    Some(target_index) => run.current_step_index = target_index,
                    None => run.current_step_index += 1,
                },
                None => run.current_step_index += 1,
            }
        }

        run.status = if self.safe_mode.mode() == oj2_core::SafeMode::Preview { RunStatus::Previewed } else { RunStatus::Completed };
        run.completed_at_ms = Some(self.clock.epoch_ms());
        self.persist_run(run);
        self.bus.publish(Event::new(
            Topic::WorkflowComplete,
            "engine",
            self.clock.epoch_ms(),
            json!({ "run_id": run.run_id, "status": run.status }),
        ));
    }

    fn resolve_failure_action(&self, step: &Step, workflow: &Workflow) -> FailurePolicy {
        step.on_failure.clone().or_else(|| workflow.on_failure.clone()).unwrap_or(FailurePolicy::Abort)
    }

    async fn execute_step_with_retries(&self, workflow: &Workflow, step: &Step) -> StepResult {
        let merged_env = merge_env(&workflow.env, &step.env);
        let mut command = interpolate_shell(&step.command, &merged_env);
        if let Some(workdir) = &step.workdir {
            let workdir = interpolate(workdir, &merged_env);
            command = format!("cd '{}' && {}", escape_for_shell(&workdir), command);
        }

        let started_at_ms = self.clock.epoch_ms();
        let mut result = StepResult::pending(step.id, started_at_ms);

        match self.safe_mode.authorize(step.id, &step.name, &command) {
            Err(e) => {
                tracing::error!(step = %step.id, error = %e, "safe mode authorization failed");
                result.status = StepStatus::Failed;
                result.error = Some(e.to_string());
                result.completed_at_ms = Some(self.clock.epoch_ms());
                return result;
            }
            Ok(Authorization::Preview) => {
                result.status = StepStatus::Success;
                result.exit_code = Some(0);
                result.output = "(preview) not executed".to_string();
                result.completed_at_ms = Some(self.clock.epoch_ms());
                return result;
            }
            Ok(Authorization::Denied) => {
                result.status = StepStatus::Failed;
                result.error = Some("denied by operator".to_string());
                result.completed_at_ms = Some(self.clock.epoch_ms());
                return result;
            }
            Ok(Authorization::Execute) => {}
        }

        let max_attempts = step.retries.max(1);
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let exec_result = execute(&command, ExecMode::Rc, step.timeout).await;
            result.output = exec_result.output;
            result.exit_code = Some(exec_result.exit_code);
            result.retries = attempts - 1;

            if exec_result.exit_code == 0 {
                result.status = StepStatus::Success;
                break;
            }
            if attempts >= max_attempts {
                result.status = StepStatus::Failed;
                result.error = Some(format!("step failed with exit code {} after {attempts} attempts", exec_result.exit_code));
                break;
            }
            tokio::time::sleep(RETRY_DELAY).await;
        }
        let completed_at_ms = self.clock.epoch_ms();
        result.completed_at_ms = Some(completed_at_ms);
        result.duration_ms = Some(completed_at_ms.saturating_sub(started_at_ms));
        result
    }

    async fn rollback_procedure(&self, workflow: &Workflow, run: &mut RunState) {
        self.bus.publish(Event::new(
            Topic::WorkflowRollback,
            "engine",
            self.clock.epoch_ms(),
            json!({ "run_id": run.run_id }),
        ));

        if workflow.steps.is_empty() {
            return;
        }
        let mut index = run.current_step_index.min(workflow.steps.len() - 1);
        loop {
            let step = &workflow.steps[index];
            let should_rollback = run.step_results.get(&step.id).map(|r| r.status != StepStatus::Skipped).unwrap_or(false);
            if should_rollback {
                if let Some(rollback) = step.rollback.clone() {
                    let outcome = execute(&rollback.command, ExecMode::Rc, rollback.timeout).await;
                    if outcome.exit_code == 0 {
                        if let Some(result) = run.step_results.get_mut(&step.id) {
                            result.status = StepStatus::RolledBack;
                        }
                        if let Some(result) = run.step_results.get(&step.id) {
                            self.persist_step(run.run_id, result);
                        }
                    } else {
                        tracing::warn!(step = %step.id, exit_code = outcome.exit_code, "rollback command failed, continuing");
                    }
                }
            }
            if index == 0 {
                break;
            }
            index -= 1;
        }
    }

    fn persist_run(&self, run: &RunState) {
        if let Err(e) = self.storage.save_run(run) {
            tracing::error!(run_id = %run.run_id, error = %e, "failed to persist run checkpoint");
            self.persist_failures.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn persist_step(&self, run_id: RunId, result: &StepResult) {
        if let Err(e) = self.storage.save_step_result(run_id, result) {
            tracing::error!(run_id = %run_id, step_id = %result.step_id, error = %e, "failed to persist step result");
            self.persist_failures.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
