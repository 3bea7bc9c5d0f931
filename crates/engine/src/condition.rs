// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Evaluates a step's guard [`Condition`] against prior step results.

use oj2_core::{Condition, ConditionKind, RunState, StepResult};
use regex::Regex;
use std::path::Path;

/// Picks the step result a condition should test: the named step-ref if
/// present, otherwise the most recently completed step by completion time.
fn target_result<'a>(condition: &Condition, run: &'a RunState) -> Option<&'a StepResult> {
    if let Some(step_id) = condition.step {
        return run.step_results.get(&step_id);
    }
    run.step_results.values().filter(|r| r.completed_at_ms.is_some()).max_by_key(|r| r.completed_at_ms)
}

/// Evaluates `condition` against `run`. A condition with no resolvable
/// target result (e.g. the first step, or an unknown step-ref) is treated
/// as not satisfied rather than an error — the step is skipped.
pub fn evaluate(condition: &Condition, run: &RunState) -> bool {
    let Some(result) = target_result(condition, run) else { return false };

    match condition.kind {
        ConditionKind::ExitCode => match condition.value.strip_prefix('!') {
            Some(rest) => rest.trim().parse::<i32>().map(|v| result.exit_code != Some(v)).unwrap_or(false),
            None => condition.value.trim().parse::<i32>().map(|v| result.exit_code == Some(v)).unwrap_or(false),
        },
        ConditionKind::OutputContains => result.output.contains(&condition.value),
        ConditionKind::OutputMatches => Regex::new(&condition.value).map(|re| re.is_match(&result.output)).unwrap_or(false),
        ConditionKind::FileExists => Path::new(&condition.value).exists(),
        ConditionKind::EnvSet => std::env::var(&condition.value).is_ok(),
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
