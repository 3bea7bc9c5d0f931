// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gatekeeps command execution: in preview mode nothing runs and every
//! step is recorded as a [`PreviewAction`]; in execute mode, destructive
//! commands require an operator-supplied approval callback.

use crate::error::EngineError;
use oj2_core::{SafeMode, StepId};
use std::sync::Arc;

/// Case-insensitive substring match against this closed set marks a
/// command destructive.
const DESTRUCTIVE_PATTERNS: &[&str] = &[
    "rm -rf",
    "rm -r /",
    "dd if=",
    "mkfs",
    "> /dev/",
    "chmod 777",
    ":(){ :|:& };:",
    "drop database",
    "drop table",
    "truncate table",
    "delete from",
    "git reset --hard",
    "git clean -fdx",
    "docker system prune",
];

pub fn is_destructive(command: &str) -> bool {
    let lower = command.to_lowercase();
    DESTRUCTIVE_PATTERNS.iter().any(|pattern| lower.contains(pattern))
}

/// Returns `true` to approve a destructive command, `false` to deny it.
pub type ApprovalCallback = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Debug, Clone)]
pub struct PreviewAction {
    pub step_id: StepId,
    pub description: String,
    pub command: String,
    pub destructive: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Authorization {
    /// Safe mode is `preview`: do not execute, a `PreviewAction` was recorded.
    Preview,
    /// Safe to execute: either non-destructive, or approved.
    Execute,
    /// Destructive and the approval callback declined.
    Denied,
}

pub struct SafeModeGovernor {
    mode: SafeMode,
    approval: Option<ApprovalCallback>,
    previews: parking_lot::Mutex<Vec<PreviewAction>>,
}

impl SafeModeGovernor {
    pub fn new(mode: SafeMode, approval: Option<ApprovalCallback>) -> Self {
        Self { mode, approval, previews: parking_lot::Mutex::new(Vec::new()) }
    }

    pub fn mode(&self) -> SafeMode {
        self.mode
    }

    /// Decides whether `command` (belonging to `step_id`, with a
    /// human-readable `description`) may run.
    pub fn authorize(&self, step_id: StepId, description: &str, command: &str) -> Result<Authorization, EngineError> {
        let destructive = is_destructive(command);

        if self.mode == SafeMode::Preview {
            self.previews.lock().push(PreviewAction {
                step_id,
                description: description.to_string(),
                command: command.to_string(),
                destructive,
            });
            return Ok(Authorization::Preview);
        }

        if !destructive {
            return Ok(Authorization::Execute);
        }

        match &self.approval {
            None => Err(EngineError::MissingApprovalCallback { command: command.to_string() }),
            Some(callback) => Ok(if callback(command) { Authorization::Execute } else { Authorization::Denied }),
        }
    }

    pub fn previews(&self) -> Vec<PreviewAction> {
        self.previews.lock().clone()
    }

    /// A human-readable summary: one line per recorded action, destructive
    /// ones marked, with a trailing count.
    pub fn preview_summary(&self) -> String {
        let previews = self.previews.lock();
        let mut lines = Vec::with_capacity(previews.len() + 1);
        let mut destructive_count = 0;
        for action in previews.iter() {
            let marker = if action.destructive {
                destructive_count += 1;
                "[DESTRUCTIVE]"
            } else {
                "[safe]"
            };
            lines.push(format!("{marker} {}: {} -> {}", action.step_id, action.description, action.command));
        }
        lines.push(format!("{} action(s) previewed, {destructive_count} destructive", previews.len()));
        lines.join("\n")
    }
}

#[cfg(test)]
#[path = "safe_mode_tests.rs"]
mod tests;
