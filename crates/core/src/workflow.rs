// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow definition types: the declarative step sequence the engine runs.
//!
//! Parsing and validation live in `oj2-runbook`; this module holds the
//! in-memory shape only, plus the dual-form `RollbackAction` deserializer.

use crate::id::{StepId, WorkflowId};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_ROLLBACK_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default = "WorkflowId::new")]
    pub id: WorkflowId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub on_failure: Option<FailurePolicy>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub on_success: Option<StepId>,
    #[serde(default)]
    pub on_failure: Option<FailurePolicy>,
    #[serde(default)]
    pub rollback: Option<RollbackAction>,
    #[serde(with = "duration_str", default = "default_step_timeout")]
    pub timeout: Duration,
    #[serde(default)]
    pub retries: u32,
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default)]
    pub workdir: Option<String>,
}

fn default_step_timeout() -> Duration {
    DEFAULT_STEP_TIMEOUT
}

/// A step's `on_failure` (or the workflow's top-level default): either one
/// of the three fixed actions, or a jump to another step's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    Abort,
    Rollback,
    Continue,
    JumpTo(StepId),
}

impl Serialize for FailurePolicy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = match self {
            FailurePolicy::Abort => "abort",
            FailurePolicy::Rollback => "rollback",
            FailurePolicy::Continue => "continue",
            FailurePolicy::JumpTo(step) => return serializer.serialize_str(step.as_str()),
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for FailurePolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "abort" => FailurePolicy::Abort,
            "rollback" => FailurePolicy::Rollback,
            "continue" => FailurePolicy::Continue,
            other => FailurePolicy::JumpTo(StepId::from_string(other)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    ExitCode,
    OutputContains,
    OutputMatches,
    FileExists,
    EnvSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    pub value: String,
    /// Which prior step's result to evaluate against; defaults to the most
    /// recently completed step when absent.
    #[serde(default)]
    pub step: Option<StepId>,
}

/// A step's rollback hook. Accepts a bare command string (default timeout
/// applies) or an object with an explicit timeout.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RollbackAction {
    pub command: String,
    #[serde(with = "duration_str")]
    pub timeout: Duration,
}

impl<'de> Deserialize<'de> for RollbackAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Short(String),
            Block {
                command: String,
                #[serde(default)]
                timeout: Option<String>,
            },
        }

        match Helper::deserialize(deserializer)? {
            Helper::Short(command) => Ok(RollbackAction { command, timeout: DEFAULT_ROLLBACK_TIMEOUT }),
            Helper::Block { command, timeout } => {
                let timeout = match timeout {
                    Some(s) => crate::duration::parse_duration(&s)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?,
                    None => DEFAULT_ROLLBACK_TIMEOUT,
                };
                Ok(RollbackAction { command, timeout })
            }
        }
    }
}

mod duration_str {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("{}s", d.as_secs()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(d)?;
        crate::duration::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
