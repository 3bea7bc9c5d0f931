// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed topic taxonomy events are published under.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    #[serde(rename = "command.start")]
    CommandStart,
    #[serde(rename = "command.output")]
    CommandOutput,
    #[serde(rename = "command.complete")]
    CommandComplete,
    #[serde(rename = "command.error")]
    CommandError,
    #[serde(rename = "container.log")]
    ContainerLog,
    #[serde(rename = "container.status")]
    ContainerStatus,
    #[serde(rename = "container.alert")]
    ContainerAlert,
    #[serde(rename = "ai.suggestion")]
    AiSuggestion,
    #[serde(rename = "ai.analysis")]
    AiAnalysis,
    #[serde(rename = "system.alert")]
    SystemAlert,
    #[serde(rename = "system.stats")]
    SystemStats,
    #[serde(rename = "workflow.start")]
    WorkflowStart,
    #[serde(rename = "workflow.step")]
    WorkflowStep,
    #[serde(rename = "workflow.checkpoint")]
    WorkflowCheckpoint,
    #[serde(rename = "workflow.complete")]
    WorkflowComplete,
    #[serde(rename = "workflow.rollback")]
    WorkflowRollback,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::CommandStart => "command.start",
            Topic::CommandOutput => "command.output",
            Topic::CommandComplete => "command.complete",
            Topic::CommandError => "command.error",
            Topic::ContainerLog => "container.log",
            Topic::ContainerStatus => "container.status",
            Topic::ContainerAlert => "container.alert",
            Topic::AiSuggestion => "ai.suggestion",
            Topic::AiAnalysis => "ai.analysis",
            Topic::SystemAlert => "system.alert",
            Topic::SystemStats => "system.stats",
            Topic::WorkflowStart => "workflow.start",
            Topic::WorkflowStep => "workflow.step",
            Topic::WorkflowCheckpoint => "workflow.checkpoint",
            Topic::WorkflowComplete => "workflow.complete",
            Topic::WorkflowRollback => "workflow.rollback",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
