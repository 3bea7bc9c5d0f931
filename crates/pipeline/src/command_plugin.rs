// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translates shell commands into pipeline activity: runs them via the
//! executor, records a block, publishes the outcome.

use crate::error::PipelineError;
use crate::plugin::Plugin;
use crate::routing::{route_input, AiInput, Input};
use crate::scope::Scope;
use async_trait::async_trait;
use oj2_bus::{Event, EventBus, Topic};
use oj2_core::{Block, BlockId, BlockKind, Clock};
use oj2_exec::{execute, ExecMode};
use oj2_state::StateStore;
use parking_lot::RwLock;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// What a dispatched line of input resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A shell command ran; carries its block id.
    Command(BlockId),
    /// A free-form question or generic typed query stored an AI-kind block.
    AiQuery(BlockId),
    /// `@fix`, resolved to the most recent failed command's block, if any.
    Fix(Option<BlockId>),
    /// `@explain`, resolved to the most recent command's block, if any.
    Explain(Option<BlockId>),
}

pub struct CommandPlugin<C: Clock> {
    clock: C,
    timeout: Duration,
    bus: RwLock<Option<Arc<EventBus>>>,
    state: RwLock<Option<Arc<StateStore>>>,
}

impl<C: Clock> CommandPlugin<C> {
    pub fn new(clock: C, timeout: Duration) -> Self {
        Self { clock, timeout, bus: RwLock::new(None), state: RwLock::new(None) }
    }

    #[allow(clippy::expect_used)]
    fn bus(&self) -> Arc<EventBus> {
        self.bus.read().clone().expect("CommandPlugin used before init")
    }

    #[allow(clippy::expect_used)]
    fn state(&self) -> Arc<StateStore> {
        self.state.read().clone().expect("CommandPlugin used before init")
    }

    /// Runs `command` in the current working directory, stores the
    /// resulting block, and publishes exactly one of `command.complete` or
    /// `command.error`.
    pub async fn run_command(&self, command: &str, cwd: &str) -> BlockId {
        let id = BlockId::new();
        let started_at_ms = self.clock.epoch_ms();
        self.bus().publish(Event::new(
            Topic::CommandStart,
            self.name(),
            started_at_ms,
            json!({ "block_id": id, "command": command }),
        ).with_block(id));

        let result = execute(command, ExecMode::Rc, self.timeout).await;

        let mut block = Block::new(id, BlockKind::Command, command, started_at_ms, cwd);
        block.output = result.output;
        block.exit_code = Some(result.exit_code);
        block.elapsed = result.duration;
        self.state().add_block(block.clone());

        let topic = if block.is_error() { Topic::CommandError } else { Topic::CommandComplete };
        self.bus().publish(
            Event::new(topic, self.name(), self.clock.epoch_ms(), serde_json::to_value(&block).unwrap_or(json!({})))
                .with_block(id),
        );
        id
    }

    /// The AI variant of the plugin's run path: stores an AI-kind block
    /// holding `query` verbatim and publishes `ai.suggestion` with the
    /// query. The block's output is filled in later, by the AI plugin,
    /// through the state store's update-by-id operation.
    pub async fn run_ai_query(&self, query: &str, cwd: &str) -> BlockId {
        let id = BlockId::new();
        let started_at_ms = self.clock.epoch_ms();
        let block = Block::new(id, BlockKind::Ai, query, started_at_ms, cwd);
        self.state().add_block(block);

        self.bus().publish(
            Event::new(Topic::AiSuggestion, self.name(), started_at_ms, json!({ "suggestion": query })).with_block(id),
        );
        id
    }

    /// Routes one line of user input and acts on it: a shell command runs
    /// via [`Self::run_command`]; a question or generic typed query runs
    /// via [`Self::run_ai_query`]; `@fix`/`@explain` resolve to an existing
    /// block (the most recent failed command, or the most recent command
    /// regardless of exit) for the AI plugin to analyse, rather than
    /// running anything new.
    pub async fn dispatch(&self, input: &str, cwd: &str) -> Dispatch {
        match route_input(input) {
            Input::Shell(command) => Dispatch::Command(self.run_command(&command, cwd).await),
            Input::Ai(AiInput::Question(query)) => Dispatch::AiQuery(self.run_ai_query(&query, cwd).await),
            Input::Ai(AiInput::Typed { kind, query }) => {
                let composed = if query.is_empty() { kind } else { format!("{kind}: {query}") };
                Dispatch::AiQuery(self.run_ai_query(&composed, cwd).await)
            }
            Input::Ai(AiInput::Fix) => Dispatch::Fix(self.state().last_error_block().map(|b| b.id)),
            Input::Ai(AiInput::Explain) => {
                Dispatch::Explain(self.state().get_recent_blocks(1).into_iter().next().map(|b| b.id))
            }
        }
    }
}

#[async_trait]
impl<C: Clock + 'static> Plugin for CommandPlugin<C> {
    fn name(&self) -> &str {
        "command"
    }

    async fn init(&self, bus: Arc<EventBus>, state: Arc<StateStore>) {
        *self.bus.write() = Some(bus);
        *self.state.write() = Some(state);
    }

    async fn start(&self, _scope: Scope) -> Result<(), PipelineError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), PipelineError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "command_plugin_tests.rs"]
mod tests;
