// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reacts to failed commands with known-pattern fixes, and exposes
//! explicit `analyse`/`answer` entry points that escalate to an LLM.

use crate::error::PipelineError;
use crate::llm::{LlmClient, LlmError};
use crate::plugin::Plugin;
use crate::scope::Scope;
use async_trait::async_trait;
use oj2_bus::{Event, EventBus, Topic};
use oj2_core::{Block, BlockId, Clock, Suggestion};
use oj2_state::StateStore;
use parking_lot::RwLock;
use serde_json::json;
use std::sync::Arc;

fn default_dictionary() -> Vec<(String, String)> {
    vec![
        ("permission denied".to_string(), "Try with sudo or check file permissions".to_string()),
        ("command not found".to_string(), "Check that the binary is installed and on PATH".to_string()),
        ("no such file or directory".to_string(), "Check the path; the file or directory may not exist yet".to_string()),
        ("connection refused".to_string(), "Check that the target service is running and reachable".to_string()),
        ("address already in use".to_string(), "Another process is bound to that port; stop it or pick a different one".to_string()),
    ]
}

/// Matches known error substrings to canned fixes, and provides an escape
/// hatch into a real LLM for free-form analysis and questions.
pub struct AiPlugin<C: Clock> {
    clock: C,
    llm: Arc<dyn LlmClient>,
    dictionary: Vec<(String, String)>,
    bus: RwLock<Option<Arc<EventBus>>>,
    state: RwLock<Option<Arc<StateStore>>>,
}

impl<C: Clock> AiPlugin<C> {
    pub fn new(clock: C, llm: Arc<dyn LlmClient>) -> Self {
        Self::with_dictionary(clock, llm, default_dictionary())
    }

    pub fn with_dictionary(clock: C, llm: Arc<dyn LlmClient>, dictionary: Vec<(String, String)>) -> Self {
        Self { clock, llm, dictionary, bus: RwLock::new(None), state: RwLock::new(None) }
    }

    #[allow(clippy::expect_used)]
    fn bus(&self) -> Arc<EventBus> {
        self.bus.read().clone().expect("AiPlugin used before init")
    }

    #[allow(clippy::expect_used)]
    fn state(&self) -> Arc<StateStore> {
        self.state.read().clone().expect("AiPlugin used before init")
    }

    /// Escalates `block` to the LLM client and turns the response into a
    /// suggestion, without consulting the known-error dictionary.
    pub async fn analyse(&self, block: &Block) -> Result<Suggestion, LlmError> {
        let prompt = format!(
            "The following command failed.\ncommand: {}\nexit_code: {:?}\noutput:\n{}\nSuggest a single concrete fix.",
            block.command, block.exit_code, block.output
        );
        let response = self.llm.complete(&prompt).await?;
        let suggestion = Suggestion::fix(block.id, "AI suggestion", response.text, 0.6);
        self.state().add_suggestion(suggestion.clone());
        self.bus().publish(
            Event::new(Topic::AiSuggestion, self.name(), self.clock.epoch_ms(), json!({ "suggestion": suggestion.explanation }))
                .with_block(block.id),
        );
        Ok(suggestion)
    }

    /// Answers a free-form `query` against the current state context and
    /// writes the formatted response into `block_id`'s output.
    pub async fn answer(&self, query: &str, block_id: BlockId) -> Result<(), LlmError> {
        let ctx = self.state().get_context();
        let mut prompt = String::from(query);
        prompt.push('\n');
        for (key, value) in &ctx {
            prompt.push_str(&format!("{key}: {value}\n"));
        }
        let response = self.llm.complete(&prompt).await?;
        let text = response.text;
        self.state().update_block(block_id, |block| block.output = text.clone());
        self.bus().publish(
            Event::new(Topic::AiSuggestion, self.name(), self.clock.epoch_ms(), json!({ "suggestion": text }))
                .with_block(block_id),
        );
        Ok(())
    }

    fn match_dictionary(dictionary: &[(String, String)], output: &str) -> Option<String> {
        let lower = output.to_lowercase();
        dictionary.iter().find(|(needle, _)| lower.contains(needle.as_str())).map(|(_, fix)| fix.clone())
    }
}

#[async_trait]
impl<C: Clock + 'static> Plugin for AiPlugin<C> {
    fn name(&self) -> &str {
        "ai"
    }

    async fn init(&self, bus: Arc<EventBus>, state: Arc<StateStore>) {
        *self.bus.write() = Some(bus);
        *self.state.write() = Some(state);
    }

    /// Subscribes to `command.error`: on a dictionary match, records a
    /// Suggestion and publishes `ai.suggestion`. Captures owned clones of
    /// the bus, state, clock, and dictionary so the handler stays `'static`
    /// without borrowing `self`.
    async fn start(&self, _scope: Scope) -> Result<(), PipelineError> {
        let bus = self.bus();
        let state = self.state();
        let clock = self.clock.clone();
        let dictionary = self.dictionary.clone();
        let source = self.name().to_string();
        let sink = bus.clone();

        bus.subscribe(
            Topic::CommandError,
            Arc::new(move |event: &Event| {
                let Some(block_id) = event.block_id else { return };
                let Some(block) = state.get_block(block_id) else { return };
                let Some(fix) = Self::match_dictionary(&dictionary, &block.output) else { return };

                state.add_suggestion(Suggestion::fix(block.id, "Known issue detected", fix.clone(), 0.8));
                sink.publish(
                    Event::new(Topic::AiSuggestion, source.clone(), clock.epoch_ms(), json!({ "suggestion": fix }))
                        .with_block(block.id),
                );
            }),
        );
        Ok(())
    }

    async fn stop(&self) -> Result<(), PipelineError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "ai_plugin_tests.rs"]
mod tests;
