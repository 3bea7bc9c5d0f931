// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The concurrency-safe shared store: block ring, suggestion queue, infra
//! snapshots, and the last-error pointer.

use crate::ring::BlockRing;
use oj2_core::{Block, BlockId, Suggestion, SuggestionId};
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_SUGGESTION_CAPACITY: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct InfraSnapshot {
    pub container_health: Option<String>,
    pub gpu_stats: Option<String>,
    pub starship_line: Option<String>,
    pub cwd: Option<String>,
}

struct Inner {
    blocks: BlockRing,
    suggestions: VecDeque<Suggestion>,
    suggestion_capacity: usize,
    suggestions_by_block: HashMap<BlockId, Vec<SuggestionId>>,
    last_error: Option<BlockId>,
    infra: InfraSnapshot,
}

pub struct StateStore {
    inner: RwLock<Inner>,
}

impl StateStore {
    pub fn new(block_capacity: usize, suggestion_capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                blocks: BlockRing::new(block_capacity),
                suggestions: VecDeque::new(),
                suggestion_capacity: suggestion_capacity.max(1),
                suggestions_by_block: HashMap::new(),
                last_error: None,
                infra: InfraSnapshot::default(),
            }),
        }
    }

    pub fn add_block(&self, block: Block) {
        let mut inner = self.inner.write();
        if block.is_error() {
            inner.last_error = Some(block.id);
        }
        inner.blocks.push(block);
    }

    pub fn get_block(&self, id: BlockId) -> Option<Block> {
        self.inner.read().blocks.get(id).cloned()
    }

    pub fn update_block<F>(&self, id: BlockId, mutator: F) -> bool
    where
        F: FnOnce(&mut Block),
    {
        let mut inner = self.inner.write();
        let updated = inner.blocks.update(id, mutator);
        if updated {
            if let Some(block) = inner.blocks.get(id) {
                if block.is_error() {
                    inner.last_error = Some(id);
                }
            }
        }
        updated
    }

    pub fn get_recent_blocks(&self, n: usize) -> Vec<Block> {
        self.inner.read().blocks.recent(n)
    }

    pub fn get_blocks(&self) -> Vec<Block> {
        self.inner.read().blocks.all()
    }

    pub fn clear_blocks(&self) {
        self.inner.write().blocks.clear();
    }

    pub fn last_error_block(&self) -> Option<Block> {
        let inner = self.inner.read();
        let id = inner.last_error?;
        inner.blocks.get(id).cloned()
    }

    pub fn add_suggestion(&self, suggestion: Suggestion) {
        let mut inner = self.inner.write();
        if inner.suggestions.len() >= inner.suggestion_capacity {
            if let Some(evicted) = inner.suggestions.pop_front() {
                if let Some(ids) = inner.suggestions_by_block.get_mut(&evicted.block_id) {
                    ids.retain(|id| *id != evicted.id);
                }
            }
        }
        inner.suggestions_by_block.entry(suggestion.block_id).or_default().push(suggestion.id);
        inner.suggestions.push_back(suggestion);
    }

    pub fn get_suggestions_for(&self, block_id: BlockId) -> Vec<Suggestion> {
        let inner = self.inner.read();
        inner
            .suggestions
            .iter()
            .filter(|s| s.block_id == block_id)
            .cloned()
            .collect()
    }

    pub fn set_container_health(&self, value: Option<String>) {
        self.inner.write().infra.container_health = value;
    }

    pub fn set_gpu_stats(&self, value: Option<String>) {
        self.inner.write().infra.gpu_stats = value;
    }

    pub fn set_starship_line(&self, value: Option<String>) {
        self.inner.write().infra.starship_line = value;
    }

    pub fn set_cwd(&self, value: Option<String>) {
        self.inner.write().infra.cwd = value;
    }

    pub fn infra_snapshot(&self) -> InfraSnapshot {
        self.inner.read().infra.clone()
    }

    /// A flat map view of the store's context, suitable for AI prompt
    /// construction: the most recent blocks' commands plus the current
    /// infra snapshot fields.
    pub fn get_context(&self) -> HashMap<String, String> {
        let inner = self.inner.read();
        let mut ctx = HashMap::new();
        if let Some(cwd) = &inner.infra.cwd {
            ctx.insert("cwd".to_string(), cwd.clone());
        }
        if let Some(health) = &inner.infra.container_health {
            ctx.insert("container_health".to_string(), health.clone());
        }
        if let Some(gpu) = &inner.infra.gpu_stats {
            ctx.insert("gpu_stats".to_string(), gpu.clone());
        }
        if let Some(block) = inner.last_error.and_then(|id| inner.blocks.get(id)) {
            ctx.insert("last_error_command".to_string(), block.command.clone());
            ctx.insert("last_error_output".to_string(), block.output.clone());
        }
        ctx
    }
}

pub const DEFAULT_BLOCK_CAPACITY: usize = 200;

impl Default for StateStore {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_CAPACITY, DEFAULT_SUGGESTION_CAPACITY)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
