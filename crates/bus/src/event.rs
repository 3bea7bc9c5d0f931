// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One bus message. Immutable after publish.

use crate::topic::Topic;
use oj2_core::BlockId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub topic: Topic,
    pub timestamp_ms: u64,
    pub source: String,
    #[serde(default)]
    pub block_id: Option<BlockId>,
    pub payload: Value,
}

impl Event {
    pub fn new(topic: Topic, source: impl Into<String>, timestamp_ms: u64, payload: Value) -> Self {
        Self { topic, timestamp_ms, source: source.into(), block_id: None, payload }
    }

    pub fn with_block(mut self, block_id: BlockId) -> Self {
        self.block_id = Some(block_id);
        self
    }
}
