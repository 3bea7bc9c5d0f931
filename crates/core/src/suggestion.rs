// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Suggestion: a derived, non-executing hint attached to a failed block.

use crate::id::{BlockId, SuggestionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Fix,
    Explain,
    Question,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub block_id: BlockId,
    pub kind: SuggestionKind,
    pub title: String,
    pub command: Option<String>,
    pub explanation: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
}

impl Suggestion {
    pub fn fix(block_id: BlockId, title: impl Into<String>, explanation: impl Into<String>, confidence: f32) -> Self {
        Self {
            id: SuggestionId::new(),
            block_id,
            kind: SuggestionKind::Fix,
            title: title.into(),
            command: None,
            explanation: explanation.into(),
            confidence,
        }
    }
}
