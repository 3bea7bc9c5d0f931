// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Block: the canonical record of one executed command.

use crate::id::BlockId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What produced a block's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Command,
    Ai,
    Output,
    Error,
    Suggestion,
}

/// One executed command from the user's perspective; the unit of history
/// in the state store's block ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Epoch milliseconds at invocation start.
    pub started_at_ms: u64,
    pub command: String,
    /// Stdout and stderr merged, noise-filtered, trailing newline trimmed.
    pub output: String,
    pub exit_code: Option<i32>,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
    pub folded: bool,
    pub cwd: String,
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind, command: impl Into<String>, started_at_ms: u64, cwd: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            started_at_ms,
            command: command.into(),
            output: String::new(),
            exit_code: None,
            elapsed: Duration::ZERO,
            folded: false,
            cwd: cwd.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.exit_code, Some(code) if code != 0)
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
#[path = "block_tests.rs"]
mod tests;
