// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::id::BlockId;

#[test]
fn new_block_has_no_exit_code_yet() {
    let block = Block::new(BlockId::new(), BlockKind::Command, "ls", 0, "/tmp");
    assert_eq!(block.exit_code, None);
    assert!(!block.is_error());
}

#[test]
fn is_error_true_only_for_nonzero_exit() {
    let mut block = Block::new(BlockId::new(), BlockKind::Command, "false", 0, "/tmp");
    block.exit_code = Some(0);
    assert!(!block.is_error());
    block.exit_code = Some(1);
    assert!(block.is_error());
}

#[test]
fn serializes_elapsed_as_millis() {
    let mut block = Block::new(BlockId::new(), BlockKind::Command, "sleep 1", 0, "/tmp");
    block.elapsed = std::time::Duration::from_millis(1500);
    let json = serde_json::to_value(&block).unwrap_or_default();
    assert_eq!(json["elapsed"], 1500);
}
