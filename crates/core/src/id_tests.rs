// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn new_id_carries_prefix() {
    let id = RunId::new();
    assert!(id.as_str().starts_with(RunId::PREFIX));
    assert_eq!(id.as_str().len(), ID_MAX_LEN);
}

#[test]
fn from_string_round_trips() {
    let id = StepId::from_string("step_0");
    assert_eq!(id.as_str(), "step_0");
    assert_eq!(id, *"step_0");
}

#[test]
fn suffix_strips_prefix() {
    let id = BlockId::new();
    assert!(!id.suffix().starts_with(BlockId::PREFIX));
}

#[test]
fn two_new_ids_differ() {
    assert_ne!(RunId::new(), RunId::new());
}

#[parameterized(
    run = { RunId::PREFIX },
    step = { StepId::PREFIX },
    block = { BlockId::PREFIX },
    suggestion = { SuggestionId::PREFIX },
    workflow = { WorkflowId::PREFIX },
)]
fn prefix_is_four_chars(prefix: &str) {
    assert_eq!(prefix.len(), 4);
}

#[test]
fn idbuf_rejects_oversized_str_on_deserialize() {
    let too_long = "x".repeat(ID_MAX_LEN + 1);
    let json = serde_json::to_string(&too_long).unwrap_or_default();
    let result: Result<IdBuf, _> = serde_json::from_str(&json);
    assert!(result.is_err());
}

#[test]
fn idbuf_borrow_str_matches_hashmap_lookup() {
    use std::collections::HashMap;
    let mut map: HashMap<IdBuf, u32> = HashMap::new();
    map.insert(IdBuf::new("blk-abc"), 1);
    assert_eq!(map.get("blk-abc"), Some(&1));
}
