// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use oj2_core::BlockKind;
use proptest::prelude::*;

fn block(id: BlockId) -> Block {
    Block::new(id, BlockKind::Command, "echo hi", 0, "/tmp")
}

#[test]
fn eviction_is_oldest_first_at_capacity() {
    let mut ring = BlockRing::new(2);
    let a = BlockId::new();
    let b = BlockId::new();
    let c = BlockId::new();
    ring.push(block(a));
    ring.push(block(b));
    ring.push(block(c));

    assert_eq!(ring.len(), 2);
    assert!(ring.get(a).is_none());
    assert!(ring.get(b).is_some());
    assert!(ring.get(c).is_some());
}

#[test]
fn update_mutates_in_place() {
    let mut ring = BlockRing::new(10);
    let id = BlockId::new();
    ring.push(block(id));
    let updated = ring.update(id, |b| b.exit_code = Some(1));
    assert!(updated);
    assert_eq!(ring.get(id).expect("present").exit_code, Some(1));
}

#[test]
fn update_of_unknown_id_returns_false() {
    let mut ring = BlockRing::new(10);
    assert!(!ring.update(BlockId::new(), |_| {}));
}

#[test]
fn recent_returns_newest_last_n_in_order() {
    let mut ring = BlockRing::new(10);
    let ids: Vec<BlockId> = (0..5).map(|_| BlockId::new()).collect();
    for id in &ids {
        ring.push(block(*id));
    }
    let recent = ring.recent(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, ids[3]);
    assert_eq!(recent[1].id, ids[4]);
}

proptest! {
    #[test]
    fn ring_never_exceeds_capacity(capacity in 1usize..20, inserts in 0usize..50) {
        let mut ring = BlockRing::new(capacity);
        for _ in 0..inserts {
            ring.push(block(BlockId::new()));
        }
        prop_assert!(ring.len() <= capacity);
    }
}
