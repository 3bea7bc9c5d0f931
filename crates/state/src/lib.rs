// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shared state store: a bounded block ring, a bounded suggestion
//! queue, and infra snapshots, behind a single reader-writer lock.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod ring;
pub mod store;

pub use ring::BlockRing;
pub use store::{InfraSnapshot, StateStore, DEFAULT_BLOCK_CAPACITY, DEFAULT_SUGGESTION_CAPACITY};
