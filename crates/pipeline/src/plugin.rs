// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The plugin capability set. No plugin-to-plugin direct call path exists;
//! all inter-plugin interaction is via the bus and state store.

use crate::error::PipelineError;
use crate::scope::Scope;
use async_trait::async_trait;
use oj2_bus::EventBus;
use oj2_state::StateStore;
use std::sync::Arc;

#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Captures the bus and state references. Called once, under the
    /// coordinator's write lock, before `start`.
    async fn init(&self, bus: Arc<EventBus>, state: Arc<StateStore>);

    /// May spawn background workers. Errors here halt coordinator start.
    async fn start(&self, scope: Scope) -> Result<(), PipelineError>;

    /// Must release any resources `start` acquired. Errors are logged by
    /// the coordinator but do not prevent sibling plugins from stopping.
    async fn stop(&self) -> Result<(), PipelineError>;
}
