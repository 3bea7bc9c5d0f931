// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Owns the bus and state store; registers, initialises, starts, and stops
//! plugins.

use crate::error::PipelineError;
use crate::plugin::Plugin;
use crate::scope::{scope, Scope, ScopeHandle};
use oj2_bus::EventBus;
use oj2_state::StateStore;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct PipelineCoordinator {
    bus: Arc<EventBus>,
    state: Arc<StateStore>,
    plugins: RwLock<Vec<Arc<dyn Plugin>>>,
    scope_handle: ScopeHandle,
    scope: Scope,
}

impl PipelineCoordinator {
    pub fn new(bus: Arc<EventBus>, state: Arc<StateStore>) -> Self {
        let (scope_handle, scope) = scope();
        Self { bus, state, plugins: RwLock::new(Vec::new()), scope_handle, scope }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn state(&self) -> &Arc<StateStore> {
        &self.state
    }

    /// Initialises `plugin` with the shared bus and state, then registers
    /// it. Does not start it — call `start()` for that.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> Result<(), PipelineError> {
        {
            let existing = self.plugins.read();
            if existing.iter().any(|p| p.name() == plugin.name()) {
                return Err(PipelineError::AlreadyRegistered { name: plugin.name().to_string() });
            }
        }
        plugin.init(self.bus.clone(), self.state.clone()).await;
        self.plugins.write().push(plugin);
        Ok(())
    }

    /// Starts every registered plugin in registration order, halting at the
    /// first error.
    pub async fn start(&self) -> Result<(), PipelineError> {
        let plugins = self.plugins.read().clone();
        for plugin in plugins {
            plugin.start(self.scope.clone()).await.map_err(|e| {
                tracing::error!(plugin = plugin.name(), error = %e, "plugin failed to start");
                e
            })?;
        }
        Ok(())
    }

    /// Cancels the shared scope, then stops every plugin, continuing past
    /// individual failures.
    pub async fn stop(&self) {
        self.scope_handle.cancel();
        let plugins = self.plugins.read().clone();
        for plugin in plugins {
            if let Err(e) = plugin.stop().await {
                tracing::warn!(plugin = plugin.name(), error = %e, "plugin failed to stop (best-effort)");
            }
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
