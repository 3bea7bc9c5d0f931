// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The plugin pipeline: a coordinator owning the shared bus and state
//! store, and the two built-in plugins (command execution, AI reaction)
//! that talk to each other only through them.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod ai_plugin;
pub mod command_plugin;
pub mod coordinator;
pub mod error;
pub mod llm;
pub mod plugin;
pub mod routing;
pub mod scope;

pub use ai_plugin::AiPlugin;
pub use command_plugin::{CommandPlugin, Dispatch};
pub use coordinator::PipelineCoordinator;
pub use error::PipelineError;
pub use llm::{LlmClient, LlmError, LlmResponse, NullLlmClient};
pub use plugin::Plugin;
pub use routing::{route_input, AiInput, Input};
pub use scope::{scope, Scope, ScopeHandle};
