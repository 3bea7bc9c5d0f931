// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("plugin {name:?} failed to start: {reason}")]
    StartFailed { name: String, reason: String },
    #[error("plugin {name:?} already registered")]
    AlreadyRegistered { name: String },
}
