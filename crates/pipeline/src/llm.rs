// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The LLM client seam. The real client is an external collaborator (§1);
//! the AI plugin depends on it only through this narrow trait.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm request failed: {0}")]
    Request(String),
}

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse, LlmError>;
}

/// Stands in for the real client in this crate's own tests, mirroring the
/// teacher's `NoopWorkspaceAdapter` fake-adapter pattern.
pub struct NullLlmClient {
    pub canned: String,
}

impl NullLlmClient {
    pub fn new(canned: impl Into<String>) -> Self {
        Self { canned: canned.into() }
    }
}

#[async_trait]
impl LlmClient for NullLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<LlmResponse, LlmError> {
        Ok(LlmResponse { text: self.canned.clone() })
    }
}
