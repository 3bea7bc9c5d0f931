// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration, loaded from `<state_dir>/config.toml`.
//!
//! Every field has a `serde(default)`, so a missing file or a partial file
//! are both legal — matching the teacher's settings-loading convention of
//! never failing hard on absent configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use std::time::Duration;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("could not determine a state directory for this platform")]
    NoStateDir,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub block_ring_capacity: usize,
    pub suggestion_queue_capacity: usize,
    pub bus_history_capacity: usize,
    #[serde(with = "duration_secs")]
    pub default_step_timeout: Duration,
    #[serde(with = "duration_secs")]
    pub default_rollback_timeout: Duration,
    pub checkpoint_dir: Option<PathBuf>,
    pub safe_mode: SafeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafeMode {
    Preview,
    Execute,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_ring_capacity: 200,
            suggestion_queue_capacity: 10,
            bus_history_capacity: 100,
            default_step_timeout: crate::workflow::DEFAULT_STEP_TIMEOUT,
            default_rollback_timeout: crate::workflow::DEFAULT_ROLLBACK_TIMEOUT,
            checkpoint_dir: None,
            safe_mode: SafeMode::Preview,
        }
    }
}

impl Config {
    /// Loads config from `path`, falling back to defaults if the file does
    /// not exist. A present-but-invalid file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// The default config file path under the user's state/config directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoStateDir)?;
        Ok(base.join("oj2").join("config.toml"))
    }

    /// Resolves the checkpoint directory, defaulting under the state dir.
    pub fn resolved_checkpoint_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.checkpoint_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir().ok_or(ConfigError::NoStateDir)?;
        Ok(base.join("oj2").join("checkpoints"))
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
