// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path layout for the two logical tables, realised as directories of
//! one JSON file per row under the checkpoint directory.

use oj2_core::{RunId, StepId};
use std::path::{Path, PathBuf};

pub fn runs_dir(checkpoint_dir: &Path) -> PathBuf {
    checkpoint_dir.join("runs")
}

pub fn run_file(checkpoint_dir: &Path, run_id: RunId) -> PathBuf {
    runs_dir(checkpoint_dir).join(format!("{run_id}.json"))
}

pub fn steps_dir(checkpoint_dir: &Path, run_id: RunId) -> PathBuf {
    runs_dir(checkpoint_dir).join(run_id.as_str()).join("steps")
}

pub fn step_file(checkpoint_dir: &Path, run_id: RunId, step_id: StepId) -> PathBuf {
    steps_dir(checkpoint_dir, run_id).join(format!("{step_id}.json"))
}
