// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj2 list-runs` — recent runs, newest first.

use crate::commands::shared::{load_config, GlobalOptions};
use crate::output::{print_run_list, OutputFormat};
use anyhow::Context;
use oj2_storage::CheckpointStore;

pub fn handle(limit: usize, opts: GlobalOptions, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(&opts)?;
    let checkpoint_dir = match &opts.checkpoint_dir {
        Some(dir) => dir.clone(),
        None => config.resolved_checkpoint_dir().context("resolving checkpoint directory")?,
    };
    let store = CheckpointStore::open(checkpoint_dir).context("opening checkpoint store")?;
    let runs = store.list_runs(limit);
    print_run_list(&runs, format)?;
    Ok(())
}
