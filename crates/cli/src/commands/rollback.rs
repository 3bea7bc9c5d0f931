// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj2 rollback` — run the rollback procedure for a specific run on demand.

use crate::commands::shared::{build_engine, load_config, GlobalOptions};
use crate::exit_error::ExitError;
use crate::output::{print_run, OutputFormat};
use anyhow::Context;
use oj2_core::RunId;
use std::path::Path;

pub async fn handle(run_id: &str, workflow_file: &Path, opts: GlobalOptions, format: OutputFormat) -> anyhow::Result<()> {
    let workflow_yaml = std::fs::read_to_string(workflow_file)
        .with_context(|| format!("reading workflow file {}", workflow_file.display()))?;
    let workflow = oj2_runbook::parse_workflow(&workflow_yaml).context("parsing workflow")?;

    let config = load_config(&opts)?;
    let (engine, _bus) = build_engine(&opts, &config)?;

    let run_id = RunId::from_string(run_id);
    let run = engine.rollback_run(&workflow, run_id).await.map_err(|e| ExitError::new(1, e.to_string()))?;
    print_run(&run, format)?;
    Ok(())
}
