// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj2 run` and `oj2 resume` — execute a workflow to completion (or to
//! the first pause, abort, or rollback).

use crate::commands::shared::{build_engine, load_config, GlobalOptions};
use crate::exit_error::ExitError;
use crate::output::{exit_code_for, print_run, OutputFormat};
use anyhow::{Context, Result};
use oj2_core::RunId;
use std::path::Path;

pub async fn handle_run(workflow_file: &Path, opts: GlobalOptions, format: OutputFormat) -> Result<()> {
    let workflow_yaml = std::fs::read_to_string(workflow_file)
        .with_context(|| format!("reading workflow file {}", workflow_file.display()))?;
    let workflow = oj2_runbook::parse_workflow(&workflow_yaml).context("parsing workflow")?;

    let config = load_config(&opts)?;
    let (engine, _bus) = build_engine(&opts, &config)?;

    let run = engine.run(&workflow, None).await.map_err(|e| ExitError::new(1, e.to_string()))?;
    print_run(&run, format)?;
    if opts.verbose {
        println!("checkpoint persist failures: {}", engine.persist_failures());
    }

    let code = exit_code_for(run.status);
    if code != 0 {
        return Err(ExitError::new(code, format!("run ended with status {:?}", run.status)).into());
    }
    Ok(())
}

/// `resume` needs the original workflow definition to know what each step
/// runs — the checkpoint store persists run/step *results*, not the
/// workflow itself, so the caller must point back at the source file.
pub async fn handle_resume(run_id: &str, workflow_file: &Path, opts: GlobalOptions, format: OutputFormat) -> Result<()> {
    let workflow_yaml = std::fs::read_to_string(workflow_file)
        .with_context(|| format!("reading workflow file {}", workflow_file.display()))?;
    let workflow = oj2_runbook::parse_workflow(&workflow_yaml).context("parsing workflow")?;

    let config = load_config(&opts)?;
    let (engine, _bus) = build_engine(&opts, &config)?;

    let run_id = RunId::from_string(run_id);
    let run = engine.resume(&workflow, run_id, None).await.map_err(|e| ExitError::new(1, e.to_string()))?;
    print_run(&run, format)?;
    if opts.verbose {
        println!("checkpoint persist failures: {}", engine.persist_failures());
    }

    let code = exit_code_for(run.status);
    if code != 0 {
        return Err(ExitError::new(code, format!("run ended with status {:?}", run.status)).into());
    }
    Ok(())
}
