// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text/JSON output selection shared by every subcommand.

use clap::ValueEnum;
use oj2_core::{RunState, RunStatus};
use oj2_storage::RunSummary;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_run(run: &RunState, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(run)?),
        OutputFormat::Text => {
            println!("run {} — {}", run.run_id, run.workflow_name);
            println!("status: {:?}", run.status);
            if let Some(error) = &run.error {
                println!("error: {error}");
            }
            let mut steps: Vec<_> = run.step_results.values().collect();
            steps.sort_by_key(|s| s.started_at_ms);
            for step in steps {
                let exit = step.exit_code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());
                println!("  {} {:?} exit={exit}", step.step_id, step.status);
            }
        }
    }
    Ok(())
}

pub fn print_run_list(runs: &[RunSummary], format: OutputFormat) -> anyhow::Result<()> {
    #[derive(Serialize)]
    struct Row<'a> {
        run_id: String,
        workflow_name: &'a str,
        status: RunStatus,
        started_at_ms: u64,
    }
    let rows: Vec<Row> = runs
        .iter()
        .map(|r| Row { run_id: r.run_id.to_string(), workflow_name: &r.workflow_name, status: r.status, started_at_ms: r.started_at_ms })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            if runs.is_empty() {
                println!("No runs recorded");
                return Ok(());
            }
            for row in &rows {
                println!("{}  {:<12?}  {}", row.run_id, row.status, row.workflow_name);
            }
        }
    }
    Ok(())
}

pub fn print_preview_summary(summary: &str) {
    println!("{summary}");
}

/// Maps a finished run's status to the process exit code: `0` only for a
/// natural, non-preview completion.
pub fn exit_code_for(status: RunStatus) -> i32 {
    match status {
        RunStatus::Completed => 0,
        _ => 1,
    }
}
