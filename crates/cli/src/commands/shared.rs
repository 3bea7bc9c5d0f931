// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring shared by every subcommand: config resolution, engine
//! construction, step narration, and the interactive approval callback.

use anyhow::{Context, Result};
use oj2_bus::{Event, EventBus, Topic};
use oj2_core::{Config, SafeMode, SystemClock};
use oj2_engine::{SafeModeGovernor, WorkflowEngine};
use oj2_storage::CheckpointStore;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Global flags every subcommand accepts, lifted out of `Cli` so command
/// handlers don't each repeat the same five fields.
pub struct GlobalOptions {
    pub checkpoint_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub preview: bool,
    pub verbose: bool,
    pub quiet: bool,
}

pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
    let path = match &opts.config {
        Some(p) => p.clone(),
        None => Config::default_path().context("resolving default config path")?,
    };
    Config::load(&path).context("loading config")
}

pub fn build_engine(opts: &GlobalOptions, config: &Config) -> Result<(WorkflowEngine<SystemClock>, Arc<EventBus>)> {
    let checkpoint_dir = match &opts.checkpoint_dir {
        Some(dir) => dir.clone(),
        None => config.resolved_checkpoint_dir().context("resolving checkpoint directory")?,
    };
    let storage = Arc::new(CheckpointStore::open(checkpoint_dir).context("opening checkpoint store")?);
    let bus = Arc::new(EventBus::new(config.bus_history_capacity));

    let mode = if opts.preview { SafeMode::Preview } else { config.safe_mode };
    let approval = if mode == SafeMode::Execute { Some(interactive_approval_callback()) } else { None };
    let safe_mode = Arc::new(SafeModeGovernor::new(mode, approval));

    if opts.verbose && !opts.quiet {
        subscribe_narration(&bus);
    }

    Ok((WorkflowEngine::new(SystemClock, storage, bus.clone(), safe_mode), bus))
}

fn interactive_approval_callback() -> Arc<dyn Fn(&str) -> bool + Send + Sync> {
    Arc::new(|command: &str| {
        print!("'{command}' looks destructive. Run it? [y/N] ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    })
}

fn subscribe_narration(bus: &Arc<EventBus>) {
    bus.subscribe(
        Topic::WorkflowStep,
        Arc::new(|event: &Event| {
            let step = event.payload.get("step_id").and_then(|v| v.as_str()).unwrap_or("?");
            let status = event.payload.get("status").and_then(|v| v.as_str()).unwrap_or("?");
            println!("  step {step}: {status}");
        }),
    );
    bus.subscribe(
        Topic::WorkflowRollback,
        Arc::new(|_event: &Event| {
            println!("  rolling back...");
        }),
    );
}
