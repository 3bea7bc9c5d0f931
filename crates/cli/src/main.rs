// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj2` — the developer-assistance runtime's command-line entry point.

mod commands;
mod exit_error;
mod output;

use clap::{Parser, Subcommand};
use commands::shared::GlobalOptions;
use exit_error::ExitError;
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "oj2", about = "Workflow engine, event bus, and command execution runtime")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Force safe-mode preview: no step actually executes.
    #[arg(long, global = true)]
    preview: bool,

    /// Narrate step transitions to standard output as the run progresses.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress step narration even with --verbose.
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Overrides the configured checkpoint directory.
    #[arg(long, global = true, value_name = "PATH")]
    checkpoint_dir: Option<PathBuf>,

    /// Overrides the default config file location.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a workflow file.
    Run {
        /// Path to the workflow YAML file.
        workflow_file: PathBuf,
    },
    /// Resume a paused or failed run.
    Resume {
        /// The run id to resume.
        run_id: String,
        /// The workflow file the run was started from.
        #[arg(long)]
        workflow: PathBuf,
    },
    /// Roll a run back on demand.
    Rollback {
        /// The run id to roll back.
        run_id: String,
        /// The workflow file the run was started from.
        #[arg(long)]
        workflow: PathBuf,
    },
    /// List recent runs, newest first.
    ListRuns {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .init();

    let opts = GlobalOptions {
        checkpoint_dir: cli.checkpoint_dir,
        config: cli.config,
        preview: cli.preview,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Command::Run { workflow_file } => commands::run::handle_run(&workflow_file, opts, cli.format).await,
        Command::Resume { run_id, workflow } => commands::run::handle_resume(&run_id, &workflow, opts, cli.format).await,
        Command::Rollback { run_id, workflow } => commands::rollback::handle(&run_id, &workflow, opts, cli.format).await,
        Command::ListRuns { limit } => commands::list_runs::handle(limit, opts, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(exit_err) = err.downcast_ref::<ExitError>() {
                eprintln!("{exit_err}");
                return ExitCode::from(exit_err.code as u8);
            }
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
