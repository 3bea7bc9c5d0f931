// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The command executor: the uniform shell-invocation layer used by the
//! pipeline's Command Plugin and by the workflow engine.

use crate::shell::{resolve_shell, wrap_with_rc_sourcing};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::field::Empty;

pub const TIMEOUT_EXIT_CODE: i32 = 124;
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 1;
const TIMEOUT_MARKER: &str = "Command timed out";

const NOISE_SUBSTRINGS: &[&str] = &["compinit", "compdef", "zinit", "Loading", "Loaded"];

/// Which shell-invocation style to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Default: resolves `$SHELL`, sources zsh/bash rc files.
    Rc,
    /// Forces `/bin/sh`, skips rc sourcing — for internal tooling that must
    /// not pick up user aliases.
    Simple,
    /// Interactive-shell invocation (`-i -c`), with ANSI escapes and prompt
    /// lines stripped from the captured output.
    Pty,
}

#[derive(Debug, Clone)]
pub struct ExecResult {
    pub command: String,
    pub shell: String,
    pub output: String,
    pub exit_code: i32,
    pub duration: Duration,
    pub started_at: Instant,
}

/// Runs `command` under `mode`, honouring `timeout`.
pub async fn execute(command: &str, mode: ExecMode, timeout: Duration) -> ExecResult {
    let started_at = Instant::now();
    let shell = match mode {
        ExecMode::Simple => "/bin/sh".to_string(),
        ExecMode::Rc | ExecMode::Pty => resolve_shell(),
    };

    let span = tracing::info_span!("exec.cmd", cmd = %command, shell = %shell, exit_code = Empty, duration_ms = Empty);
    let _enter = span.enter();

    let invocation = match mode {
        ExecMode::Rc => wrap_with_rc_sourcing(&shell, command),
        ExecMode::Simple => command.to_string(),
        ExecMode::Pty => command.to_string(),
    };

    let mut cmd = Command::new(&shell);
    if mode == ExecMode::Pty {
        cmd.arg("-i").arg("-c").arg(&invocation);
    } else {
        cmd.arg("-c").arg(&invocation);
    }
    if std::env::var("TERM").is_err() {
        cmd.env("TERM", "xterm-256color");
    }

    let (output, exit_code) = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(raw)) => {
            let mut text = merge_and_filter(&raw.stdout, &raw.stderr);
            if mode == ExecMode::Pty {
                text = strip_pty_artifacts(&text);
            }
            (text, raw.status.code().unwrap_or(SPAWN_FAILURE_EXIT_CODE))
        }
        Ok(Err(io_err)) => (io_err.to_string(), SPAWN_FAILURE_EXIT_CODE),
        Err(_elapsed) => (TIMEOUT_MARKER.to_string(), TIMEOUT_EXIT_CODE),
    };

    let duration = started_at.elapsed();
    span.record("exit_code", exit_code);
    span.record("duration_ms", duration.as_millis() as u64);

    ExecResult {
        command: command.to_string(),
        shell,
        output,
        exit_code,
        duration,
        started_at,
    }
}

fn merge_and_filter(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);

    let filtered_stderr: Vec<&str> = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !NOISE_SUBSTRINGS.iter().any(|noise| line.contains(noise)))
        .collect();

    let mut merged = stdout.trim_end_matches('\n').to_string();
    if !filtered_stderr.is_empty() {
        if !merged.is_empty() {
            merged.push('\n');
        }
        merged.push_str(&filtered_stderr.join("\n"));
    }
    merged
}

/// Strips ANSI escape sequences and leading shell-prompt lines from a pty
/// capture. A minimal subset of ANSI CSI sequences is recognised — enough
/// for the common prompt-coloring case, not a full terminal emulator.
fn strip_pty_artifacts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
