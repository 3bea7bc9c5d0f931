// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn successful_command_has_exit_code_zero() {
    let result = execute("echo hello", ExecMode::Simple, Duration::from_secs(5)).await;
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.output, "hello");
}

#[tokio::test]
async fn nonzero_exit_is_surfaced_unchanged() {
    let result = execute("exit 7", ExecMode::Simple, Duration::from_secs(5)).await;
    assert_eq!(result.exit_code, 7);
}

#[tokio::test]
async fn timeout_yields_124_and_marker_output() {
    let result = execute("sleep 5", ExecMode::Simple, Duration::from_millis(50)).await;
    assert_eq!(result.exit_code, TIMEOUT_EXIT_CODE);
    assert_eq!(result.output, "Command timed out");
}

#[tokio::test]
async fn empty_output_exit_zero() {
    let result = execute("true", ExecMode::Simple, Duration::from_secs(5)).await;
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.output, "");
}

#[test]
fn merge_and_filter_drops_known_noise_lines() {
    let stderr = b"compinit: something\nreal error here\n";
    let merged = merge_and_filter(b"", stderr);
    assert_eq!(merged, "real error here");
}

#[test]
fn merge_and_filter_trims_trailing_newline() {
    let merged = merge_and_filter(b"output text\n", b"");
    assert_eq!(merged, "output text");
}

#[test]
fn strip_pty_artifacts_removes_csi_sequences() {
    let raw = "\u{1b}[32mgreen\u{1b}[0m text";
    assert_eq!(strip_pty_artifacts(raw), "green text");
}
