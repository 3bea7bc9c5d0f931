// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    zsh = { "/bin/zsh", "echo hi", "source ~/.zshrc 2>/dev/null; echo hi" },
    bash = { "/usr/bin/bash", "echo hi", "source ~/.bashrc 2>/dev/null; echo hi" },
    sh = { "/bin/sh", "echo hi", "echo hi" },
    fish = { "/usr/bin/fish", "echo hi", "echo hi" },
)]
fn wraps_only_zsh_and_bash(shell: &str, cmd: &str, expected: &str) {
    assert_eq!(wrap_with_rc_sourcing(shell, cmd), expected);
}

#[test]
fn resolve_shell_never_returns_empty() {
    assert!(!resolve_shell().is_empty());
}
