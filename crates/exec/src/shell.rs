// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell selection and rc-sourcing for the command executor.

const KNOWN_SHELLS: &[&str] = &["/bin/zsh", "/usr/bin/zsh", "/bin/bash", "/usr/bin/bash", "/bin/sh"];

/// Resolves the shell to invoke: `$SHELL`, then a fixed probe list, then
/// `/bin/sh`.
pub fn resolve_shell() -> String {
    if let Ok(shell) = std::env::var("SHELL") {
        if !shell.is_empty() {
            return shell;
        }
    }
    for candidate in KNOWN_SHELLS {
        if std::path::Path::new(candidate).exists() {
            return candidate.to_string();
        }
    }
    "/bin/sh".to_string()
}

fn shell_name(shell: &str) -> &str {
    shell.rsplit('/').next().unwrap_or(shell)
}

/// Wraps `cmd` so zsh/bash source the user's rc file first, swallowing any
/// rc-load error rather than failing the whole invocation.
pub fn wrap_with_rc_sourcing(shell: &str, cmd: &str) -> String {
    match shell_name(shell) {
        "zsh" => format!("source ~/.zshrc 2>/dev/null; {cmd}"),
        "bash" => format!("source ~/.bashrc 2>/dev/null; {cmd}"),
        _ => cmd.to_string(),
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
