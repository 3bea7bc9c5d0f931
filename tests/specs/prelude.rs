// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared scaffolding: a throwaway project directory and an `oj2`
//! command builder, plus chainable assertions over its output.

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().expect("create temp project dir") }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn checkpoint_dir(&self) -> PathBuf {
        self.dir.path().join("checkpoints")
    }

    /// Writes `name` under the project directory and returns its full path.
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, contents).expect("write project file");
        path
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// An `oj2` invocation scoped to this project's checkpoint directory.
    pub fn oj(&self) -> Command {
        let mut cmd = Command::cargo_bin("oj2").expect("locate oj2 binary");
        cmd.arg("--checkpoint-dir").arg(self.checkpoint_dir());
        cmd
    }
}

pub trait CommandExt {
    fn passes(&mut self) -> Assert;
    fn fails(&mut self) -> Assert;
}

impl CommandExt for Command {
    fn passes(&mut self) -> Assert {
        self.assert().success()
    }

    fn fails(&mut self) -> Assert {
        self.assert().failure()
    }
}

pub trait OutputExt {
    fn stdout_has(self, needle: &str) -> Assert;
    fn stdout_lacks(self, needle: &str) -> Assert;
}

impl OutputExt for Assert {
    fn stdout_has(self, needle: &str) -> Assert {
        let stdout = String::from_utf8_lossy(&self.get_output().stdout).into_owned();
        assert!(stdout.contains(needle), "stdout did not contain {needle:?}:\n{stdout}");
        self
    }

    fn stdout_lacks(self, needle: &str) -> Assert {
        let stdout = String::from_utf8_lossy(&self.get_output().stdout).into_owned();
        assert!(!stdout.contains(needle), "stdout unexpectedly contained {needle:?}:\n{stdout}");
        self
    }
}
