// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acceptance tests for `oj2 list-runs`.

use crate::prelude::*;

#[test]
fn list_runs_reports_every_recorded_run() {
    let project = Project::empty();
    let first = project.file("first.yaml", "name: first-workflow\nsteps:\n  - id: a\n    command: \"true\"\n");
    let second = project.file("second.yaml", "name: second-workflow\nsteps:\n  - id: a\n    command: \"true\"\n");

    project.oj().arg("run").arg(&first).passes();
    project.oj().arg("run").arg(&second).passes();

    project.oj().arg("list-runs").passes().stdout_has("first-workflow").stdout_has("second-workflow");
}

#[test]
fn list_runs_respects_the_limit_flag() {
    let project = Project::empty();
    let workflow = project.file("wf.yaml", "name: capped\nsteps:\n  - id: a\n    command: \"true\"\n");

    for _ in 0..3 {
        project.oj().arg("run").arg(&workflow).passes();
    }

    let output = project.oj().arg("list-runs").arg("--limit").arg("1").output().unwrap();
    assert!(output.status.success());
    let lines = String::from_utf8_lossy(&output.stdout).lines().filter(|l| l.contains("capped")).count();
    assert_eq!(lines, 1);
}
