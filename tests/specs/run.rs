// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acceptance tests for `oj2 run`.

use crate::prelude::*;

#[test]
fn a_multi_step_workflow_runs_to_completion() {
    let project = Project::empty();
    let workflow = project.file(
        "wf.yaml",
        r#"
name: multi-step
steps:
  - id: one
    command: "echo first"
  - id: two
    command: "echo second"
"#,
    );

    project.oj().arg("run").arg(&workflow).passes().stdout_has("status: Completed");
}

#[test]
fn a_condition_that_fails_skips_its_step() {
    let project = Project::empty();
    let workflow = project.file(
        "wf.yaml",
        r#"
name: conditional
steps:
  - id: probe
    command: "echo probe"
  - id: guarded
    command: "echo should-not-print-in-output-check"
    condition:
      type: output_contains
      value: "never-matches"
      step: probe
"#,
    );

    project.oj().arg("run").arg(&workflow).passes().stdout_has("status: Completed");
}

#[test]
fn a_failing_step_aborts_by_default() {
    let project = Project::empty();
    let workflow = project.file(
        "wf.yaml",
        r#"
name: aborts
steps:
  - id: boom
    command: "exit 7"
"#,
    );

    project.oj().arg("run").arg(&workflow).fails().stdout_has("status: Failed");
}

#[test]
fn preview_mode_reports_completion_without_running_anything() {
    let project = Project::empty();
    let marker = project.path().join("marker");
    let workflow = project.file(
        "wf.yaml",
        &format!("name: preview\nsteps:\n  - id: touch\n    command: \"touch {}\"\n", marker.display()),
    );

    project.oj().arg("--preview").arg("run").arg(&workflow).passes().stdout_has("status: Previewed");
    assert!(!marker.exists(), "preview mode must never execute the underlying command");
}
