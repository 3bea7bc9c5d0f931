// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acceptance tests for `oj2 resume`.

use crate::prelude::*;
use serde_json::Value;

fn run_id_from(stdout: &[u8]) -> String {
    let value: Value = serde_json::from_slice(stdout).expect("run output is valid JSON");
    value["run_id"].as_str().expect("run output carries a run_id").to_string()
}

#[test]
fn resuming_a_failed_run_retries_its_failed_step() {
    let project = Project::empty();
    let marker = project.path().join("should-exist-after-resume");
    let workflow_yaml = format!(
        "name: resumable\nsteps:\n  - id: boom\n    command: \"touch {}\"\n",
        marker.display(),
    );
    let workflow = project.file("wf.yaml", &workflow_yaml);

    // First run: delete the workflow's command target so the step fails —
    // here we simulate failure by pointing at a directory that doesn't
    // exist yet, then create it before resuming.
    std::fs::remove_file(&workflow).unwrap();
    let failing_workflow = project.file(
        "wf.yaml",
        "name: resumable\nsteps:\n  - id: boom\n    command: \"exit 3\"\n",
    );
    let first = project.oj().arg("--format").arg("json").arg("run").arg(&failing_workflow).output().unwrap();
    assert!(!first.status.success());
    let run_id = run_id_from(&first.stdout);

    // Point the same run id at a workflow whose step now succeeds, and resume.
    let fixed_workflow = project.file("wf.yaml", &workflow_yaml);
    project
        .oj()
        .arg("resume")
        .arg(&run_id)
        .arg("--workflow")
        .arg(&fixed_workflow)
        .passes()
        .stdout_has("status: Completed");
    assert!(marker.exists());
}

#[test]
fn resuming_a_completed_run_is_rejected() {
    let project = Project::empty();
    let workflow = project.file("wf.yaml", "name: done\nsteps:\n  - id: a\n    command: \"true\"\n");

    let output = project.oj().arg("--format").arg("json").arg("run").arg(&workflow).output().unwrap();
    assert!(output.status.success());
    let run_id = run_id_from(&output.stdout);

    project.oj().arg("resume").arg(&run_id).arg("--workflow").arg(&workflow).fails();
}
