// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acceptance tests for `oj2 rollback`.

use crate::prelude::*;
use serde_json::Value;

fn run_id_from(stdout: &[u8]) -> String {
    let value: Value = serde_json::from_slice(stdout).expect("run output is valid JSON");
    value["run_id"].as_str().expect("run output carries a run_id").to_string()
}

#[test]
fn rollback_on_demand_runs_rollback_hooks_in_reverse_order() {
    let project = Project::empty();
    let first_marker = project.path().join("first-undone");
    let second_marker = project.path().join("second-undone");
    let workflow_yaml = format!(
        r#"
name: reversible
steps:
  - id: first
    command: "true"
    rollback: "touch {}"
  - id: second
    command: "true"
    rollback: "touch {}"
"#,
        first_marker.display(),
        second_marker.display(),
    );
    let workflow = project.file("wf.yaml", &workflow_yaml);

    let output = project.oj().arg("--format").arg("json").arg("run").arg(&workflow).output().unwrap();
    assert!(output.status.success());
    let run_id = run_id_from(&output.stdout);
    assert!(!project.exists("first-undone"));
    assert!(!project.exists("second-undone"));

    project.oj().arg("rollback").arg(&run_id).arg("--workflow").arg(&workflow).passes().stdout_has("RolledBack");
    assert!(project.exists("first-undone"));
    assert!(project.exists("second-undone"));
}
