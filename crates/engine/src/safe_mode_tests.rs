use super::*;
use oj2_core::StepId;
use std::sync::atomic::{AtomicBool, Ordering};
use yare::parameterized;

#[parameterized(
    rm_rf = {"rm -rf /tmp/x"},
    dd = {"dd if=/dev/zero of=/dev/sda"},
    mkfs = {"mkfs.ext4 /dev/sda1"},
    chmod = {"chmod 777 /etc/passwd"},
    fork_bomb = {":(){ :|:& };:"},
    drop_db = {"DROP DATABASE prod"},
    delete_from = {"DELETE FROM users WHERE 1=1"},
    git_reset = {"git reset --hard origin/main"},
    docker_prune = {"docker system prune -af"},
)]
fn recognises_destructive_patterns_case_insensitively(command: &str) {
    assert!(is_destructive(command));
}

#[test]
fn benign_command_is_not_destructive() {
    assert!(!is_destructive("echo hello"));
}

#[test]
fn preview_mode_never_executes_and_records_action() {
    let governor = SafeModeGovernor::new(SafeMode::Preview, None);
    let decision = governor.authorize(StepId::from_string("a"), "build", "echo hi").unwrap();
    assert_eq!(decision, Authorization::Preview);
    assert_eq!(governor.previews().len(), 1);
}

#[test]
fn execute_mode_allows_non_destructive_without_callback() {
    let governor = SafeModeGovernor::new(SafeMode::Execute, None);
    let decision = governor.authorize(StepId::from_string("a"), "build", "echo hi").unwrap();
    assert_eq!(decision, Authorization::Execute);
}

#[test]
fn execute_mode_destructive_without_callback_is_fatal() {
    let governor = SafeModeGovernor::new(SafeMode::Execute, None);
    let err = governor.authorize(StepId::from_string("a"), "cleanup", "rm -rf /tmp/x").unwrap_err();
    assert!(matches!(err, EngineError::MissingApprovalCallback { .. }));
}

#[test]
fn execute_mode_destructive_with_approving_callback_executes() {
    let called = Arc::new(AtomicBool::new(false));
    let called2 = called.clone();
    let governor = SafeModeGovernor::new(
        SafeMode::Execute,
        Some(Arc::new(move |_cmd: &str| {
            called2.store(true, Ordering::SeqCst);
            true
        })),
    );
    let decision = governor.authorize(StepId::from_string("a"), "cleanup", "rm -rf /tmp/x").unwrap();
    assert_eq!(decision, Authorization::Execute);
    assert!(called.load(Ordering::SeqCst));
}

#[test]
fn execute_mode_destructive_with_denying_callback_is_denied() {
    let governor = SafeModeGovernor::new(SafeMode::Execute, Some(Arc::new(|_cmd: &str| false)));
    let decision = governor.authorize(StepId::from_string("a"), "cleanup", "rm -rf /tmp/x").unwrap();
    assert_eq!(decision, Authorization::Denied);
}

#[test]
fn preview_summary_counts_destructive_actions() {
    let governor = SafeModeGovernor::new(SafeMode::Preview, None);
    governor.authorize(StepId::from_string("a"), "build", "echo hi").unwrap();
    governor.authorize(StepId::from_string("b"), "wipe", "rm -rf /tmp/x").unwrap();
    let summary = governor.preview_summary();
    assert!(summary.contains("[DESTRUCTIVE]"));
    assert!(summary.contains("2 action(s) previewed, 1 destructive"));
}
