// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn run_replays_scripted_outputs_in_order() {
    let adapter = FakeGuestAdapter::default();
    adapter.push_output(CommandOutput {
        exit_code: Some(1),
        stdout: b"first".to_vec(),
        stderr: Vec::new(),
        timed_out: false,
    });
    let output = adapter.run("default", "./runtest.sh", &ExecOptions::default()).await.unwrap();
    assert_eq!(output.exit_code, Some(1));
    assert_eq!(output.stdout, b"first");
}

#[tokio::test]
async fn run_without_scripted_output_defaults_to_pass() {
    let adapter = FakeGuestAdapter::default();
    let output = adapter.run("default", "true", &ExecOptions::default()).await.unwrap();
    assert_eq!(output.exit_code, Some(0));
}

#[tokio::test]
async fn reboot_fails_unless_capability_is_set() {
    let adapter = FakeGuestAdapter::default();
    assert!(adapter.reboot("default", &ExecOptions::default()).await.is_err());

    let rebootable = FakeGuestAdapter::new(GuestCapabilities {
        can_reboot: true,
        can_push_workdir: true,
    });
    assert!(rebootable.reboot("default", &ExecOptions::default()).await.is_ok());
}

#[tokio::test]
async fn calls_are_recorded_in_order() {
    let adapter = FakeGuestAdapter::default();
    adapter.run("default", "echo 1", &ExecOptions::default()).await.unwrap();
    adapter.run("default", "echo 2", &ExecOptions::default()).await.unwrap();
    assert_eq!(adapter.calls(), vec!["default: echo 1", "default: echo 2"]);
}
