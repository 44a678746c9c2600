// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn new_run_starts_in_running_status() {
    let run = Run::new(RunId::new("r1"), "/var/tmp/tmt/run-001", 0);
    assert_eq!(run.status, RunStatus::Running);
    assert!(!run.is_terminal());
}

#[test]
fn done_and_error_are_terminal() {
    let mut run = Run::new(RunId::new("r1"), "/var/tmp/tmt/run-001", 0);
    run.status = RunStatus::Done;
    assert!(run.is_terminal());
    run.status = RunStatus::Error;
    assert!(run.is_terminal());
}
