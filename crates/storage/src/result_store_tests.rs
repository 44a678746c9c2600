// SPDX-License-Identifier: MIT

use super::*;
use tmt_core::guest::GuestRole;
use tmt_core::invocation::SerialNumber;
use tmt_core::outcome::Outcome;

fn result(test_id: &str, serial: u32, outcome: Outcome) -> TestResult {
    result_with_serial(test_id, SerialNumber(serial), outcome)
}

fn result_with_serial(test_id: &str, serial_number: SerialNumber, outcome: Outcome) -> TestResult {
    TestResult {
        test_id: test_id.to_string(),
        serial_number,
        guest: "default".to_string(),
        guest_role: GuestRole::default(),
        outcome,
        original_outcome: outcome,
        subresults: Vec::new(),
        checks: Vec::new(),
        note: Vec::new(),
        duration_ms: 0,
        start_time_ms: 0,
        end_time_ms: 0,
        context: std::collections::HashMap::new(),
        data_path: String::new(),
        ids: Vec::new(),
        log: Vec::new(),
    }
}

#[test]
fn open_on_empty_workdir_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let store = ResultStore::open(&workdir, "smoke").unwrap();
    assert!(store.results().is_empty());
}

#[test]
fn record_appends_and_flushes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let store = ResultStore::open(&workdir, "smoke").unwrap();

    store.record(result("/test/a", 1, Outcome::Pass)).unwrap();
    store.record(result("/test/b", 2, Outcome::Fail)).unwrap();

    assert_eq!(store.results().len(), 2);
    assert!(workdir.results_yaml("smoke").exists());

    let reopened = ResultStore::open(&workdir, "smoke").unwrap();
    assert_eq!(reopened.results().len(), 2);
}

#[test]
fn recording_the_same_serial_and_guest_again_replaces_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let store = ResultStore::open(&workdir, "smoke").unwrap();

    store.record(result("/test/a", 1, Outcome::Fail)).unwrap();
    store.record(result("/test/a", 1, Outcome::Pass)).unwrap();

    assert_eq!(store.results().len(), 1);
    assert_eq!(store.results()[0].outcome, Outcome::Pass);
}

#[test]
fn failed_test_ids_reports_first_seen_order_without_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = Workdir::new(dir.path());
    let store = ResultStore::open(&workdir, "smoke").unwrap();

    store.record(result("/test/a", 1, Outcome::Pass)).unwrap();
    store.record(result("/test/b", 2, Outcome::Fail)).unwrap();
    store.record(result("/test/c", 3, Outcome::Error)).unwrap();
    store.record(result("/test/b", 2, Outcome::Fail)).unwrap();

    assert_eq!(
        store.failed_test_ids(),
        vec!["/test/b".to_string(), "/test/c".to_string()]
    );
}
