// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn paths_are_nested_under_root() {
    let workdir = Workdir::new("/var/tmp/tmt/run-001");
    assert_eq!(workdir.run_yaml(), PathBuf::from("/var/tmp/tmt/run-001/run.yaml"));
    assert_eq!(workdir.plan_yaml("smoke"), PathBuf::from("/var/tmp/tmt/run-001/smoke/plan.yaml"));
    assert_eq!(workdir.results_yaml("smoke"), PathBuf::from("/var/tmp/tmt/run-001/smoke/results.yaml"));
}

#[test]
fn test_data_dir_strips_leading_slash_from_test_id() {
    let workdir = Workdir::new("/var/tmp/tmt/run-001");
    let dir = workdir.test_data_dir("smoke", "/tests/sanity", 1);
    assert_eq!(dir, PathBuf::from("/var/tmp/tmt/run-001/smoke/execute/data/tests/sanity/1"));
}
