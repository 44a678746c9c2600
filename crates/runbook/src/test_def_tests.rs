// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn deserializes_with_defaults() {
    let yaml = "name: /t\ncommand: exit 0\n";
    let test_def: TestDef = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(test_def.name, "/t");
    assert_eq!(test_def.duration, "5m");
    assert_eq!(test_def.framework, Framework::Shell);
    assert_eq!(test_def.result, ResultPolicy::Respect);
    assert!(test_def.where_.is_empty());
}

#[test]
fn deserializes_restart_policy_fields() {
    let yaml = "name: /r\ncommand: exit 79\nrestart-on-exit-code: [79]\nrestart-max-count: 1\n";
    let test_def: TestDef = serde_yaml::from_str(yaml).unwrap();
    let policy = test_def.restart_policy();
    assert_eq!(policy.max_restarts, 1);
    assert_eq!(policy.on_exit_codes, vec![79]);
}
