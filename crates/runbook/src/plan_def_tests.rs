// SPDX-License-Identifier: MIT

use super::*;
use tmt_core::plan::PlanId;
use tmt_core::step::StepKind;

const SAMPLE: &str = r#"
provision:
  - name: default
prepare:
  - how: install
    package: [vim]
  - how: shell
    script: echo hello
execute:
  - how: tmt
finish:
  - how: shell
    script: echo bye
"#;

#[test]
fn materialize_carries_plan_level_environment_onto_the_plan() {
    let yaml = "environment:\n  FOO: bar\nexecute:\n  - how: tmt\n";
    let plan_def = PlanDef::from_yaml(yaml).unwrap();
    let plan = plan_def.materialize(PlanId::new("p1"), "/plans/smoke", Context::new()).unwrap();
    assert_eq!(plan.environment.get("FOO"), Some(&"bar".to_string()));
}

#[test]
fn materialize_builds_default_guest_when_provision_is_empty() {
    let plan_def = PlanDef::from_yaml("execute:\n  - how: tmt\n").unwrap();
    let plan = plan_def.materialize(PlanId::new("p1"), "/plans/smoke", Context::new()).unwrap();
    assert_eq!(plan.guests.len(), 1);
    assert_eq!(plan.guests[0].name, "default");
}

#[test]
fn materialize_produces_phases_in_source_order_with_ids() {
    let plan_def = PlanDef::from_yaml(SAMPLE).unwrap();
    let plan = plan_def.materialize(PlanId::new("p1"), "/plans/smoke", Context::new()).unwrap();
    let prepare = plan.phases_for(StepKind::Prepare);
    assert_eq!(prepare.len(), 2);
    assert_eq!(prepare[0].id, "prepare/install");
    assert_eq!(prepare[1].id, "prepare/shell");
}

#[test]
fn materialize_rejects_unknown_where_target() {
    let yaml = "prepare:\n  - how: shell\n    where: [nonexistent]\n";
    let plan_def = PlanDef::from_yaml(yaml).unwrap();
    let err = plan_def
        .materialize(PlanId::new("p1"), "/plans/smoke", Context::new())
        .unwrap_err();
    assert!(matches!(err, PlanError::UnknownWhereTarget(_, _)));
}

#[test]
fn materialize_rejects_invalid_when_rule() {
    let yaml = "prepare:\n  - how: shell\n    when: [\"arch ==\"]\n";
    let plan_def = PlanDef::from_yaml(yaml).unwrap();
    let err = plan_def
        .materialize(PlanId::new("p1"), "/plans/smoke", Context::new())
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidWhen(_, _)));
}

#[test]
fn materialize_expands_discover_tests_per_guest() {
    let yaml = r#"
provision:
  - name: server
  - name: client
discover:
  - how: shell
    where: [server]
    tests:
      - name: /setup
        command: echo setup
  - how: shell
    tests:
      - name: /run
        command: echo run
        where: [server, client]
"#;
    let plan_def = PlanDef::from_yaml(yaml).unwrap();
    let plan = plan_def.materialize(PlanId::new("p1"), "/plans/multi", Context::new()).unwrap();

    assert_eq!(plan.tests.len(), 3);
    assert_eq!(plan.tests_for_guest("server").count(), 2);
    assert_eq!(plan.tests_for_guest("client").count(), 1);
}

#[test]
fn materialize_assigns_distinct_increasing_serial_numbers() {
    let yaml = r#"
discover:
  - how: shell
    tests:
      - name: /t
        command: echo one
  - how: shell
    tests:
      - name: /t
        command: echo two
"#;
    let plan_def = PlanDef::from_yaml(yaml).unwrap();
    let plan = plan_def.materialize(PlanId::new("p1"), "/plans/dup", Context::new()).unwrap();

    assert_eq!(plan.tests.len(), 2);
    let serials: std::collections::HashSet<_> = plan.tests.iter().map(|t| t.serial_number).collect();
    assert_eq!(serials.len(), 2, "each discovered invocation must get a distinct serial number");
    assert!(plan.tests[1].serial_number > plan.tests[0].serial_number);
}

#[test]
fn materialize_rejects_unknown_test_target() {
    let yaml = "discover:\n  - how: shell\n    tests:\n      - name: /t\n        command: exit 0\n        where: [nonexistent]\n";
    let plan_def = PlanDef::from_yaml(yaml).unwrap();
    let err = plan_def
        .materialize(PlanId::new("p1"), "/plans/smoke", Context::new())
        .unwrap_err();
    assert!(matches!(err, PlanError::UnknownTestTarget(_, _)));
}

#[test]
fn from_yaml_with_context_applies_matching_adjust_rule() {
    let yaml = r#"
environment:
  FOO: bar
adjust:
  - when: ["arch == x86_64"]
    patch:
      environment:
        FOO: patched
"#;
    let context = Context::new().with("arch", "x86_64");
    let plan_def = PlanDef::from_yaml_with_context(yaml, &context).unwrap();
    assert_eq!(plan_def.environment.get("FOO"), Some(&"patched".to_string()));
}
