// SPDX-License-Identifier: MIT

use super::*;

fn yaml(text: &str) -> serde_yaml::Value {
    serde_yaml::from_str(text).unwrap()
}

#[test]
fn rule_not_matching_context_leaves_base_unchanged() {
    let base = yaml("environment:\n  FOO: bar\n");
    let rule = AdjustRule {
        when: vec!["arch == aarch64".to_string()],
        patch: yaml("environment:\n  FOO: baz\n"),
    };
    let context = Context::new().with("arch", "x86_64");
    let result = apply(base.clone(), &[rule], &context).unwrap();
    assert_eq!(result, base);
}

#[test]
fn matching_rule_overrides_scalar_fields() {
    let base = yaml("environment:\n  FOO: bar\n");
    let rule = AdjustRule {
        when: vec!["arch == x86_64".to_string()],
        patch: yaml("environment:\n  FOO: baz\n"),
    };
    let context = Context::new().with("arch", "x86_64");
    let result = apply(base, &[rule], &context).unwrap();
    assert_eq!(result["environment"]["FOO"], yaml("baz"));
}

#[test]
fn plus_suffixed_key_extends_an_existing_sequence() {
    let base = yaml("require:\n  - curl\n");
    let rule = AdjustRule {
        when: vec![],
        patch: yaml("require+:\n  - wget\n"),
    };
    let result = apply(base, &[rule], &Context::new()).unwrap();
    assert_eq!(result["require"], yaml("[curl, wget]"));
}

#[test]
fn empty_when_always_applies() {
    let base = yaml("environment:\n  FOO: bar\n");
    let rule = AdjustRule {
        when: vec![],
        patch: yaml("environment:\n  FOO: always\n"),
    };
    let result = apply(base, &[rule], &Context::new()).unwrap();
    assert_eq!(result["environment"]["FOO"], yaml("always"));
}

#[test]
fn invalid_when_rule_is_an_error() {
    let base = yaml("environment: {}\n");
    let rule = AdjustRule {
        when: vec!["arch ==".to_string()],
        patch: yaml("environment: {}\n"),
    };
    assert!(apply(base, &[rule], &Context::new()).is_err());
}
