// SPDX-License-Identifier: MIT

use super::*;
use crate::context::parser::parse;

fn ctx() -> Context {
    Context::new()
        .with("distro", "fedora-33")
        .with("arch", "x86_64")
        .with("trigger", "commit")
}

#[test]
fn equality_is_case_insensitive() {
    let rule = parse("arch == X86_64").unwrap();
    assert!(eval(&rule, &ctx()).unwrap());
}

#[test]
fn inequality() {
    let rule = parse("trigger != merge").unwrap();
    assert!(eval(&rule, &ctx()).unwrap());
}

#[test]
fn undefined_key_never_satisfies_comparison() {
    let rule = parse("collection == tier1").unwrap();
    assert!(!eval(&rule, &ctx()).unwrap());
}

#[test]
fn is_defined_and_is_not_defined() {
    assert!(eval(&parse("distro is defined").unwrap(), &ctx()).unwrap());
    assert!(!eval(&parse("distro is not defined").unwrap(), &ctx()).unwrap());
    assert!(eval(&parse("collection is not defined").unwrap(), &ctx()).unwrap());
}

#[test]
fn versioned_lexicographic_comparison() {
    let context = Context::new().with("distro", "fedora-33");
    assert!(eval(&parse("distro < fedora-34").unwrap(), &context).unwrap());
    assert!(!eval(&parse("distro < fedora-32").unwrap(), &context).unwrap());
    assert!(eval(&parse("distro <= fedora-33").unwrap(), &context).unwrap());
    assert!(eval(&parse("distro > fedora-32").unwrap(), &context).unwrap());
}

#[test]
fn regex_match_and_not_match() {
    let rule = parse("distro ~ ^fedora").unwrap();
    assert!(eval(&rule, &ctx()).unwrap());
    let rule = parse("distro !~ ^centos").unwrap();
    assert!(eval(&rule, &ctx()).unwrap());
}

#[test]
fn invalid_regex_is_an_error() {
    let rule = parse("distro ~ (").unwrap();
    assert!(matches!(eval(&rule, &ctx()), Err(RuleError::InvalidRegex(_, _))));
}

#[test]
fn and_or_short_circuit_correctly() {
    let rule = parse("arch == x86_64 && trigger == commit").unwrap();
    assert!(eval(&rule, &ctx()).unwrap());

    let rule = parse("arch == aarch64 || trigger == commit").unwrap();
    assert!(eval(&rule, &ctx()).unwrap());

    let rule = parse("arch == aarch64 && trigger == commit").unwrap();
    assert!(!eval(&rule, &ctx()).unwrap());
}
