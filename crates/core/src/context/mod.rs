// SPDX-License-Identifier: MIT

//! Context & Adjust rule language (spec §4.1, §9 Design Notes).
//!
//! A [`Context`] is the map of keys (`distro`, `arch`, `trigger`, …) the
//! run is evaluated against. A [`Rule`] is parsed from a string like
//! `distro == fedora-33` or `arch == x86_64 && trigger != commit` through a
//! small lexer → AST → evaluator pipeline rather than ad-hoc string
//! splitting, so that malformed rules produce a precise parse error instead
//! of silently never matching.

mod ast;
mod eval;
mod lexer;
mod parser;

pub use ast::Rule;
pub use eval::RuleError;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The well-known context keys named in spec §4.1. Callers may also store
/// arbitrary additional keys; lookups are always case-insensitive on the
/// value, matched exactly on the key.
pub const CONTEXT_KEYS: &[&str] = &[
    "distro",
    "arch",
    "trigger",
    "initiator",
    "deployment-mode",
    "variant",
    "component",
    "collection",
    "module",
];

/// A context map: keys are compared case-sensitively, values
/// case-insensitively (spec §4.1: "values case-insensitive").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    values: HashMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// A snapshot of the full context map, recorded onto each Result
    /// (spec §3: `context`).
    pub fn as_map(&self) -> HashMap<String, String> {
        self.values.clone()
    }
}

impl Rule {
    /// Parse a rule expression. A list of rule strings (spec: "a list of
    /// rules is satisfied if *any* rule matches") is evaluated with
    /// [`any_matches`].
    pub fn parse(input: &str) -> Result<Rule, RuleError> {
        parser::parse(input)
    }

    pub fn eval(&self, context: &Context) -> Result<bool, RuleError> {
        eval::eval(self, context)
    }
}

/// `when` semantics (spec §4.1/§4.3): a phase is active if `when` is empty,
/// or any of its rule strings parses and matches.
pub fn any_matches(rules: &[String], context: &Context) -> Result<bool, RuleError> {
    if rules.is_empty() {
        return Ok(true);
    }
    for raw in rules {
        let rule = Rule::parse(raw)?;
        if rule.eval(context)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
