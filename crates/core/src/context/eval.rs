// SPDX-License-Identifier: MIT

//! Rule evaluation: operator semantics against a [`super::Context`].

use super::ast::{Predicate, Rule, SingleRule};
use super::lexer::{LexError, Op};
use super::Context;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("invalid regular expression {0:?}: {1}")]
    InvalidRegex(String, String),
}

pub fn eval(rule: &Rule, context: &Context) -> Result<bool, RuleError> {
    match rule {
        Rule::Single(single) => eval_single(single, context),
        Rule::And(lhs, rhs) => Ok(eval(lhs, context)? && eval(rhs, context)?),
        Rule::Or(lhs, rhs) => Ok(eval(lhs, context)? || eval(rhs, context)?),
    }
}

fn eval_single(single: &SingleRule, context: &Context) -> Result<bool, RuleError> {
    match &single.predicate {
        Predicate::IsDefined => Ok(context.is_defined(&single.key)),
        Predicate::IsNotDefined => Ok(!context.is_defined(&single.key)),
        Predicate::Compare(op, value) => {
            let actual = match context.get(&single.key) {
                Some(actual) => actual,
                // An undefined key never satisfies a comparison (it is
                // neither equal, less, nor matched by anything).
                None => return Ok(false),
            };
            compare(*op, actual, value)
        }
    }
}

fn compare(op: Op, actual: &str, expected: &str) -> Result<bool, RuleError> {
    match op {
        Op::Eq => Ok(actual.eq_ignore_ascii_case(expected)),
        Op::Ne => Ok(!actual.eq_ignore_ascii_case(expected)),
        Op::Lt => Ok(version_cmp(actual, expected) == std::cmp::Ordering::Less),
        Op::Le => Ok(version_cmp(actual, expected) != std::cmp::Ordering::Greater),
        Op::Gt => Ok(version_cmp(actual, expected) == std::cmp::Ordering::Greater),
        Op::Ge => Ok(version_cmp(actual, expected) != std::cmp::Ordering::Less),
        Op::Match => regex_match(actual, expected),
        Op::NotMatch => regex_match(actual, expected).map(|matched| !matched),
    }
}

fn regex_match(actual: &str, pattern: &str) -> Result<bool, RuleError> {
    let re = regex::Regex::new(pattern)
        .map_err(|err| RuleError::InvalidRegex(pattern.to_string(), err.to_string()))?;
    Ok(re.is_match(actual))
}

/// Compares values the way distro-like identifiers are compared in spec
/// §4.1 (`fedora-33 < fedora-34`): split off the trailing run of digits
/// after the last `-` and compare it numerically; fall back to a plain
/// case-insensitive string compare when either side has no such suffix.
fn version_cmp(lhs: &str, rhs: &str) -> std::cmp::Ordering {
    match (numeric_suffix(lhs), numeric_suffix(rhs)) {
        (Some((lhs_base, lhs_num)), Some((rhs_base, rhs_num)))
            if lhs_base.eq_ignore_ascii_case(rhs_base) =>
        {
            lhs_num.cmp(&rhs_num)
        }
        _ => lhs.to_ascii_lowercase().cmp(&rhs.to_ascii_lowercase()),
    }
}

fn numeric_suffix(value: &str) -> Option<(&str, u64)> {
    let idx = value.rfind('-')?;
    let (base, digits) = value.split_at(idx);
    let digits = &digits[1..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (base, n))
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod tests;
