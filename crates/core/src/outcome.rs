// SPDX-License-Identifier: MIT

//! Test/check/subresult outcomes and their priority ordering (spec §3:
//! `skip < info < pass < warn < fail < error`), used to reduce a list of
//! subresults or checks into one overall result.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Skip,
    Info,
    Pass,
    Warn,
    Fail,
    Error,
}

impl Outcome {
    /// Reduces a set of outcomes to the single most severe one, per spec
    /// §3's priority order. Returns `Outcome::Skip` for an empty set.
    pub fn reduce(outcomes: impl IntoIterator<Item = Outcome>) -> Outcome {
        outcomes.into_iter().max().unwrap_or(Outcome::Skip)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::Fail | Outcome::Error)
    }

    /// The raw, policy-independent outcome of an exit code: `pass` for
    /// `0`, `fail` otherwise. A test's `result` policy is applied on top
    /// of this (spec §3: `original-result`, §4.5 step 9).
    pub fn from_exit_code(exit_code: i32) -> Outcome {
        if exit_code == 0 {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Skip => "skip",
            Outcome::Info => "info",
            Outcome::Pass => "pass",
            Outcome::Warn => "warn",
            Outcome::Fail => "fail",
            Outcome::Error => "error",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized outcome {0:?}")]
pub struct ParseOutcomeError(String);

impl std::str::FromStr for Outcome {
    type Err = ParseOutcomeError;

    /// Parses the outcome names a `tmt-report-result` call or a test's
    /// exit-code interpretation would produce, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Outcome::Skip),
            "info" => Ok(Outcome::Info),
            "pass" => Ok(Outcome::Pass),
            "warn" => Ok(Outcome::Warn),
            "fail" => Ok(Outcome::Fail),
            "error" => Ok(Outcome::Error),
            other => Err(ParseOutcomeError(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
