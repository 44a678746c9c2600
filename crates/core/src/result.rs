// SPDX-License-Identifier: MIT

//! Results: the outcome of a single test invocation, its subresults, and
//! its pre/post checks (spec §3, §4.5).

use crate::guest::GuestRole;
use crate::invocation::SerialNumber;
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckEvent {
    Before,
    After,
}

/// How a check's outcome feeds into the test's overall outcome (spec §7:
/// policies `xfail`/`info`/`custom` transform it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckPolicy {
    /// The check's outcome is folded into the test's outcome by the
    /// normal severity reduction (spec §3 priority order).
    Respect,
    /// Invert: a failing check reports as `pass`, a passing one as
    /// `fail`, mirroring the test-level `xfail` result policy.
    Xfail,
    /// The check is recorded for visibility but never changes the test's
    /// outcome.
    Info,
    /// The check's outcome is recorded but never contributes to the
    /// parent test's reduction, deferred entirely to whatever produced
    /// it.
    Custom,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        CheckPolicy::Respect
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub event: CheckEvent,
    pub outcome: Outcome,
    pub policy: CheckPolicy,
    pub note: Option<String>,
}

impl Check {
    /// The outcome this check contributes to the test's overall outcome,
    /// per its policy. `Info`-policy checks never fail a test outright
    /// but the raw outcome is still folded in at `Info` severity so it
    /// is visible without being able to raise the overall outcome.
    pub fn effective_outcome(&self) -> Outcome {
        match self.policy {
            CheckPolicy::Respect => self.outcome,
            CheckPolicy::Xfail => match self.outcome {
                Outcome::Pass => Outcome::Fail,
                o if o.is_failure() => Outcome::Pass,
                other => other,
            },
            CheckPolicy::Info => self.outcome.min(Outcome::Info),
            CheckPolicy::Custom => Outcome::Skip,
        }
    }
}

/// One named sub-check within a test invocation (e.g. a beakerlib phase),
/// folded into the test's overall outcome by severity reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subresult {
    pub name: String,
    pub outcome: Outcome,
    pub note: Option<String>,
}

/// One Result per (invocation, guest) pair (spec §3), except under
/// `result: restraint`, where each `tmt-report-result` call produces its
/// own independent `TestResult` instead of a nested [`Subresult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_id: String,
    pub serial_number: SerialNumber,
    pub guest: String,
    pub guest_role: GuestRole,
    pub outcome: Outcome,
    /// The pre-interpretation outcome: `pass`/`fail` straight from the
    /// exit code, before `result_policy` or check policies are applied
    /// (spec §3, §4.5 step 9, §8 invariant 1).
    pub original_outcome: Outcome,
    pub subresults: Vec<Subresult>,
    pub checks: Vec<Check>,
    pub note: Vec<String>,
    pub duration_ms: u64,
    pub start_time_ms: u64,
    pub end_time_ms: u64,
    /// Snapshot of the plan's context at invocation time (spec §3).
    pub context: HashMap<String, String>,
    /// The per-attempt data directory this invocation ran with (spec
    /// §4.2: `data/<N>`).
    pub data_path: String,
    /// Stable identifiers correlating this Result across reporting
    /// backends and reruns (spec §3: `ids`).
    pub ids: Vec<String>,
    pub log: Vec<String>,
}

impl TestResult {
    /// Recomputes `outcome` from the test body's own outcome plus its
    /// subresults and checks, all folded by severity.
    pub fn reduce(body: Outcome, subresults: &[Subresult], checks: &[Check]) -> Outcome {
        let from_subresults = subresults.iter().map(|s| s.outcome);
        let from_checks = checks.iter().map(Check::effective_outcome);
        Outcome::reduce(std::iter::once(body).chain(from_subresults).chain(from_checks))
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
