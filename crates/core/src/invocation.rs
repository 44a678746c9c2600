// SPDX-License-Identifier: MIT

//! A single test invocation: the unit the Test Invoker runs (spec §4.5).

use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

crate::define_id! {
    pub struct TestInvocationId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Shell,
    Beakerlib,
}

/// How a test's raw outcome and check outcomes are interpreted into its
/// final [`Outcome`] (spec §4.5: the `result` test attribute; §4.5 step
/// 9: interpretation is applied to the raw, exit-code-based outcome, not
/// the exit code directly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultPolicy {
    /// Pass the raw outcome through unchanged (the default).
    Respect,
    /// Invert: a `pass` is reported as `fail` and vice versa.
    Xfail,
    /// Always report `info`, regardless of the raw outcome.
    Info,
    /// The raw exit code carries no verdict; the test's own
    /// `tmt-report-result` calls determine the outcome entirely.
    Custom,
    /// Each `tmt-report-result` call becomes its own independent Result
    /// rather than a subresult nested under this invocation (spec
    /// §4.5.7); handled by the invoker, not by `interpret`.
    Restraint,
}

impl Default for ResultPolicy {
    fn default() -> Self {
        ResultPolicy::Respect
    }
}

impl ResultPolicy {
    pub fn interpret(self, raw: Outcome) -> Outcome {
        match self {
            ResultPolicy::Respect | ResultPolicy::Restraint => raw,
            ResultPolicy::Xfail => match raw {
                Outcome::Pass => Outcome::Fail,
                o if o.is_failure() => Outcome::Pass,
                other => other,
            },
            ResultPolicy::Info => Outcome::Info,
            ResultPolicy::Custom => Outcome::Pass,
        }
    }
}

/// Governs the invoker's restart loop (spec §4.5: a test may ask to be
/// restarted when the guest reboots or the process dies unexpectedly).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartPolicy {
    pub max_restarts: u32,
    pub on_exit_codes: Vec<i32>,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self {
            max_restarts: 0,
            on_exit_codes: Vec::new(),
        }
    }
}

impl RestartPolicy {
    pub fn allows_restart(&self, exit_code: i32, attempts_so_far: u32) -> bool {
        attempts_so_far < self.max_restarts && self.on_exit_codes.contains(&exit_code)
    }
}

/// The invoker assigns each running/rebooted attempt of a test a serial
/// number, used for its per-attempt log directory (spec §4.2: `data/<N>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SerialNumber(pub u32);

impl SerialNumber {
    pub const FIRST: SerialNumber = SerialNumber(1);

    pub fn next(self) -> SerialNumber {
        SerialNumber(self.0 + 1)
    }
}

impl std::fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestInvocation {
    pub id: TestInvocationId,
    pub name: String,
    pub command: String,
    pub framework: Framework,
    pub environment: HashMap<String, String>,
    #[serde(with = "crate::duration::serde_secs")]
    pub duration: Duration,
    pub result_policy: ResultPolicy,
    pub restart_policy: RestartPolicy,
    pub serial_number: SerialNumber,
    pub guest: String,
}

impl TestInvocation {
    pub fn new(id: TestInvocationId, name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            command: command.into(),
            framework: Framework::Shell,
            environment: HashMap::new(),
            duration: Duration::from_secs(300),
            result_policy: ResultPolicy::default(),
            restart_policy: RestartPolicy::default(),
            serial_number: SerialNumber::FIRST,
            guest: "default".into(),
        }
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
