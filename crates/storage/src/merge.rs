// SPDX-License-Identifier: MIT

//! Merges a prior run's results with a rerun's results for `--again` and
//! `--failed-only` (spec §4.6): a rerun only re-executes a subset of
//! tests, and its results should replace the corresponding entries in
//! the prior snapshot while leaving every other test's result untouched.

use tmt_core::invocation::SerialNumber;
use tmt_core::result::TestResult;

type ResultKey<'a> = (SerialNumber, &'a str);

fn key(result: &TestResult) -> ResultKey<'_> {
    (result.serial_number, result.guest.as_str())
}

/// Merges `previous` and `rerun`, keyed by `(serial-number, guest)` (spec
/// §4.6, §5), keeping `previous`'s ordering and replacing any entry
/// `rerun` also covers. Entries present only in `rerun` are appended in
/// their `rerun` order.
pub fn merge_results(previous: &[TestResult], rerun: &[TestResult]) -> Vec<TestResult> {
    let mut by_key: std::collections::HashMap<ResultKey<'_>, &TestResult> = rerun.iter().map(|r| (key(r), r)).collect();

    let mut merged: Vec<TestResult> = Vec::with_capacity(previous.len().max(rerun.len()));
    for result in previous {
        match by_key.remove(&key(result)) {
            Some(replacement) => merged.push(replacement.clone()),
            None => merged.push(result.clone()),
        }
    }

    for result in rerun {
        if by_key.contains_key(&key(result)) {
            merged.push(result.clone());
            by_key.remove(&key(result));
        }
    }

    merged
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
