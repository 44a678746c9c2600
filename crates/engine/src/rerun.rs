// SPDX-License-Identifier: MIT

//! Rerun test selection and result merging (spec §4.6): `--again` and
//! `--failed-only` both replay a subset of a plan's discovered tests
//! against its existing workdir, then fold the new partial results back
//! into `results.yaml` by `(test-serial, guest)` instead of starting
//! over.

use std::collections::HashSet;
use tmt_core::invocation::TestInvocation;
use tmt_core::plan::Plan;
use tmt_core::result::TestResult;
use tmt_storage::ResultStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RerunMode {
    /// `--again` alone: re-execute every test the current filter selects.
    All,
    /// `--again --failed-only`: restrict to tests whose prior Result is
    /// `fail` or `error` (spec §4.6).
    FailedOnly,
}

/// Narrows `plan`'s discovered tests to the ones a rerun in `mode` should
/// actually invoke, using `result_store`'s prior results as the filter
/// for [`RerunMode::FailedOnly`].
pub fn plan_rerun_tests(plan: &Plan, result_store: &ResultStore, mode: RerunMode) -> Vec<TestInvocation> {
    match mode {
        RerunMode::All => plan.tests.clone(),
        RerunMode::FailedOnly => {
            let failed: HashSet<String> = result_store.failed_test_ids().into_iter().collect();
            plan.tests.iter().filter(|test| failed.contains(&test.name)).cloned().collect()
        }
    }
}

/// Folds a rerun's partial results into the plan's existing
/// `results.yaml`, keyed by test id: every test the rerun covers
/// replaces its prior entry, and every other prior entry is preserved
/// verbatim (spec §4.6).
pub fn merge_rerun_results(previous: &[TestResult], rerun: &[TestResult]) -> Vec<TestResult> {
    tmt_storage::merge_results(previous, rerun)
}

#[cfg(test)]
#[path = "rerun_tests.rs"]
mod tests;
