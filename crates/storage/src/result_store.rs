// SPDX-License-Identifier: MIT

//! A mutex-guarded accumulator for one plan's test results, flushing the
//! full `results.yaml` to disk after every recorded result so a crash
//! mid-run never loses more than the one result currently executing
//! (spec §4.2, §4.6).

use crate::atomic;
use crate::error::ResultStoreError;
use crate::workdir::Workdir;
use parking_lot::Mutex;
use tmt_core::result::TestResult;

pub struct ResultStore {
    path: std::path::PathBuf,
    results: Mutex<Vec<TestResult>>,
}

impl ResultStore {
    /// Opens the store for `plan_slug`, loading any results already on
    /// disk from a previous, interrupted run of the same plan.
    pub fn open(workdir: &Workdir, plan_slug: &str) -> Result<Self, ResultStoreError> {
        let path = workdir.results_yaml(plan_slug);
        let existing: Vec<TestResult> = atomic::read_yaml(&path)?.unwrap_or_default();
        Ok(Self {
            path,
            results: Mutex::new(existing),
        })
    }

    /// Records `result`, keyed by `(serial-number, guest)` (spec §5): a
    /// second result for the same key (a rerun, a restart) replaces the
    /// first in place rather than appending a duplicate, then flushes the
    /// complete result list to disk.
    pub fn record(&self, result: TestResult) -> Result<(), ResultStoreError> {
        let mut results = self.results.lock();
        match results
            .iter_mut()
            .find(|r| r.serial_number == result.serial_number && r.guest == result.guest)
        {
            Some(existing) => *existing = result,
            None => results.push(result),
        }
        atomic::write_yaml(&self.path, &*results)?;
        Ok(())
    }

    pub fn results(&self) -> Vec<TestResult> {
        self.results.lock().clone()
    }

    /// Test ids that have at least one non-passing result recorded,
    /// preserving first-seen order (used by `--failed-only` reruns).
    pub fn failed_test_ids(&self) -> Vec<String> {
        let results = self.results.lock();
        let mut seen = std::collections::HashSet::new();
        results
            .iter()
            .filter(|r| r.outcome.is_failure())
            .filter(|r| seen.insert(r.test_id.clone()))
            .map(|r| r.test_id.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "result_store_tests.rs"]
mod tests;
