// SPDX-License-Identifier: MIT

use crate::error::GuestError;
use crate::report::ReportSink;
use async_trait::async_trait;
use tmt_core::result::TestResult;

/// Discards every result. Used when a run only needs the on-disk
/// `results.yaml` (always written by `tmt-storage`) and no external sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReportSink;

#[async_trait]
impl ReportSink for NoopReportSink {
    async fn report(&self, _result: &TestResult) -> Result<(), GuestError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
