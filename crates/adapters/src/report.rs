// SPDX-License-Identifier: MIT

//! The Report sink contract (spec §6): the Report step hands each
//! finished [`TestResult`] to a sink without knowing or caring which
//! back-end — a JSON-lines file, a no-op, or (outside this crate's
//! scope) something that talks to an external reporting service.

pub mod jsonl;
pub mod noop;

use crate::error::GuestError;
use async_trait::async_trait;
use tmt_core::result::TestResult;

#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn report(&self, result: &TestResult) -> Result<(), GuestError>;
}

pub use jsonl::JsonlReportSink;
pub use noop::NoopReportSink;
