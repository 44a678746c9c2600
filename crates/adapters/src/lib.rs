// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tmt-adapters: the Guest capability and Report sink contracts (spec
//! §6), plus the concrete implementations this engine ships with —
//! a `local` guest, a JSON-lines report sink, and (behind
//! `test-support`) fakes of both for engine tests.

pub mod error;
pub mod guest;
pub mod local;
pub mod noop;
pub mod report;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::GuestError;
pub use guest::GuestAdapter;
pub use local::LocalGuestAdapter;
pub use noop::NoopGuestAdapter;
pub use report::{JsonlReportSink, NoopReportSink, ReportSink};

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeGuestAdapter;
