// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tmt-engine: the effectful driver that walks a materialized plan
//! through its fixed step order, dispatching each phase across its
//! guests and invoking tests through a pluggable [`GuestAdapter`].

mod dispatcher;
mod env;
mod error;
mod invoker;
mod progress;
mod rerun;
mod runtime;
mod step_engine;

pub use dispatcher::{dispatch_phase, GuestJob, GuestOutcome};
pub use error::RuntimeError;
pub use progress::{NoopProgressSink, ProgressSink, TracingProgressSink};
pub use rerun::{merge_rerun_results, plan_rerun_tests, RerunMode};
pub use runtime::{PlanRunSummary, Runtime, RuntimeConfig, RuntimeDeps};
