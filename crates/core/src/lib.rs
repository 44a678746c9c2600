// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tmt-core: data model for the test-orchestration engine.
//!
//! This crate is the pure, synchronous core: plans, phases, guests, test
//! invocations, results, and the context/adjust rule language. It knows
//! nothing about subprocesses, the filesystem, or the network — those
//! live in `tmt-shell`, `tmt-adapters`, and `tmt-storage`. The engine
//! (`tmt-engine`) ties this model to effectful execution.

pub mod clock;
pub mod context;
pub mod duration;
pub mod effect;
pub mod event;
pub mod guest;
pub mod id;
pub mod invocation;
pub mod outcome;
pub mod phase;
pub mod plan;
pub mod result;
pub mod run;
pub mod step;
pub mod topology;

pub use clock::{Clock, FakeClock, SystemClock};
pub use context::{Context, Rule, RuleError};
pub use duration::{format_duration, parse_duration, DurationError};
pub use effect::Effect;
pub use event::Event;
pub use guest::{Guest, GuestCapabilities, GuestId, GuestName, GuestRole};
pub use id::{IdGen, SequentialIdGen, ShortId, UuidIdGen};
pub use invocation::{
    Framework, ResultPolicy, RestartPolicy, SerialNumber, TestInvocation, TestInvocationId,
};
pub use outcome::Outcome;
pub use phase::{Phase, PhaseOrder, Where};
pub use plan::{Plan, PlanId, StepConfig};
pub use result::{Check, CheckEvent, CheckPolicy, Subresult, TestResult};
pub use run::{Run, RunId, RunStatus};
pub use step::{StepKind, StepState, STEP_ORDER};
