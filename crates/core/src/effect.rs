// SPDX-License-Identifier: MIT

//! Effects: the only way the pure engine core asks the outside world to
//! do something. An [`crate::effect::Effect`] is produced by the step
//! engine, carried out by the executor, and turns into zero or one
//! [`crate::event::Event`] fed back in. Mirrors the
//! emit-effects-not-side-effects pattern the rest of the engine follows.

use crate::invocation::TestInvocationId;
use crate::plan::PlanId;
use crate::result::TestResult;
use crate::step::StepKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Emit {
        event: crate::event::Event,
    },
    RunPhase {
        plan_id: PlanId,
        step: StepKind,
        phase_id: String,
    },
    RunTest {
        plan_id: PlanId,
        invocation_id: TestInvocationId,
    },
    RebootGuest {
        plan_id: PlanId,
        guest: String,
        #[serde(with = "crate::duration::serde_secs")]
        reconnect_timeout: Duration,
    },
    PersistResult {
        plan_id: PlanId,
        result: TestResult,
    },
    WriteReport {
        plan_id: PlanId,
    },
    SetTimer {
        id: String,
        #[serde(with = "crate::duration::serde_secs")]
        duration: Duration,
    },
    CancelTimer {
        id: String,
    },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Emit { .. } => "emit",
            Effect::RunPhase { .. } => "run_phase",
            Effect::RunTest { .. } => "run_test",
            Effect::RebootGuest { .. } => "reboot_guest",
            Effect::PersistResult { .. } => "persist_result",
            Effect::WriteReport { .. } => "write_report",
            Effect::SetTimer { .. } => "set_timer",
            Effect::CancelTimer { .. } => "cancel_timer",
        }
    }

    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Emit { event } => vec![("event", event.name().to_string())],
            Effect::RunPhase { plan_id, step, phase_id } => vec![
                ("plan_id", plan_id.to_string()),
                ("step", step.to_string()),
                ("phase_id", phase_id.clone()),
            ],
            Effect::RunTest { plan_id, invocation_id } => vec![
                ("plan_id", plan_id.to_string()),
                ("invocation_id", invocation_id.to_string()),
            ],
            Effect::RebootGuest { plan_id, guest, reconnect_timeout } => vec![
                ("plan_id", plan_id.to_string()),
                ("guest", guest.clone()),
                ("reconnect_timeout_s", reconnect_timeout.as_secs().to_string()),
            ],
            Effect::PersistResult { plan_id, result } => vec![
                ("plan_id", plan_id.to_string()),
                ("test_id", result.test_id.clone()),
            ],
            Effect::WriteReport { plan_id } => vec![("plan_id", plan_id.to_string())],
            Effect::SetTimer { id, duration } => {
                vec![("id", id.clone()), ("duration_s", duration.as_secs().to_string())]
            }
            Effect::CancelTimer { id } => vec![("id", id.clone())],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
