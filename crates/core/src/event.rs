// SPDX-License-Identifier: MIT

//! Events: things that have happened, fed back into the engine's state
//! after an [`crate::effect::Effect`] is executed. Grounded on the
//! emit-then-apply pattern used throughout the engine's effect executor.

use crate::invocation::{SerialNumber, TestInvocationId};
use crate::outcome::Outcome;
use crate::plan::PlanId;
use crate::result::TestResult;
use crate::run::RunId;
use crate::step::{StepKind, StepState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    StepStarted {
        plan_id: PlanId,
        step: StepKind,
    },
    StepCompleted {
        plan_id: PlanId,
        step: StepKind,
        state: StepState,
    },
    PhaseStarted {
        plan_id: PlanId,
        step: StepKind,
        phase_id: String,
    },
    PhaseCompleted {
        plan_id: PlanId,
        step: StepKind,
        phase_id: String,
        outcome: Option<Outcome>,
    },
    PhaseFailed {
        plan_id: PlanId,
        step: StepKind,
        phase_id: String,
        message: String,
    },
    TestStarted {
        plan_id: PlanId,
        invocation_id: TestInvocationId,
        serial_number: SerialNumber,
    },
    TestFinished {
        plan_id: PlanId,
        invocation_id: TestInvocationId,
        result: TestResult,
    },
    GuestRebootRequested {
        plan_id: PlanId,
        guest: String,
    },
    GuestRebootCompleted {
        plan_id: PlanId,
        guest: String,
    },
    RunCompleted {
        run_id: RunId,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::StepStarted { .. } => "step_started",
            Event::StepCompleted { .. } => "step_completed",
            Event::PhaseStarted { .. } => "phase_started",
            Event::PhaseCompleted { .. } => "phase_completed",
            Event::PhaseFailed { .. } => "phase_failed",
            Event::TestStarted { .. } => "test_started",
            Event::TestFinished { .. } => "test_finished",
            Event::GuestRebootRequested { .. } => "guest_reboot_requested",
            Event::GuestRebootCompleted { .. } => "guest_reboot_completed",
            Event::RunCompleted { .. } => "run_completed",
        }
    }

    /// Structured fields for this event, used to populate a tracing span
    /// without a bespoke `match` at every call site.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Event::StepStarted { plan_id, step } => {
                vec![("plan_id", plan_id.to_string()), ("step", step.to_string())]
            }
            Event::StepCompleted { plan_id, step, state } => vec![
                ("plan_id", plan_id.to_string()),
                ("step", step.to_string()),
                ("state", format!("{state:?}")),
            ],
            Event::PhaseStarted { plan_id, step, phase_id } => vec![
                ("plan_id", plan_id.to_string()),
                ("step", step.to_string()),
                ("phase_id", phase_id.clone()),
            ],
            Event::PhaseCompleted { plan_id, step, phase_id, outcome } => vec![
                ("plan_id", plan_id.to_string()),
                ("step", step.to_string()),
                ("phase_id", phase_id.clone()),
                ("outcome", outcome.map(|o| o.to_string()).unwrap_or_default()),
            ],
            Event::PhaseFailed { plan_id, step, phase_id, message } => vec![
                ("plan_id", plan_id.to_string()),
                ("step", step.to_string()),
                ("phase_id", phase_id.clone()),
                ("message", message.clone()),
            ],
            Event::TestStarted { plan_id, invocation_id, serial_number } => vec![
                ("plan_id", plan_id.to_string()),
                ("invocation_id", invocation_id.to_string()),
                ("serial_number", serial_number.to_string()),
            ],
            Event::TestFinished { plan_id, invocation_id, result } => vec![
                ("plan_id", plan_id.to_string()),
                ("invocation_id", invocation_id.to_string()),
                ("outcome", result.outcome.to_string()),
            ],
            Event::GuestRebootRequested { plan_id, guest } | Event::GuestRebootCompleted { plan_id, guest } => {
                vec![("plan_id", plan_id.to_string()), ("guest", guest.clone())]
            }
            Event::RunCompleted { run_id } => vec![("run_id", run_id.to_string())],
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
