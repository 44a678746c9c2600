// SPDX-License-Identifier: MIT

//! Pipeline step transition effects (spec §4.3): phase selection within a
//! step, and the `Effect`/`Event` pairs that mark a step's boundaries.
//! Grounded on the teacher's step-transition effect builders — state
//! changes are emitted as typed events rather than mutated directly.

use tmt_core::context::any_matches;
use tmt_core::phase::Phase;
use tmt_core::plan::{Plan, PlanId};
use tmt_core::step::StepKind;
use tmt_core::{Effect, Event};

/// Phases of `step` that are active in `plan`'s context and sorted ready
/// for dispatch (spec §4.3: evaluate `when`, then sort by
/// `(order, source-order)`).
pub fn selected_phases(plan: &Plan, step: StepKind) -> Result<Vec<Phase>, tmt_core::context::RuleError> {
    plan.phases_for(step)
        .into_iter()
        .map(|phase| {
            let active = phase.enabled && any_matches(&phase.when, &plan.context)?;
            Ok((phase, active))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|phases| phases.into_iter().filter(|(_, active)| *active).map(|(phase, _)| phase).collect())
}

/// Resolves a phase's `where` selector into the concrete guest names it
/// targets, per spec §4.3 step 3. An empty selector means every guest in
/// the plan. Guests named by role use the role string as their name, the
/// same resolution `tmt-runbook` already validated at materialization.
pub fn resolve_guests<'a>(plan: &'a Plan, phase: &'a Phase) -> Vec<&'a str> {
    if phase.where_.matches_all_guests() {
        plan.guests.iter().map(|g| g.name.as_str()).collect()
    } else {
        phase.where_.names().iter().map(String::as_str).collect()
    }
}

pub fn step_start_effects(plan_id: &PlanId, step: StepKind) -> Vec<Effect> {
    vec![Effect::Emit {
        event: Event::StepStarted { plan_id: plan_id.clone(), step },
    }]
}

pub fn step_completed_effects(plan_id: &PlanId, step: StepKind, state: tmt_core::step::StepState) -> Vec<Effect> {
    vec![Effect::Emit {
        event: Event::StepCompleted { plan_id: plan_id.clone(), step, state },
    }]
}

pub fn phase_started_effects(plan_id: &PlanId, step: StepKind, phase_id: &str) -> Vec<Effect> {
    vec![Effect::Emit {
        event: Event::PhaseStarted {
            plan_id: plan_id.clone(),
            step,
            phase_id: phase_id.to_string(),
        },
    }]
}

pub fn phase_completed_effects(
    plan_id: &PlanId,
    step: StepKind,
    phase_id: &str,
    outcome: Option<tmt_core::outcome::Outcome>,
) -> Vec<Effect> {
    vec![Effect::Emit {
        event: Event::PhaseCompleted {
            plan_id: plan_id.clone(),
            step,
            phase_id: phase_id.to_string(),
            outcome,
        },
    }]
}

pub fn phase_failed_effects(plan_id: &PlanId, step: StepKind, phase_id: &str, message: impl Into<String>) -> Vec<Effect> {
    vec![Effect::Emit {
        event: Event::PhaseFailed {
            plan_id: plan_id.clone(),
            step,
            phase_id: phase_id.to_string(),
            message: message.into(),
        },
    }]
}

#[cfg(test)]
#[path = "step_engine_tests.rs"]
mod tests;
