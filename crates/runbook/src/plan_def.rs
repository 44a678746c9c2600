// SPDX-License-Identifier: MIT

//! The flat, already-resolved shape of one plan's metadata (spec §3), as
//! handed to this crate by an external `fmf`-style loader. Mirrors the
//! step-sectioned layout real plan metadata uses: one list of phases per
//! step, plus `provision` and `adjust`.

use crate::adjust::{self, AdjustRule};
use crate::error::PlanError;
use crate::phase_def::PhaseDef;
use crate::provision_def::ProvisionDef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tmt_core::context::Rule;
use tmt_core::guest::{Guest, GuestId};
use tmt_core::invocation::TestInvocation;
use tmt_core::phase::Phase;
use tmt_core::plan::{Plan, PlanId};
use tmt_core::step::StepKind;
use tmt_core::Context;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlanDef {
    #[serde(default)]
    pub environment: HashMap<String, String>,
    #[serde(default)]
    pub provision: Vec<ProvisionDef>,
    #[serde(default)]
    pub discover: Vec<PhaseDef>,
    #[serde(default)]
    pub prepare: Vec<PhaseDef>,
    #[serde(default)]
    pub execute: Vec<PhaseDef>,
    #[serde(default)]
    pub report: Vec<PhaseDef>,
    #[serde(default)]
    pub finish: Vec<PhaseDef>,
    #[serde(default)]
    pub adjust: Vec<AdjustRule>,
}

impl PlanDef {
    /// Parses a `PlanDef` straight from resolved YAML, without applying
    /// `adjust` (use [`PlanDef::from_yaml_with_context`] for that).
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parses and applies `adjust` rules that match `context`, so the
    /// resulting `PlanDef` already reflects the active context.
    pub fn from_yaml_with_context(yaml: &str, context: &Context) -> Result<Self, PlanError> {
        let raw: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|err| PlanError::InvalidWhen("<root>".into(), err.to_string()))?;
        let adjust: Vec<AdjustRule> = raw
            .get("adjust")
            .cloned()
            .map(serde_yaml::from_value)
            .transpose()
            .map_err(|err: serde_yaml::Error| PlanError::InvalidAdjustWhen(err.to_string()))?
            .unwrap_or_default();
        let patched = adjust::apply(raw, &adjust, context)?;
        serde_yaml::from_value(patched).map_err(|err| PlanError::InvalidWhen("<root>".into(), err.to_string()))
    }

    fn phases_for_step(&self, step: StepKind) -> &[PhaseDef] {
        match step {
            StepKind::Discover => &self.discover,
            StepKind::Provision => &[],
            StepKind::Prepare => &self.prepare,
            StepKind::Execute => &self.execute,
            StepKind::Report => &self.report,
            StepKind::Finish => &self.finish,
        }
    }

    /// Validates and lowers this definition into an engine-ready [`Plan`].
    pub fn materialize(&self, id: PlanId, name: impl Into<String>, context: Context) -> Result<Plan, PlanError> {
        let provision = if self.provision.is_empty() {
            vec![ProvisionDef::default()]
        } else {
            self.provision.clone()
        };
        let guests: Vec<Guest> = provision
            .iter()
            .map(|def| {
                Guest::new(GuestId::new(def.name.clone()), def.name.clone()).with_role(def.role)
            })
            .collect();
        let guest_names: Vec<String> = guests.iter().map(|g| g.name.clone()).collect();

        let mut plan = Plan::new(id, name, context);
        plan.guests = guests;
        plan.environment = self.environment.clone();

        // Serial numbers are unique within the whole run, not per phase
        // (spec §3), so this counter spans every discover phase.
        let mut next_serial = tmt_core::invocation::SerialNumber::FIRST;

        for step in [
            StepKind::Discover,
            StepKind::Prepare,
            StepKind::Execute,
            StepKind::Report,
            StepKind::Finish,
        ] {
            let mut seen_ids = std::collections::HashSet::new();
            for (index, phase_def) in self.phases_for_step(step).iter().enumerate() {
                let phase_name = phase_def.display_name(index);
                let phase_id = format!("{step}/{phase_name}");
                if !seen_ids.insert(phase_id.clone()) {
                    return Err(PlanError::DuplicatePhaseId(phase_id, step.to_string()));
                }

                for target in &phase_def.where_ {
                    if !guest_names.iter().any(|n| n == target) {
                        return Err(PlanError::UnknownWhereTarget(phase_id.clone(), target.clone()));
                    }
                }

                for rule in &phase_def.when {
                    Rule::parse(rule).map_err(|err| PlanError::InvalidWhen(phase_id.clone(), err.to_string()))?;
                }

                let mut phase = Phase::new(phase_id, step, phase_def.how.clone(), index)
                    .with_where(phase_def.where_.clone())
                    .with_when(phase_def.when.clone())
                    .with_script(phase_def.script.clone())
                    .with_sequential(phase_def.sequential)
                    .with_enabled(phase_def.enabled);
                if let Some(order) = phase_def.order {
                    phase = phase.with_order(order);
                }
                phase.summary = phase_def.summary.clone();
                plan.phases.push(phase);

                if step == StepKind::Discover {
                    for test_def in &phase_def.tests {
                        let duration = tmt_core::duration::parse_duration(&test_def.duration, false).map_err(|err| {
                            PlanError::InvalidTestDuration(
                                test_def.name.clone(),
                                test_def.duration.clone(),
                                err.to_string(),
                            )
                        })?;

                        let targets: Vec<&str> = if !test_def.where_.is_empty() {
                            test_def.where_.iter().map(String::as_str).collect()
                        } else if !phase_def.where_.is_empty() {
                            phase_def.where_.iter().map(String::as_str).collect()
                        } else {
                            guest_names.iter().map(String::as_str).collect()
                        };

                        for guest in &targets {
                            if !guest_names.iter().any(|n| n == guest) {
                                return Err(PlanError::UnknownTestTarget(test_def.name.clone(), guest.to_string()));
                            }
                        }

                        for guest in targets {
                            let invocation_id =
                                tmt_core::invocation::TestInvocationId::new(format!("{}@{guest}", test_def.name));
                            let mut invocation = TestInvocation::new(invocation_id, test_def.name.clone(), test_def.command.clone());
                            invocation.framework = test_def.framework;
                            invocation.environment = test_def.environment.clone();
                            invocation.duration = duration;
                            invocation.result_policy = test_def.result;
                            invocation.restart_policy = test_def.restart_policy();
                            invocation.guest = guest.to_string();
                            invocation.serial_number = next_serial;
                            next_serial = next_serial.next();
                            plan.tests.push(invocation);
                        }
                    }
                }
            }
        }

        Ok(plan)
    }
}

#[cfg(test)]
#[path = "plan_def_tests.rs"]
mod tests;
