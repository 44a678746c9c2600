// SPDX-License-Identifier: MIT

//! A materialized plan: the fully resolved set of guests and phases the
//! engine will run (spec §3, §4.3). Built by `tmt-runbook` from whatever
//! hierarchical metadata representation the caller supplies; this crate
//! only models the result.

use crate::context::Context;
use crate::guest::Guest;
use crate::invocation::TestInvocation;
use crate::phase::{sort_phases, Phase};
use crate::step::StepKind;
use serde::{Deserialize, Serialize};

crate::define_id! {
    pub struct PlanId;
}

/// Per-step run configuration, e.g. `tmt run --skip prepare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepConfig {
    pub enabled: bool,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub context: Context,
    /// Plan-level environment variables, layered beneath each test's own
    /// `environment` (spec §4.5 step 1).
    pub environment: std::collections::HashMap<String, String>,
    pub guests: Vec<Guest>,
    pub phases: Vec<Phase>,
    /// Test invocations produced by the discover step, already expanded
    /// per matched guest and assigned serial numbers (spec §4.5).
    pub tests: Vec<TestInvocation>,
    pub step_config: std::collections::HashMap<String, StepConfig>,
}

impl Plan {
    pub fn new(id: PlanId, name: impl Into<String>, context: Context) -> Self {
        Self {
            id,
            name: name.into(),
            context,
            environment: std::collections::HashMap::new(),
            guests: Vec::new(),
            phases: Vec::new(),
            tests: Vec::new(),
            step_config: std::collections::HashMap::new(),
        }
    }

    pub fn tests_for_guest<'a>(&'a self, guest: &'a str) -> impl Iterator<Item = &'a TestInvocation> {
        self.tests.iter().filter(move |t| t.guest == guest)
    }

    /// Phases belonging to `step`, sorted by `order`, source position,
    /// then id (spec §4.3).
    pub fn phases_for(&self, step: StepKind) -> Vec<Phase> {
        let mut phases: Vec<Phase> = self
            .phases
            .iter()
            .filter(|phase| phase.step == step)
            .cloned()
            .collect();
        sort_phases(&mut phases);
        phases
    }

    pub fn step_enabled(&self, step: StepKind) -> bool {
        self.step_config
            .get(step.as_str())
            .map(|config| config.enabled)
            .unwrap_or(true)
    }

    pub fn guest_by_name(&self, name: &str) -> Option<&Guest> {
        self.guests.iter().find(|guest| guest.name == name)
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
