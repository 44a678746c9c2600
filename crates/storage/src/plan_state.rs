// SPDX-License-Identifier: MIT

//! Persistence for a single plan's `plan.yaml` artifact.

use crate::atomic;
use crate::error::StorageError;
use crate::workdir::Workdir;
use tmt_core::plan::Plan;

pub fn load_plan(workdir: &Workdir, plan_slug: &str) -> Result<Option<Plan>, StorageError> {
    atomic::read_yaml(&workdir.plan_yaml(plan_slug))
}

pub fn save_plan(workdir: &Workdir, plan_slug: &str, plan: &Plan) -> Result<(), StorageError> {
    atomic::write_yaml(&workdir.plan_yaml(plan_slug), plan)
}

#[cfg(test)]
#[path = "plan_state_tests.rs"]
mod tests;
