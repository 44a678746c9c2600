// SPDX-License-Identifier: MIT

//! The top-level run: one invocation of the engine over one or more
//! plans, persisted as `run.yaml` at the workdir root (spec §3, §4.2).

use crate::plan::PlanId;
use serde::{Deserialize, Serialize};

crate::define_id! {
    pub struct RunId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub id: RunId,
    pub workdir: String,
    pub status: RunStatus,
    pub plans: Vec<PlanId>,
    pub created_at_ms: u64,
}

impl Run {
    pub fn new(id: RunId, workdir: impl Into<String>, created_at_ms: u64) -> Self {
        Self {
            id,
            workdir: workdir.into(),
            status: RunStatus::Running,
            plans: Vec::new(),
            created_at_ms,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, RunStatus::Done | RunStatus::Error)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
