// SPDX-License-Identifier: MIT

//! The fixed six-step pipeline a plan runs through (spec §3, §4.3).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Discover,
    Provision,
    Prepare,
    Execute,
    Report,
    Finish,
}

/// The steps run in this fixed order; it is not configurable (spec §3).
pub const STEP_ORDER: [StepKind; 6] = [
    StepKind::Discover,
    StepKind::Provision,
    StepKind::Prepare,
    StepKind::Execute,
    StepKind::Report,
    StepKind::Finish,
];

impl StepKind {
    pub fn next(self) -> Option<StepKind> {
        let idx = STEP_ORDER.iter().position(|&s| s == self)?;
        STEP_ORDER.get(idx + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Discover => "discover",
            StepKind::Provision => "provision",
            StepKind::Prepare => "prepare",
            StepKind::Execute => "execute",
            StepKind::Report => "report",
            StepKind::Finish => "finish",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Pending,
    Running,
    Done,
    Failed,
    Skipped,
}

impl StepState {
    pub fn is_terminal(self) -> bool {
        matches!(self, StepState::Done | StepState::Failed | StepState::Skipped)
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
