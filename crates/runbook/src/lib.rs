// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tmt-runbook: materializes a [`tmt_core::Plan`] from a resolved
//! metadata node.
//!
//! The hierarchical `fmf`-style metadata loader (inheritance, virtual
//! tree merging) is an external collaborator; this crate only consumes
//! its output — a flat [`PlanDef`] per plan, already expanded from
//! whatever on-disk tree produced it — and turns it into the engine's
//! [`tmt_core::Plan`] after validating phase placement and applying
//! `adjust` rules against the active [`tmt_core::Context`].

mod adjust;
mod error;
mod phase_def;
mod plan_def;
mod provision_def;
mod test_def;

pub use adjust::AdjustRule;
pub use error::PlanError;
pub use phase_def::PhaseDef;
pub use plan_def::PlanDef;
pub use provision_def::ProvisionDef;
pub use test_def::TestDef;
