// SPDX-License-Identifier: MIT

//! The error taxonomy the top-level driver maps to an exit code (spec
//! §7, §6: `0` all pass, `1` a fail, `2` an error, `3` internal engine
//! error — the last of those is what [`RuntimeError`] signals).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Metadata violates schema, references a missing node, or has an
    /// inconsistent `where` — surfaced during plan materialization.
    #[error("specification error: {0}")]
    Specification(#[from] tmt_runbook::PlanError),

    /// A guest could not be acquired or rebooted in time.
    #[error("provision error: {0}")]
    Provision(String),

    /// A transient guest communication failure persisted past its retry
    /// window.
    #[error("guest communication error: {0}")]
    GuestCommunication(#[from] tmt_adapters::GuestError),

    /// A guest reboot did not reconnect within its timeout.
    #[error("reboot timeout on guest {guest:?} after {timeout_s}s")]
    RebootTimeout { guest: String, timeout_s: u64 },

    /// Persistence failure writing or reading a run/plan/result artifact.
    #[error("storage error: {0}")]
    Storage(#[from] tmt_storage::StorageError),

    #[error("result store error: {0}")]
    ResultStore(#[from] tmt_storage::ResultStoreError),

    /// A peer guest in the same phase barrier failed, so this guest's
    /// work was cooperatively cancelled before it started or completed
    /// (spec §4.4).
    #[error("cancelled by a sibling guest's failure")]
    Cancelled,

    /// Anything else: an uncaught condition that should still leave the
    /// workdir intact and surface a traceback (spec §7).
    #[error("internal engine error: {0}")]
    Internal(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
