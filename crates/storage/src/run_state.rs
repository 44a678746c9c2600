// SPDX-License-Identifier: MIT

//! Persistence for the top-level `run.yaml` artifact.

use crate::atomic;
use crate::error::StorageError;
use crate::workdir::Workdir;
use tmt_core::run::Run;

pub fn load_run(workdir: &Workdir) -> Result<Option<Run>, StorageError> {
    atomic::read_yaml(&workdir.run_yaml())
}

pub fn save_run(workdir: &Workdir, run: &Run) -> Result<(), StorageError> {
    atomic::write_yaml(&workdir.run_yaml(), run)
}

#[cfg(test)]
#[path = "run_state_tests.rs"]
mod tests;
