// SPDX-License-Identifier: MIT

//! On-disk persistence for a run's workdir: atomic YAML artifacts, the
//! `run.yaml`/`plan.yaml`/`results.yaml` layout, and the merge logic
//! behind `--again`/`--failed-only` reruns.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod atomic;
pub mod error;
pub mod merge;
pub mod plan_state;
pub mod result_store;
pub mod run_state;
pub mod workdir;

pub use error::{ResultStoreError, StorageError};
pub use merge::merge_results;
pub use plan_state::{load_plan, save_plan};
pub use result_store::ResultStore;
pub use run_state::{load_run, save_run};
pub use workdir::Workdir;
