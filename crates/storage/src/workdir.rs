// SPDX-License-Identifier: MIT

//! The on-disk layout of one run's workdir (spec §4.2):
//!
//! ```text
//! <workdir>/run.yaml
//! <workdir>/log.txt
//! <workdir>/<plan-slug>/plan.yaml
//! <workdir>/<plan-slug>/results.yaml
//! <workdir>/<plan-slug>/execute/data/<test-id>/<serial>/
//! ```

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workdir {
    root: PathBuf,
}

impl Workdir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run_yaml(&self) -> PathBuf {
        self.root.join("run.yaml")
    }

    pub fn log_txt(&self) -> PathBuf {
        self.root.join("log.txt")
    }

    pub fn plan_dir(&self, plan_slug: &str) -> PathBuf {
        self.root.join(plan_slug)
    }

    pub fn plan_yaml(&self, plan_slug: &str) -> PathBuf {
        self.plan_dir(plan_slug).join("plan.yaml")
    }

    pub fn results_yaml(&self, plan_slug: &str) -> PathBuf {
        self.plan_dir(plan_slug).join("results.yaml")
    }

    /// The per-attempt data directory a test invocation's output lands
    /// in: `<plan>/execute/data/<test-id-as-path>/<serial>/`.
    pub fn test_data_dir(&self, plan_slug: &str, test_id: &str, serial: u32) -> PathBuf {
        let test_path = test_id.trim_start_matches('/');
        self.plan_dir(plan_slug)
            .join("execute/data")
            .join(test_path)
            .join(serial.to_string())
    }
}

#[cfg(test)]
#[path = "workdir_tests.rs"]
mod tests;
