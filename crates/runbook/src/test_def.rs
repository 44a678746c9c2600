// SPDX-License-Identifier: MIT

//! One test as written inline under a `how: shell` discover phase. The
//! hierarchical `fmf` metadata tree is out of scope (spec §1 Non-goals),
//! but a discover method that lists its tests directly needs no tree at
//! all — this is that method's schema.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tmt_core::invocation::{Framework, ResultPolicy, RestartPolicy};

fn default_duration() -> String {
    "5m".to_string()
}

fn default_framework() -> Framework {
    Framework::Shell
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestDef {
    pub name: String,
    pub command: String,
    #[serde(default = "default_framework")]
    pub framework: Framework,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default)]
    pub environment: HashMap<String, String>,
    #[serde(default)]
    pub result: ResultPolicy,
    #[serde(default)]
    pub restart_on_exit_code: Vec<i32>,
    #[serde(default)]
    pub restart_max_count: u32,
    /// Guests this test runs on; empty means every guest the enclosing
    /// phase resolves to.
    #[serde(rename = "where", default)]
    pub where_: Vec<String>,
}

impl TestDef {
    pub fn restart_policy(&self) -> RestartPolicy {
        RestartPolicy {
            max_restarts: self.restart_max_count,
            on_exit_codes: self.restart_on_exit_code.clone(),
        }
    }
}

#[cfg(test)]
#[path = "test_def_tests.rs"]
mod tests;
