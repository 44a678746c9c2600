// SPDX-License-Identifier: MIT

//! A single phase as written in a plan's metadata, before materialization
//! assigns it a fully-qualified id and source index (spec §4.3).

use crate::test_def::TestDef;
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDef {
    /// Optional explicit name; defaults to `<how>` at materialization if
    /// omitted, then disambiguated with a numeric suffix on collision.
    #[serde(default)]
    pub name: Option<String>,
    pub how: String,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(rename = "where", default)]
    pub where_: Vec<String>,
    #[serde(default)]
    pub when: Vec<String>,
    /// Statically disables the phase regardless of `when` (spec §4.1).
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub summary: Option<String>,
    /// The command body for script-flavored phases (`how: shell`). Other
    /// `how` values ignore it; `tmt-engine` looks it up by `how`.
    #[serde(default)]
    pub script: Option<String>,
    /// Inline test list for a `how: shell` discover phase (spec §6
    /// Non-goals exclude the hierarchical metadata tree, not this
    /// tree-free discover method).
    #[serde(default)]
    pub tests: Vec<TestDef>,
    /// Forces the dispatcher to run this phase on its guests one at a
    /// time even when more than one is selected (spec §4.4).
    #[serde(default)]
    pub sequential: bool,
}

impl PhaseDef {
    pub fn display_name(&self, fallback_index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None if fallback_index == 0 => self.how.clone(),
            None => format!("{}-{fallback_index}", self.how),
        }
    }
}

#[cfg(test)]
#[path = "phase_def_tests.rs"]
mod tests;
