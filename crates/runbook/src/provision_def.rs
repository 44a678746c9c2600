// SPDX-License-Identifier: MIT

//! Raw `provision` section: the list of guests a plan requests, before
//! any concrete provisioner acts on it (spec §1: provisioners are an
//! external collaborator; this crate only records what was asked for).

use serde::{Deserialize, Serialize};
use tmt_core::guest::GuestRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionDef {
    #[serde(default = "default_guest_name")]
    pub name: String,
    #[serde(default)]
    pub role: GuestRole,
    /// Free-form `how` selector (`virtual`, `connect`, `local`, ...),
    /// interpreted by whichever provisioner adapter is wired in.
    #[serde(default = "default_how")]
    pub how: String,
}

fn default_guest_name() -> String {
    "default".to_string()
}

fn default_how() -> String {
    "local".to_string()
}

impl Default for ProvisionDef {
    fn default() -> Self {
        Self {
            name: default_guest_name(),
            role: GuestRole::Standalone,
            how: default_how(),
        }
    }
}

#[cfg(test)]
#[path = "provision_def_tests.rs"]
mod tests;
