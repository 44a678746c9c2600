// SPDX-License-Identifier: MIT

//! Topology rendering: a pure function over the active guest set,
//! independent of any one guest adapter (spec §6; SPEC_FULL §C.4).
//!
//! Tests read the topology either as shell-sourceable variables
//! (`TMT_GUESTS`, `TMT_GUEST_ROLES_<ROLE>`) or as a `topology.yaml`
//! artifact shipped alongside the test's data directory.

use crate::guest::{Guest, GuestRole};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyGuest {
    pub name: String,
    pub role: GuestRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub guests: Vec<TopologyGuest>,
}

impl Topology {
    pub fn from_guests(guests: &[Guest]) -> Self {
        Self {
            guests: guests
                .iter()
                .map(|guest| TopologyGuest {
                    name: guest.name.clone(),
                    role: guest.role,
                })
                .collect(),
        }
    }

    fn by_role(&self) -> BTreeMap<String, Vec<&str>> {
        let mut by_role: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for guest in &self.guests {
            let role = format!("{:?}", guest.role).to_ascii_uppercase();
            by_role.entry(role).or_default().push(guest.name.as_str());
        }
        by_role
    }

    /// Renders shell variable assignments a test can `source`.
    pub fn render_shell(&self) -> String {
        let mut out = String::new();
        let names: Vec<&str> = self.guests.iter().map(|g| g.name.as_str()).collect();
        let _ = writeln!(out, "TMT_GUESTS=\"{}\"", names.join(" "));
        for (role, names) in self.by_role() {
            let _ = writeln!(out, "TMT_GUEST_ROLES_{role}=\"{}\"", names.join(" "));
        }
        out
    }

    pub fn render_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
#[path = "topology_tests.rs"]
mod tests;
