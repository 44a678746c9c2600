// SPDX-License-Identifier: MIT

//! Guests: the hosts a plan's tests and prepare/finish phases run on
//! (spec §3, §4.4).

use serde::{Deserialize, Serialize};

crate::define_id! {
    pub struct GuestId;
}

/// A guest's human-facing name, as written in `provision` (`client`,
/// `server`, ...). Defaults to `default` for a single-guest plan.
pub type GuestName = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GuestRole {
    /// Plays no special role; the common case for single-guest plans.
    #[default]
    Standalone,
    Client,
    Server,
}

/// What an adapter says it can do for a guest, used by the dispatcher to
/// decide whether a phase can run there at all (spec §6: Guest capability
/// contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GuestCapabilities {
    pub can_reboot: bool,
    pub can_push_workdir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: GuestName,
    pub role: GuestRole,
    pub capabilities: GuestCapabilities,
}

impl Guest {
    pub fn new(id: GuestId, name: impl Into<GuestName>) -> Self {
        Self {
            id,
            name: name.into(),
            role: GuestRole::Standalone,
            capabilities: GuestCapabilities::default(),
        }
    }

    pub fn with_role(mut self, role: GuestRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_capabilities(mut self, capabilities: GuestCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

#[cfg(test)]
#[path = "guest_tests.rs"]
mod tests;
