// SPDX-License-Identifier: MIT

//! The Guest capability contract (spec §6): the engine only ever talks
//! to a guest through this trait, never to a concrete provisioner.

use crate::error::GuestError;
use async_trait::async_trait;
use tmt_core::guest::GuestCapabilities;
use tmt_shell::{CommandOutput, ExecOptions};

#[async_trait]
pub trait GuestAdapter: Send + Sync {
    /// Runs `command` on `guest` and returns its captured output.
    async fn run(&self, guest: &str, command: &str, options: &ExecOptions) -> Result<CommandOutput, GuestError>;

    /// Reboots `guest` and blocks until it is reachable again or
    /// `options.timeout` elapses. Guests that cannot reboot (spec §4.4:
    /// not every guest backend supports it) return
    /// [`GuestError::Unsupported`].
    async fn reboot(&self, guest: &str, options: &ExecOptions) -> Result<(), GuestError>;

    fn capabilities(&self, guest: &str) -> GuestCapabilities;
}

#[cfg(test)]
#[path = "guest_tests.rs"]
mod tests;
