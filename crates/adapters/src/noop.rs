// SPDX-License-Identifier: MIT

//! A guest that never actually runs anything: backs `--dry`, where the
//! engine walks a plan's phases and tests without touching a real guest.

use crate::error::GuestError;
use crate::guest::GuestAdapter;
use async_trait::async_trait;
use tmt_core::guest::GuestCapabilities;
use tmt_shell::{CommandOutput, ExecOptions};

#[derive(Debug, Clone, Default)]
pub struct NoopGuestAdapter;

#[async_trait]
impl GuestAdapter for NoopGuestAdapter {
    async fn run(&self, _guest: &str, _command: &str, _options: &ExecOptions) -> Result<CommandOutput, GuestError> {
        Ok(CommandOutput {
            exit_code: Some(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
            timed_out: false,
        })
    }

    async fn reboot(&self, _guest: &str, _options: &ExecOptions) -> Result<(), GuestError> {
        Ok(())
    }

    fn capabilities(&self, _guest: &str) -> GuestCapabilities {
        GuestCapabilities { can_reboot: true, can_push_workdir: false }
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
